//! Service providers that can be assigned to bookings.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DocId, ServiceDate};

/// A mehndi, makeup or photography artist on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: DocId,
    pub name: String,
    /// Registered home district, used for local matching.
    #[serde(default)]
    pub district: Option<String>,
    /// Days the artist has marked themselves unavailable.
    #[serde(default)]
    pub unavailable_dates: Vec<ServiceDate>,
}

impl Artist {
    /// Whether this artist is based in `district`. A missing district on
    /// either side never matches.
    pub fn is_local_to(&self, district: Option<&str>) -> bool {
        match (self.district.as_deref(), district) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => false,
        }
    }
}

/// Look up an artist by id.
pub fn find_artist<'a>(artists: &'a [Artist], id: &str) -> Result<&'a Artist, CoreError> {
    artists
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "artist",
            id: id.to_string(),
        })
}
