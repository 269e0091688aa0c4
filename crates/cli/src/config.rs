use std::path::PathBuf;

use chrono::FixedOffset;
use rust_decimal::Decimal;
use shringar_core::payout::{fee_fraction_from_percent, validate_platform_fee_fraction};

use crate::error::{CliError, CliResult};

/// Snapshot file used when `SHRINGAR_SNAPSHOT` is unset.
pub const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";

/// Offset used to turn stored timestamps into service days (IST, +05:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Platform fee (percent) applied when neither configuration nor the
/// snapshot's settings document provide one.
pub const DEFAULT_PLATFORM_FEE_PERCENT: Decimal = Decimal::TEN;

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the exported snapshot (default: `snapshot.json`).
    pub snapshot_path: PathBuf,
    /// Overrides the settings document's platform fee when set.
    pub platform_fee_percent: Option<Decimal>,
    /// Offset applied when converting timestamps to calendar days.
    pub utc_offset: FixedOffset,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Default         |
    /// |------------------------------|-----------------|
    /// | `SHRINGAR_SNAPSHOT`          | `snapshot.json` |
    /// | `PLATFORM_FEE_PERCENT`       | --              |
    /// | `SERVICE_UTC_OFFSET_MINUTES` | `330`           |
    pub fn from_env() -> CliResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(get: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let snapshot_path = get("SHRINGAR_SNAPSHOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        let platform_fee_percent = get("PLATFORM_FEE_PERCENT")
            .map(|v| {
                v.trim().parse::<Decimal>().map_err(|_| {
                    CliError::Config(format!("PLATFORM_FEE_PERCENT must be a number, got {v:?}"))
                })
            })
            .transpose()?;

        let offset_minutes = match get("SERVICE_UTC_OFFSET_MINUTES") {
            Some(v) => v.trim().parse::<i32>().map_err(|_| {
                CliError::Config(format!(
                    "SERVICE_UTC_OFFSET_MINUTES must be an integer, got {v:?}"
                ))
            })?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };

        Ok(Self {
            snapshot_path,
            platform_fee_percent,
            utc_offset: utc_offset_from_minutes(offset_minutes)?,
        })
    }

    /// Apply command-line values on top of the environment.
    pub fn with_overrides(
        mut self,
        snapshot_path: Option<PathBuf>,
        platform_fee_percent: Option<Decimal>,
    ) -> Self {
        if let Some(path) = snapshot_path {
            self.snapshot_path = path;
        }
        if platform_fee_percent.is_some() {
            self.platform_fee_percent = platform_fee_percent;
        }
        self
    }

    /// Pick the platform fee fraction: configured override, then the
    /// settings document, then [`DEFAULT_PLATFORM_FEE_PERCENT`].
    pub fn resolve_fee_fraction(&self, settings_percent: Option<Decimal>) -> CliResult<Decimal> {
        let percent = match self.platform_fee_percent.or(settings_percent) {
            Some(p) => p,
            None => {
                tracing::warn!(
                    default_percent = %DEFAULT_PLATFORM_FEE_PERCENT,
                    "No platform fee configured, using default",
                );
                DEFAULT_PLATFORM_FEE_PERCENT
            }
        };
        let fraction = fee_fraction_from_percent(percent);
        validate_platform_fee_fraction(fraction)?;
        Ok(fraction)
    }
}

/// Build a [`FixedOffset`] from minutes east of UTC.
pub fn utc_offset_from_minutes(minutes: i32) -> CliResult<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| CliError::Config(format!("UTC offset of {minutes} minutes is out of range")))
}
