/// Document identifiers issued by the hosted database.
pub type DocId = String;

/// A calendar day on which a service is performed. No time-of-day.
///
/// Two service dates refer to the same service day exactly when they compare
/// equal.
pub type ServiceDate = chrono::NaiveDate;

/// Monetary amounts in rupees, tax-inclusive unless noted otherwise.
pub type Amount = rust_decimal::Decimal;
