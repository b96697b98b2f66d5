use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier for a catalog listing. Derived from the creation time in
/// milliseconds, bumped when two inserts land in the same millisecond.
pub type ListingId = i64;

/// A single catalog entry.
///
/// Listings are immutable once created; there is no update path. They
/// are removed as a whole, which also triggers best-effort cleanup of
/// the image blob they reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    /// Reference to an uploaded asset: an absolute URL under the public
    /// uploads mount, or a bare blob name.
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a listing.
///
/// Every field is optional so that missing input surfaces as a domain
/// validation error (HTTP 400) instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewListing {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// Price input, accepted as a JSON number or a numeric string (HTML
/// forms submit `"12.50"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    /// Parse into a non-negative, finite amount.
    pub fn parse(&self) -> Result<f64, CoreError> {
        let value = match self {
            Price::Number(n) => *n,
            Price::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoreError::Validation(format!("Price '{s}' is not a number")))?,
        };

        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::Validation(format!(
                "Price must be a non-negative number, got {value}"
            )));
        }

        Ok(value)
    }
}
