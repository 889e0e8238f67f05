//! Funding table models.

use serde::{Deserialize, Deserializer, Serialize, de};

use super::{Classification, null_as_default};

/// One funding source in the ranked list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,

    /// Number of studies funded.
    #[serde(default, deserialize_with = "study_count")]
    pub count: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub classification: Classification,
}

/// Study counts arrive as integers, but some backends serialize them as `12.0`.
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn study_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(0);
    };

    if let Some(n) = number.as_u64() {
        return Ok(n);
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(de::Error::custom(format!("invalid study count {number}"))),
    }
}

/// Response of `GET /funding-table/`.
///
/// Older backends name the list `periodic_data`; both spellings are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundingTable {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    #[serde(default, alias = "periodic_data", deserialize_with = "null_as_default")]
    pub funding_data: Vec<FundingRow>,

    /// Notice accompanying fallback data, or the failure reason.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /funding-table/?company_name=...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    #[serde(default)]
    pub company_name: Option<String>,

    /// `(chemical, studies)` pairs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_chemicals: Vec<(String, u64)>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub top_affiliations: Vec<String>,

    #[serde(default)]
    pub message: Option<String>,
}
