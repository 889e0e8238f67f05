//! Funding table views.

use serde::Serialize;

use super::Action;
use crate::models::{Classification, CompanyDetails, FundingRow};

/// Longest funding-source name shown on a card before it is shortened.
pub const NAME_DISPLAY_LIMIT: usize = 25;

/// One funding source on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundingCard {
    /// Full name.
    pub company: String,
    /// Name as shown on the card.
    pub label: String,
    pub count: u64,
    pub classification: Classification,
    pub action: Action,
}

impl From<&FundingRow> for FundingCard {
    fn from(row: &FundingRow) -> Self {
        Self {
            company: row.company.clone(),
            label: truncate_name(&row.company),
            count: row.count,
            classification: row.classification,
            action: Action::OpenDetails { company: row.company.clone() },
        }
    }
}

/// Detail overlay of one funding source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    pub company: String,
    pub classification: Classification,
    pub count: u64,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub top_chemicals: Vec<(String, u64)>,
    pub top_affiliations: Vec<String>,
    pub full_network: Action,
    pub close: Action,
}

impl DetailsView {
    /// Overlay for `row`, filled from `details` when they have arrived.
    #[must_use]
    pub fn new(
        row: &FundingRow,
        loading: bool,
        details: Option<&CompanyDetails>,
        error: Option<String>,
    ) -> Self {
        Self {
            company: row.company.clone(),
            classification: row.classification,
            count: row.count,
            loading,
            error,
            top_chemicals: details.map(|d| d.top_chemicals.clone()).unwrap_or_default(),
            top_affiliations: details.map(|d| d.top_affiliations.clone()).unwrap_or_default(),
            full_network: Action::ViewFullNetwork { company: row.company.clone() },
            close: Action::CloseDetails,
        }
    }
}

/// The funding table panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundingView {
    pub loading: bool,
    /// Informational message that accompanies the rows (fallback data).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Cards by descending study count.
    pub cards: Vec<FundingCard>,
    /// Offered whenever there is nothing to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DetailsView>,
}

impl FundingView {
    /// Grid view of `rows`, stably ordered by descending count.
    #[must_use]
    pub fn from_rows(rows: &[FundingRow]) -> Self {
        let mut cards: Vec<FundingCard> = rows.iter().map(FundingCard::from).collect();
        cards.sort_by(|a, b| b.count.cmp(&a.count));

        let retry = cards.is_empty().then_some(Action::Retry);

        Self { loading: false, notice: None, error: None, cards, retry, details: None }
    }
}

/// Shorten a name to [`NAME_DISPLAY_LIMIT`] characters plus an ellipsis.
#[must_use]
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_DISPLAY_LIMIT {
        let head: String = name.chars().take(NAME_DISPLAY_LIMIT).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}
