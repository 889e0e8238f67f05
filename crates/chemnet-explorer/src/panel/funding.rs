//! Funding table panel: ranked list plus a lazily loaded detail overlay.

use super::{PanelState, RequestToken, RequestTracker};
use crate::client::ChemNetClient;
use crate::error::{ClientResult, PanelError};
use crate::models::{CompanyDetails, FundingRow, FundingTable};
use crate::views::{DetailsView, FundingView};

/// Shown when the ranked list cannot be loaded.
pub const LIST_FAILED: &str = "Failed to load funding data";

/// Shown when the backend has no details for the selected source.
pub const DETAILS_MISSING: &str = "No data found for company";

/// Shown when the details request itself fails.
pub const DETAILS_FAILED: &str = "Failed to load company details";

/// Funding table panel.
///
/// The list and the overlay load independently, each guarded by its own
/// request tracker.
#[derive(Debug, Default)]
pub struct FundingPanel {
    list: PanelState<FundingTable>,
    list_tracker: RequestTracker,
    selected: Option<FundingRow>,
    details: PanelState<CompanyDetails>,
    details_tracker: RequestTracker,
}

impl FundingPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn list(&self) -> &PanelState<FundingTable> {
        &self.list
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&FundingRow> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn details(&self) -> &PanelState<CompanyDetails> {
        &self.details
    }

    /// Move the list to `Loading`.
    pub fn begin_load(&mut self) -> RequestToken {
        self.list = PanelState::Loading;
        self.list_tracker.issue()
    }

    /// Apply a list outcome; false when `token` is stale.
    pub fn complete_load(&mut self, token: RequestToken, outcome: ClientResult<FundingTable>) -> bool {
        if !self.list_tracker.is_current(token) {
            tracing::debug!("Discarding stale funding list response");
            return false;
        }

        self.list = match outcome {
            Ok(table) if table.success => PanelState::Ready(table),
            Ok(table) => PanelState::Failed(PanelError::domain_miss(
                table.message.unwrap_or_else(|| LIST_FAILED.to_string()),
                Vec::new(),
            )),
            Err(e) => {
                tracing::warn!(error = %e, "Funding list request failed");
                PanelState::Failed(PanelError::from(e))
            }
        };
        true
    }

    /// Fetch the ranked list.
    pub async fn load(&mut self, client: &ChemNetClient) -> &PanelState<FundingTable> {
        let token = self.begin_load();
        let outcome = client.get_funding_table().await;
        self.complete_load(token, outcome);
        &self.list
    }

    /// Re-issue the list fetch.
    pub async fn retry(&mut self, client: &ChemNetClient) -> &PanelState<FundingTable> {
        self.load(client).await
    }

    /// Select `company` and move its details to `Loading`.
    ///
    /// The row is taken from the loaded list when present.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name.
    pub fn begin_details(&mut self, company: &str) -> Result<RequestToken, PanelError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(PanelError::validation("company_name", "cannot be empty"));
        }

        let row = self
            .list
            .ready()
            .and_then(|t| t.funding_data.iter().find(|r| r.company == company))
            .cloned()
            .unwrap_or_else(|| FundingRow { company: company.to_string(), ..Default::default() });

        self.selected = Some(row);
        self.details = PanelState::Loading;
        Ok(self.details_tracker.issue())
    }

    /// Apply a details outcome; false when `token` is stale or the overlay was closed.
    pub fn complete_details(
        &mut self,
        token: RequestToken,
        outcome: ClientResult<CompanyDetails>,
    ) -> bool {
        if !self.details_tracker.is_current(token) || self.selected.is_none() {
            tracing::debug!("Discarding stale company details response");
            return false;
        }

        self.details = match outcome {
            Ok(details) if details.success => PanelState::Ready(details),
            Ok(_) => PanelState::Failed(PanelError::domain_miss(DETAILS_MISSING, Vec::new())),
            Err(e) => {
                tracing::warn!(error = %e, "Company details request failed");
                PanelState::Failed(PanelError::from(e))
            }
        };
        true
    }

    /// Open the overlay for `company` and fetch its details.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name.
    pub async fn open_details(
        &mut self,
        client: &ChemNetClient,
        company: &str,
    ) -> Result<&PanelState<CompanyDetails>, PanelError> {
        let token = self.begin_details(company)?;
        let name = self.selected.as_ref().map(|r| r.company.clone()).unwrap_or_default();
        let outcome = client.get_company_details(&name).await;
        self.complete_details(token, outcome);
        Ok(&self.details)
    }

    /// Close the overlay. Details still in flight are dropped on arrival.
    pub fn close_details(&mut self) {
        self.selected = None;
        self.details = PanelState::Idle;
        self.details_tracker.invalidate();
    }

    #[must_use]
    pub fn view(&self) -> FundingView {
        let mut view = match &self.list {
            PanelState::Idle => FundingView::from_rows(&[]),
            PanelState::Loading => {
                FundingView { loading: true, retry: None, ..FundingView::from_rows(&[]) }
            }
            PanelState::Ready(table) => FundingView {
                notice: table.message.clone(),
                ..FundingView::from_rows(&table.funding_data)
            },
            PanelState::Failed(err) => FundingView {
                error: Some(list_error(err)),
                ..FundingView::from_rows(&[])
            },
        };

        view.details = self.selected.as_ref().map(|row| match &self.details {
            PanelState::Idle => DetailsView::new(row, false, None, None),
            PanelState::Loading => DetailsView::new(row, true, None, None),
            PanelState::Ready(details) => DetailsView::new(row, false, Some(details), None),
            PanelState::Failed(err) => DetailsView::new(row, false, None, Some(details_error(err))),
        });
        view
    }
}

fn list_error(err: &PanelError) -> String {
    match err {
        PanelError::DomainMiss { message, .. } => message.clone(),
        _ => LIST_FAILED.to_string(),
    }
}

fn details_error(err: &PanelError) -> String {
    match err {
        PanelError::DomainMiss { message, .. } => message.clone(),
        _ => DETAILS_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::models::Classification;
    use crate::views::Action;

    fn table(rows: &[(&str, u64)]) -> FundingTable {
        FundingTable {
            success: true,
            funding_data: rows
                .iter()
                .map(|(company, count)| FundingRow {
                    company: (*company).to_string(),
                    count: *count,
                    classification: Classification::Government,
                })
                .collect(),
            message: None,
        }
    }

    #[test]
    fn test_failed_list_offers_retry() {
        let mut panel = FundingPanel::new();
        let token = panel.begin_load();
        panel.complete_load(token, Err(ClientError::from_status(503, None)));

        let view = panel.view();
        assert_eq!(view.error.as_deref(), Some(LIST_FAILED));
        assert_eq!(view.retry, Some(Action::Retry));
        assert!(view.cards.is_empty());
    }

    #[test]
    fn test_unsuccessful_list_uses_backend_message() {
        let mut panel = FundingPanel::new();
        let token = panel.begin_load();
        let failed = FundingTable { message: Some("Database offline".into()), ..Default::default() };
        panel.complete_load(token, Ok(failed));
        assert_eq!(panel.view().error.as_deref(), Some("Database offline"));
    }

    #[test]
    fn test_message_on_success_is_a_notice() {
        let mut panel = FundingPanel::new();
        let token = panel.begin_load();
        let mut data = table(&[("NIH", 3)]);
        data.message = Some("Showing sample data".into());
        panel.complete_load(token, Ok(data));

        let view = panel.view();
        assert_eq!(view.notice.as_deref(), Some("Showing sample data"));
        assert!(view.error.is_none());
        assert_eq!(view.cards.len(), 1);
    }

    #[test]
    fn test_details_use_loaded_row() {
        let mut panel = FundingPanel::new();
        let token = panel.begin_load();
        panel.complete_load(token, Ok(table(&[("NIH", 12), ("NSF", 4)])));

        let token = panel.begin_details("NSF").unwrap();
        assert!(panel.view().details.unwrap().loading);

        let details = CompanyDetails {
            success: true,
            top_chemicals: vec![("Aspirin".into(), 2)],
            ..Default::default()
        };
        assert!(panel.complete_details(token, Ok(details)));

        let overlay = panel.view().details.unwrap();
        assert_eq!(overlay.count, 4);
        assert_eq!(overlay.classification, Classification::Government);
        assert_eq!(overlay.top_chemicals, vec![("Aspirin".to_string(), 2)]);
        assert_eq!(overlay.full_network, Action::ViewFullNetwork { company: "NSF".into() });
    }

    #[test]
    fn test_details_errors() {
        let mut panel = FundingPanel::new();
        let token = panel.begin_details("NIH").unwrap();
        panel.complete_details(token, Ok(CompanyDetails::default()));
        assert_eq!(panel.view().details.unwrap().error.as_deref(), Some(DETAILS_MISSING));

        let token = panel.begin_details("NIH").unwrap();
        panel.complete_details(token, Err(ClientError::from_status(500, None)));
        assert_eq!(panel.view().details.unwrap().error.as_deref(), Some(DETAILS_FAILED));
    }

    #[test]
    fn test_close_drops_in_flight_details() {
        let mut panel = FundingPanel::new();
        let token = panel.begin_details("NIH").unwrap();
        panel.close_details();

        assert!(!panel.complete_details(token, Ok(CompanyDetails { success: true, ..Default::default() })));
        assert!(panel.selected().is_none());
        assert_eq!(panel.details(), &PanelState::Idle);
        assert!(panel.view().details.is_none());
    }

    #[test]
    fn test_details_independent_of_list() {
        let mut panel = FundingPanel::new();
        let list_token = panel.begin_load();
        let details_token = panel.begin_details("NIH").unwrap();
        panel.complete_load(list_token, Err(ClientError::from_status(500, None)));

        assert!(panel.complete_details(details_token, Ok(CompanyDetails { success: true, ..Default::default() })));
        assert!(panel.list().error().is_some());
        assert!(panel.details().ready().is_some());
    }

    #[test]
    fn test_empty_company_name_rejected() {
        let mut panel = FundingPanel::new();
        assert!(matches!(panel.begin_details("  "), Err(PanelError::Validation { .. })));
        assert!(panel.selected().is_none());
    }
}
