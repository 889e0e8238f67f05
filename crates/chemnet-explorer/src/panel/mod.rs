//! Search panels: one controller per entity type, each owning its view state.
//!
//! A panel moves `Idle -> Loading -> {Ready, Failed}` and back to `Loading`
//! on every new search. Each search is tagged with a [`RequestToken`]; a
//! completion carrying anything but the latest token is discarded, so a slow
//! stale response never overwrites a newer one. In-flight requests are not
//! aborted.

mod funding;
mod researcher;

pub use funding::{DETAILS_FAILED, DETAILS_MISSING, FundingPanel, LIST_FAILED};
pub use researcher::ResearcherPanel;

use url::Url;

use crate::client::ChemNetClient;
use crate::error::{ClientResult, PanelError};
use crate::models::{Catalog, Chemicals, Companies, SearchRequest, SearchResponse, Universities};
use crate::views::{self, Choice, PanelView, Present};

/// Chemical search panel.
pub type ChemicalPanel = SearchPanel<Chemicals>;

/// Funding-source search panel.
pub type CompanyPanel = SearchPanel<Companies>;

/// University search panel.
pub type UniversityPanel = SearchPanel<Universities>;

/// State of one panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(PanelError),
}

impl<T> PanelState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&PanelError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Issues monotonically increasing tokens and remembers the latest.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    /// Issue a token that supersedes every earlier one.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Whether `token` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Make every outstanding token stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// Generic search panel for one endpoint.
#[derive(Debug)]
pub struct SearchPanel<K: Present> {
    state: PanelState<K::Response>,
    tracker: RequestTracker,
    /// Request behind the current state.
    request: Option<K::Request>,
    examples: Vec<String>,
}

impl<K: Present> Default for SearchPanel<K> {
    fn default() -> Self {
        Self {
            state: PanelState::Idle,
            tracker: RequestTracker::default(),
            request: None,
            examples: Vec::new(),
        }
    }
}

impl<K: Present> SearchPanel<K> {
    /// Create an idle panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &PanelState<K::Response> {
        &self.state
    }

    /// Request of the latest search, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&K::Request> {
        self.request.as_ref()
    }

    /// Example names loaded from the endpoint listing.
    #[must_use]
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Load example names. Failures are logged and leave the list empty.
    pub async fn load_examples(&mut self, client: &ChemNetClient) {
        match client.catalog::<K>().await {
            Ok(catalog) => self.examples = catalog.examples(),
            Err(e) => {
                tracing::warn!(endpoint = K::PATH, error = %e, "Failed to load examples");
                self.examples.clear();
            }
        }
    }

    /// Validate `request` and move to `Loading`.
    ///
    /// The name is trimmed; an empty name is rejected and leaves the state untouched.
    pub fn begin(&mut self, mut request: K::Request) -> Result<RequestToken, PanelError> {
        let name = request.name().trim().to_string();
        if name.is_empty() {
            return Err(PanelError::validation(K::FIELD, "cannot be empty"));
        }
        *request.name_mut() = name;

        let token = self.tracker.issue();
        tracing::debug!(endpoint = K::PATH, token = token.0, query = request.name(), "Search issued");

        self.request = Some(request);
        self.state = PanelState::Loading;
        Ok(token)
    }

    /// Apply the outcome of the request identified by `token`.
    ///
    /// Returns false, leaving the state untouched, when `token` is stale.
    pub fn complete(&mut self, token: RequestToken, outcome: ClientResult<K::Response>) -> bool {
        if !self.tracker.is_current(token) {
            tracing::debug!(endpoint = K::PATH, token = token.0, "Discarding stale response");
            return false;
        }

        let request = self.request.clone().unwrap_or_default();
        self.state = match outcome {
            Ok(response)
                if response.is_success() || K::selection(&request, &response).is_some() =>
            {
                PanelState::Ready(response)
            }
            Ok(response) => {
                let message = response.message().unwrap_or(K::NOT_FOUND).to_string();
                PanelState::Failed(PanelError::domain_miss(message, response.suggestions().to_vec()))
            }
            Err(e) => PanelState::Failed(PanelError::from(e)),
        };
        true
    }

    /// Show an error raised before any request could be built.
    ///
    /// Any in-flight search becomes stale.
    pub fn reject(&mut self, error: PanelError) {
        self.tracker.invalidate();
        self.state = PanelState::Failed(error);
    }

    /// Run one search: validate, fetch, apply.
    ///
    /// Validation failures are shown as the panel's error.
    pub async fn search(
        &mut self,
        client: &ChemNetClient,
        request: K::Request,
    ) -> &PanelState<K::Response> {
        let token = match self.begin(request) {
            Ok(token) => token,
            Err(e) => {
                self.state = PanelState::Failed(e);
                return &self.state;
            }
        };

        let request = self.request.clone().unwrap_or_default();
        let outcome = client.search::<K>(&request).await;
        self.complete(token, outcome);
        &self.state
    }

    /// Search again for `suggestion`, keeping the current filters.
    pub async fn select_suggestion(
        &mut self,
        client: &ChemNetClient,
        suggestion: &str,
    ) -> &PanelState<K::Response> {
        let request = self.request.clone().unwrap_or_default().with_name(suggestion);
        self.search(client, request).await
    }

    /// Current view of the panel.
    #[must_use]
    pub fn view(&self, host: &Url) -> PanelView {
        match &self.state {
            PanelState::Idle => PanelView::Idle {
                examples: self.examples.iter().map(Choice::search).collect(),
            },
            PanelState::Loading => PanelView::Loading,
            PanelState::Ready(response) => {
                let request = self.request.clone().unwrap_or_default();
                match K::selection(&request, response) {
                    Some(selection) => PanelView::Selection(selection),
                    None => PanelView::Result(views::result_view::<K>(&request, response, host)),
                }
            }
            PanelState::Failed(err) => PanelView::Error(views::error_view(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::models::{ChemicalSearchRequest, ChemicalSearchResult};

    fn found(name: &str) -> ChemicalSearchResult {
        ChemicalSearchResult {
            success: true,
            chemical: Some(name.to_string()),
            iframe_url: Some(format!("/static/{name}.html")),
            ..Default::default()
        }
    }

    fn host() -> Url {
        Url::parse("https://viz.example.org").unwrap()
    }

    #[test]
    fn test_tracker_latest_wins() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(first < second);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));

        tracker.invalidate();
        assert!(!tracker.is_current(second));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut panel = ChemicalPanel::new();
        let slow = panel.begin(ChemicalSearchRequest::new("Caffeine", None)).unwrap();
        let fast = panel.begin(ChemicalSearchRequest::new("Aspirin", None)).unwrap();

        assert!(panel.complete(fast, Ok(found("Aspirin"))));
        assert!(!panel.complete(slow, Ok(found("Caffeine"))));

        let view = panel.view(&host());
        assert_eq!(view.as_result().unwrap().title, "Chemical Network: Aspirin");
    }

    #[test]
    fn test_begin_trims_and_rejects_empty() {
        let mut panel = ChemicalPanel::new();
        let err = panel.begin(ChemicalSearchRequest::new("   ", None)).unwrap_err();
        assert!(matches!(err, PanelError::Validation { .. }));
        assert!(matches!(panel.state(), PanelState::Idle));

        panel.begin(ChemicalSearchRequest::new("  Aspirin ", None)).unwrap();
        assert_eq!(panel.request().unwrap().chemical, "Aspirin");
        assert!(panel.state().is_loading());
    }

    #[test]
    fn test_domain_miss_uses_default_message() {
        let mut panel = ChemicalPanel::new();
        let token = panel.begin(ChemicalSearchRequest::new("Asprin", None)).unwrap();
        let miss = ChemicalSearchResult { suggestions: vec!["Aspirin".into()], ..Default::default() };
        panel.complete(token, Ok(miss));

        let err = panel.state().error().unwrap();
        assert_eq!(err.to_user_message(), "Chemical not found");
        assert_eq!(err.suggestions(), ["Aspirin".to_string()]);
    }

    #[test]
    fn test_failed_response_never_renders_network() {
        let mut panel = ChemicalPanel::new();
        let token = panel.begin(ChemicalSearchRequest::new("Asprin", None)).unwrap();
        let miss = ChemicalSearchResult {
            success: false,
            iframe_url: Some("/static/leftover.html".into()),
            message: Some("No match".into()),
            ..Default::default()
        };
        panel.complete(token, Ok(miss));

        let view = panel.view(&host());
        assert!(view.as_result().is_none());
        assert_eq!(view.as_error().unwrap().message, "No match");
    }

    #[test]
    fn test_transport_failure_becomes_server_error() {
        let mut panel = ChemicalPanel::new();
        let token = panel.begin(ChemicalSearchRequest::new("Aspirin", None)).unwrap();
        panel.complete(token, Err(ClientError::from_status(500, None)));
        assert_eq!(panel.state().error().unwrap().to_user_message(), "Server error: 500");
    }

    #[test]
    fn test_idle_view_lists_examples() {
        let mut panel = ChemicalPanel::new();
        panel.examples = vec!["Aspirin".into(), "Caffeine".into()];
        match panel.view(&host()) {
            PanelView::Idle { examples } => {
                assert_eq!(examples, vec![Choice::search("Aspirin"), Choice::search("Caffeine")]);
            }
            other => panic!("expected idle view, got {other:?}"),
        }
    }
}
