//! Researcher panel with disambiguation.

use url::Url;

use super::{PanelState, SearchPanel};
use crate::client::ChemNetClient;
use crate::error::PanelError;
use crate::models::{ResearcherSearchRequest, ResearcherSearchResult, Researchers};
use crate::views::PanelView;

/// Researcher search panel.
///
/// An ambiguous name answers with a list of matches; the user then either
/// picks one by index or combines them all. Both re-query with the same name.
#[derive(Debug, Default)]
pub struct ResearcherPanel {
    inner: SearchPanel<Researchers>,
}

impl ResearcherPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &PanelState<ResearcherSearchResult> {
        self.inner.state()
    }

    #[must_use]
    pub const fn request(&self) -> Option<&ResearcherSearchRequest> {
        self.inner.request()
    }

    #[must_use]
    pub fn examples(&self) -> &[String] {
        self.inner.examples()
    }

    pub async fn load_examples(&mut self, client: &ChemNetClient) {
        self.inner.load_examples(client).await;
    }

    /// Fresh search for `name`.
    pub async fn search(
        &mut self,
        client: &ChemNetClient,
        name: &str,
    ) -> &PanelState<ResearcherSearchResult> {
        self.inner.search(client, ResearcherSearchRequest::new(name)).await
    }

    /// Fresh search for a suggested name.
    pub async fn select_suggestion(
        &mut self,
        client: &ChemNetClient,
        suggestion: &str,
    ) -> &PanelState<ResearcherSearchResult> {
        self.inner.select_suggestion(client, suggestion).await
    }

    /// Re-query for match `index` of the pending selection.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the panel untouched, when no
    /// selection is pending or `index` is out of range.
    pub async fn select(
        &mut self,
        client: &ChemNetClient,
        index: usize,
    ) -> Result<&PanelState<ResearcherSearchResult>, PanelError> {
        let pending = self.pending_matches();
        if pending == 0 {
            return Err(PanelError::validation("selected_index", "no selection is pending"));
        }
        if index >= pending {
            return Err(PanelError::validation(
                "selected_index",
                format!("must be below {pending}"),
            ));
        }

        let request = self.current_request()?.select(index);
        Ok(self.inner.search(client, request).await)
    }

    /// Re-query merging every match of the current name.
    ///
    /// # Errors
    ///
    /// Returns a validation error when nothing has been searched yet.
    pub async fn combine_all(
        &mut self,
        client: &ChemNetClient,
    ) -> Result<&PanelState<ResearcherSearchResult>, PanelError> {
        let request = self.current_request()?.combine_all();
        Ok(self.inner.search(client, request).await)
    }

    #[must_use]
    pub fn view(&self, host: &Url) -> PanelView {
        self.inner.view(host)
    }

    /// Generic panel underneath, for driving requests by token.
    pub fn panel_mut(&mut self) -> &mut SearchPanel<Researchers> {
        &mut self.inner
    }

    fn pending_matches(&self) -> usize {
        self.state()
            .ready()
            .filter(|r| r.requires_selection())
            .map_or(0, |r| r.matches.len())
    }

    fn current_request(&self) -> Result<ResearcherSearchRequest, PanelError> {
        self.request()
            .cloned()
            .ok_or_else(|| PanelError::validation("researcher", "cannot be empty"))
    }
}
