//! Researcher search models, including disambiguation.

use serde::{Deserialize, Serialize};

use super::{Catalog, Connections, SearchRequest, SearchResponse, null_as_default};

/// Body of `POST /researchers/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherSearchRequest {
    /// Researcher name, usually "Last, First".
    pub researcher: String,

    /// Index into the `matches` of a previous ambiguous response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,

    /// Merge every matching record into one network.
    #[serde(default)]
    pub combine: bool,
}

impl ResearcherSearchRequest {
    /// Plain name search.
    #[must_use]
    pub fn new(researcher: impl Into<String>) -> Self {
        Self { researcher: researcher.into(), selected_index: None, combine: false }
    }

    /// Re-query for one of the ambiguous matches.
    #[must_use]
    pub fn select(&self, index: usize) -> Self {
        Self { researcher: self.researcher.clone(), selected_index: Some(index), combine: false }
    }

    /// Re-query merging all matches.
    #[must_use]
    pub fn combine_all(&self) -> Self {
        Self { researcher: self.researcher.clone(), selected_index: None, combine: true }
    }
}

impl SearchRequest for ResearcherSearchRequest {
    fn name(&self) -> &str {
        &self.researcher
    }

    fn name_mut(&mut self) -> &mut String {
        &mut self.researcher
    }

    /// A new name starts a fresh search, so selection state is dropped.
    fn with_name(&self, name: &str) -> Self {
        Self::new(name)
    }
}

/// One candidate record for an ambiguous researcher name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearcherMatch {
    #[serde(rename = "Researcher", default, deserialize_with = "null_as_default")]
    pub researcher: String,

    #[serde(rename = "Affiliation", default, deserialize_with = "null_as_default")]
    pub affiliation: String,

    #[serde(rename = "Country", default, deserialize_with = "null_as_default")]
    pub country: String,

    #[serde(rename = "Department", default)]
    pub department: Option<String>,

    #[serde(rename = "Companies", default, deserialize_with = "null_as_default")]
    pub companies: Vec<serde_json::Value>,
}

/// Response of `POST /researchers/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearcherSearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    #[serde(default)]
    pub researcher: Option<String>,

    #[serde(default)]
    pub iframe_url: Option<String>,

    #[serde(default)]
    pub connections: Option<Connections>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<ResearcherMatch>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub needs_selection: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ResearcherSearchResult {
    /// True when the user must pick a match (or combine) before a network exists.
    #[must_use]
    pub fn requires_selection(&self) -> bool {
        self.needs_selection && self.matches.len() > 1
    }
}

impl SearchResponse for ResearcherSearchResult {
    fn is_success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    fn display_name(&self) -> Option<&str> {
        self.researcher.as_deref()
    }

    fn iframe_url(&self) -> Option<&str> {
        self.iframe_url.as_deref()
    }

    fn connections(&self) -> Option<&Connections> {
        self.connections.as_ref()
    }
}

/// Response of `GET /researchers/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearcherCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub example_researchers: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub all_researcher_names: Vec<String>,
}

impl Catalog for ResearcherCatalog {
    fn examples(&self) -> Vec<String> {
        self.example_researchers.clone()
    }
}
