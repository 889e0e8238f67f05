//! Funding-source (company) search models.

use serde::{Deserialize, Serialize};

use super::{
    Catalog, ChemicalGroup, CompanyCategory, Connections, SearchRequest, SearchResponse,
    null_as_default,
};

/// Body of `POST /companies/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySearchRequest {
    /// Funding source name.
    pub company: String,

    #[serde(default)]
    pub category: CompanyCategory,

    #[serde(default)]
    pub chemical_group: ChemicalGroup,

    /// Split affiliations by country.
    #[serde(default)]
    pub sep_country: bool,
}

impl CompanySearchRequest {
    /// Search with default filters.
    #[must_use]
    pub fn new(company: impl Into<String>) -> Self {
        Self { company: company.into(), ..Self::default() }
    }
}

impl SearchRequest for CompanySearchRequest {
    fn name(&self) -> &str {
        &self.company
    }

    fn name_mut(&mut self) -> &mut String {
        &mut self.company
    }
}

/// Profile card shown above a funding-source network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Response of `POST /companies/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub iframe_url: Option<String>,

    #[serde(default)]
    pub connections: Option<Connections>,

    #[serde(default)]
    pub description: Option<CompanyProfile>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse for CompanySearchResult {
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
        self.company.as_deref()
    }

    fn iframe_url(&self) -> Option<&str> {
        self.iframe_url.as_deref()
    }

    fn connections(&self) -> Option<&Connections> {
        self.connections.as_ref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_ref().map(|p| p.description.as_str()).filter(|d| !d.trim().is_empty())
    }

    fn profile(&self) -> Option<&CompanyProfile> {
        self.description.as_ref()
    }
}

/// Response of `GET /companies/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub example_companies: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub all_company_names: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category_options: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub chemical_group_options: Vec<String>,
}

impl Catalog for CompanyCatalog {
    fn examples(&self) -> Vec<String> {
        self.example_companies.clone()
    }
}
