//! University search models.

use serde::{Deserialize, Serialize};

use super::{
    Catalog, ChemicalGroup, Connections, SearchRequest, SearchResponse, UniversityCategory,
    null_as_default,
};

/// Body of `POST /universities/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversitySearchRequest {
    pub university: String,

    #[serde(default)]
    pub category: UniversityCategory,

    #[serde(default)]
    pub chemical_group: ChemicalGroup,
}

impl UniversitySearchRequest {
    /// Search with default filters.
    #[must_use]
    pub fn new(university: impl Into<String>) -> Self {
        Self { university: university.into(), ..Self::default() }
    }
}

impl SearchRequest for UniversitySearchRequest {
    fn name(&self) -> &str {
        &self.university
    }

    fn name_mut(&mut self) -> &mut String {
        &mut self.university
    }
}

/// Response of `POST /universities/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniversitySearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    #[serde(default)]
    pub university: Option<String>,

    #[serde(default)]
    pub iframe_url: Option<String>,

    #[serde(default)]
    pub connections: Option<Connections>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse for UniversitySearchResult {
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
        self.university.as_deref()
    }

    fn iframe_url(&self) -> Option<&str> {
        self.iframe_url.as_deref()
    }

    fn connections(&self) -> Option<&Connections> {
        self.connections.as_ref()
    }
}

/// Response of `GET /universities/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniversityCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub example_universities: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub all_university_names: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category_options: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub chemical_group_options: Vec<String>,
}

impl Catalog for UniversityCatalog {
    fn examples(&self) -> Vec<String> {
        self.example_universities.clone()
    }
}
