//! Data models for the ChemNet REST API.
//!
//! Field names follow the backend's snake_case JSON. Everything except the
//! request name is optional on the wire and defaults when missing or `null`.

mod chemical;
mod company;
mod enums;
mod funding;
mod researcher;
mod university;

pub use chemical::{ChemicalCatalog, ChemicalSearchRequest, ChemicalSearchResult, ExampleChemical};
pub use company::{CompanyCatalog, CompanyProfile, CompanySearchRequest, CompanySearchResult};
pub use enums::{ChemicalGroup, Classification, CompanyCategory, ResponseFormat, UniversityCategory};
pub use funding::{CompanyDetails, FundingRow, FundingTable};
pub use researcher::{
    ResearcherCatalog, ResearcherMatch, ResearcherSearchRequest, ResearcherSearchResult,
};
pub use university::{UniversityCatalog, UniversitySearchRequest, UniversitySearchResult};

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Open-ended relationship map returned for display, kept in wire order.
pub type Connections = serde_json::Map<String, serde_json::Value>;

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A search request body: a free-text name plus entity-specific filters.
pub trait SearchRequest: Clone + Default + Debug + Serialize + Send + Sync {
    /// The searched name.
    fn name(&self) -> &str;

    /// Mutable access to the searched name.
    fn name_mut(&mut self) -> &mut String;

    /// Same filters, different name (used when a suggestion is picked).
    #[must_use]
    fn with_name(&self, name: &str) -> Self {
        let mut next = self.clone();
        *next.name_mut() = name.to_string();
        next
    }
}

/// Common shape of every search response.
pub trait SearchResponse {
    /// Whether the backend found the entity.
    fn is_success(&self) -> bool;

    /// Backend explanation, usually present when `success` is false.
    fn message(&self) -> Option<&str>;

    /// Alternate queries offered on a miss.
    fn suggestions(&self) -> &[String];

    /// Canonical entity name as resolved by the backend.
    fn display_name(&self) -> Option<&str>;

    /// Relative path of the rendered visualization.
    fn iframe_url(&self) -> Option<&str>;

    /// Relationship map.
    fn connections(&self) -> Option<&Connections>;

    /// Free-text description of the entity.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Secondary identifier shown under the description.
    fn identifier(&self) -> Option<&str> {
        None
    }

    /// Profile card (funding sources only).
    fn profile(&self) -> Option<&CompanyProfile> {
        None
    }
}

/// Example listings returned by the GET side of a search endpoint.
pub trait Catalog: Default + DeserializeOwned {
    /// Example names to offer as one-click searches.
    fn examples(&self) -> Vec<String>;
}

/// Binds a search endpoint to its request, response and listing types.
pub trait SearchKind: Send + Sync + 'static {
    /// POST body.
    type Request: SearchRequest;
    /// POST response.
    type Response: SearchResponse + DeserializeOwned + Clone + Debug + Send;
    /// GET response.
    type Catalog: Catalog + Send;

    /// Resource path under the API root.
    const PATH: &'static str;
    /// Field name used in validation messages and query strings.
    const FIELD: &'static str;
    /// Message shown when the backend misses without explanation.
    const NOT_FOUND: &'static str;

    /// Title of the result view.
    fn title(request: &Self::Request, response: &Self::Response) -> String;
}

/// Chemical search endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chemicals;

/// Funding-source (company) search endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Companies;

/// University search endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Universities;

/// Researcher search endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Researchers;

fn resolved_name<'a, R: SearchResponse>(response: &'a R, request_name: &'a str) -> &'a str {
    response.display_name().filter(|n| !n.trim().is_empty()).unwrap_or(request_name)
}

impl SearchKind for Chemicals {
    type Request = ChemicalSearchRequest;
    type Response = ChemicalSearchResult;
    type Catalog = ChemicalCatalog;

    const PATH: &'static str = crate::config::paths::CHEMICALS;
    const FIELD: &'static str = "chemical";
    const NOT_FOUND: &'static str = "Chemical not found";

    fn title(request: &Self::Request, response: &Self::Response) -> String {
        format!("Chemical Network: {}", resolved_name(response, &request.chemical))
    }
}

impl SearchKind for Companies {
    type Request = CompanySearchRequest;
    type Response = CompanySearchResult;
    type Catalog = CompanyCatalog;

    const PATH: &'static str = crate::config::paths::COMPANIES;
    const FIELD: &'static str = "company";
    const NOT_FOUND: &'static str = "Company not found";

    fn title(request: &Self::Request, response: &Self::Response) -> String {
        format!(
            "Funding Source Network: {} ({})",
            resolved_name(response, &request.company),
            request.category
        )
    }
}

impl SearchKind for Universities {
    type Request = UniversitySearchRequest;
    type Response = UniversitySearchResult;
    type Catalog = UniversityCatalog;

    const PATH: &'static str = crate::config::paths::UNIVERSITIES;
    const FIELD: &'static str = "university";
    const NOT_FOUND: &'static str = "University not found";

    fn title(request: &Self::Request, response: &Self::Response) -> String {
        format!(
            "University Network: {} ({})",
            resolved_name(response, &request.university),
            request.category
        )
    }
}

impl SearchKind for Researchers {
    type Request = ResearcherSearchRequest;
    type Response = ResearcherSearchResult;
    type Catalog = ResearcherCatalog;

    const PATH: &'static str = crate::config::paths::RESEARCHERS;
    const FIELD: &'static str = "researcher";
    const NOT_FOUND: &'static str = "Researcher not found";

    fn title(request: &Self::Request, response: &Self::Response) -> String {
        let suffix = if request.combine { " (Combined)" } else { "" };
        format!("Researcher Network: {}{}", resolved_name(response, &request.researcher), suffix)
    }
}
