//! Chemical search models.

use serde::{Deserialize, Serialize};

use super::{Catalog, Connections, SearchRequest, SearchResponse, null_as_default};

/// Sentinel the backend puts in `inchikey` when the lookup failed.
const INCHIKEY_ERROR: &str = "Error";

/// Body of `POST /chemicals/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalSearchRequest {
    /// Chemical name.
    pub chemical: String,

    /// InChIKey for a more precise match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inchikey: Option<String>,
}

impl ChemicalSearchRequest {
    /// Search by name; an empty InChIKey counts as absent.
    #[must_use]
    pub fn new(chemical: impl Into<String>, inchikey: Option<String>) -> Self {
        let inchikey = inchikey.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
        Self { chemical: chemical.into(), inchikey }
    }
}

impl SearchRequest for ChemicalSearchRequest {
    fn name(&self) -> &str {
        &self.chemical
    }

    fn name_mut(&mut self) -> &mut String {
        &mut self.chemical
    }
}

/// Response of `POST /chemicals/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChemicalSearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// Resolved chemical name.
    #[serde(default)]
    pub chemical: Option<String>,

    /// InChIKey of the resolved chemical.
    #[serde(default)]
    pub inchikey: Option<String>,

    /// PubChem description.
    #[serde(default)]
    pub description: Option<String>,

    /// Relative path of the rendered network.
    #[serde(default)]
    pub iframe_url: Option<String>,

    #[serde(default)]
    pub connections: Option<Connections>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse for ChemicalSearchResult {
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
        self.chemical.as_deref()
    }

    fn iframe_url(&self) -> Option<&str> {
        self.iframe_url.as_deref()
    }

    fn connections(&self) -> Option<&Connections> {
        self.connections.as_ref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    fn identifier(&self) -> Option<&str> {
        self.inchikey.as_deref().filter(|k| !k.is_empty() && *k != INCHIKEY_ERROR)
    }
}

/// Example chemical with its identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleChemical {
    pub name: String,
    #[serde(default)]
    pub inchikey: Option<String>,
}

/// Response of `GET /chemicals/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChemicalCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub example_chemicals: Vec<ExampleChemical>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub all_chemical_names: Vec<String>,
}

impl Catalog for ChemicalCatalog {
    fn examples(&self) -> Vec<String> {
        self.example_chemicals.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_missing_inchikey() {
        let req = ChemicalSearchRequest::new("Aspirin", Some("  ".into()));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"chemical": "Aspirin"}));
    }

    #[test]
    fn test_error_inchikey_is_hidden() {
        let result: ChemicalSearchResult = serde_json::from_value(serde_json::json!({
            "success": true,
            "chemical": "Aspirin",
            "inchikey": "Error"
        }))
        .unwrap();
        assert_eq!(result.identifier(), None);
    }

    #[test]
    fn test_null_suggestions_default_to_empty() {
        let result: ChemicalSearchResult = serde_json::from_value(serde_json::json!({
            "success": false,
            "suggestions": null
        }))
        .unwrap();
        assert!(result.suggestions.is_empty());
    }
}
