//! View models built from panel state.
//!
//! Views are plain data: every clickable element carries the [`Action`] it
//! triggers, so the Markdown, JSON and HTML renderers all expose the same
//! interactions.

mod funding;

pub use funding::{DetailsView, FundingCard, FundingView, NAME_DISPLAY_LIMIT, truncate_name};

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::PanelError;
use crate::models::{
    Chemicals, Companies, CompanyProfile, Connections, Researchers, SearchKind, SearchResponse,
    Universities,
};

/// Connection keys whose value is always shown as a single item.
const SINGLE_VALUE_KEYS: [&str; 2] = ["Inchikey", "Affiliation(s)"];

/// Something the user can activate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Run a search for exactly this string.
    Search { query: String },
    /// Pick one ambiguous researcher match.
    Select { index: usize },
    /// Merge every ambiguous researcher match.
    CombineAll,
    /// Re-issue the funding list fetch.
    Retry,
    /// Open the detail overlay of a funding source.
    OpenDetails { company: String },
    /// Close the detail overlay.
    CloseDetails,
    /// Open the funding-source network of a company.
    ViewFullNetwork { company: String },
}

/// A labelled [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub action: Action,
}

impl Choice {
    /// A choice that searches for its own label.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        let query = query.into();
        Self { label: query.clone(), action: Action::Search { query } }
    }
}

/// One key of the connections map with its rendered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionGroup {
    pub label: String,
    pub items: Vec<String>,
}

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<CompanyProfile>,
    /// Absolute URL of the embedded visualization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    pub connections: Vec<ConnectionGroup>,
}

/// A failed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub message: String,
    pub suggestions: Vec<Choice>,
}

/// One record of an ambiguous researcher name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub index: usize,
    pub name: String,
    pub affiliation: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub selected: bool,
    pub action: Action,
}

/// Disambiguation list shown instead of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    pub query: String,
    pub candidates: Vec<Candidate>,
    pub combine: Action,
}

/// Everything a search panel can display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelView {
    Idle { examples: Vec<Choice> },
    Loading,
    Result(ResultView),
    Selection(SelectionView),
    Error(ErrorView),
}

impl PanelView {
    /// The result, if this view shows one.
    #[must_use]
    pub const fn as_result(&self) -> Option<&ResultView> {
        match self {
            Self::Result(r) => Some(r),
            _ => None,
        }
    }

    /// The error, if this view shows one.
    #[must_use]
    pub const fn as_error(&self) -> Option<&ErrorView> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// The selection list, if this view shows one.
    #[must_use]
    pub const fn as_selection(&self) -> Option<&SelectionView> {
        match self {
            Self::Selection(s) => Some(s),
            _ => None,
        }
    }
}

/// Per-endpoint presentation hooks.
pub trait Present: SearchKind {
    /// Selection list to show instead of a network, when the response is ambiguous.
    fn selection(_request: &Self::Request, _response: &Self::Response) -> Option<SelectionView> {
        None
    }
}

impl Present for Chemicals {}
impl Present for Companies {}
impl Present for Universities {}

impl Present for Researchers {
    fn selection(request: &Self::Request, response: &Self::Response) -> Option<SelectionView> {
        if !response.requires_selection() {
            return None;
        }

        let candidates = response
            .matches
            .iter()
            .enumerate()
            .map(|(index, m)| Candidate {
                index,
                name: m.researcher.clone(),
                affiliation: m.affiliation.clone(),
                country: m.country.clone(),
                department: m.department.clone().filter(|d| !d.trim().is_empty()),
                selected: request.selected_index == Some(index),
                action: Action::Select { index },
            })
            .collect();

        Some(SelectionView {
            query: request.researcher.clone(),
            candidates,
            combine: Action::CombineAll,
        })
    }
}

/// Build the view of a successful response.
#[must_use]
pub fn result_view<K: SearchKind>(
    request: &K::Request,
    response: &K::Response,
    host: &Url,
) -> ResultView {
    ResultView {
        title: K::title(request, response),
        description: response.description().map(str::to_string),
        identifier: response.identifier().map(str::to_string),
        profile: response.profile().cloned(),
        frame: response.iframe_url().and_then(|p| frame_url(host, p)).map(String::from),
        connections: connection_groups(response.connections()),
    }
}

/// Build the view of a failed search.
#[must_use]
pub fn error_view(error: &PanelError) -> ErrorView {
    ErrorView {
        message: error.to_user_message(),
        suggestions: error.suggestions().iter().map(Choice::search).collect(),
    }
}

/// Resolve a relative visualization path against the visualization host.
///
/// The path is appended to the host as-is, so the frame always stays on the
/// visualization host even when the backend hands out an absolute URL.
#[must_use]
pub fn frame_url(host: &Url, iframe_url: &str) -> Option<Url> {
    let path = iframe_url.trim();
    if path.is_empty() {
        return None;
    }

    let joined = format!(
        "{}/{}",
        host.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).ok()
}

/// Flatten the connections map into labelled item lists, in wire order.
///
/// Groups whose value is `null` are dropped.
#[must_use]
pub fn connection_groups(connections: Option<&Connections>) -> Vec<ConnectionGroup> {
    connections
        .into_iter()
        .flatten()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| ConnectionGroup {
            label: key.clone(),
            items: connection_items(key, value),
        })
        .collect()
}

fn connection_items(key: &str, value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        _ if SINGLE_VALUE_KEYS.contains(&key) => vec![inline(value)],
        Value::Array(items) => items.iter().map(inline).collect(),
        other => vec![other.to_string()],
    }
}

/// Strings verbatim, arrays as a comma list, anything else as compact JSON.
fn inline(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(inline).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
