//! Web front end.
//!
//! Each page request builds fresh panels, runs the search its query string
//! describes and renders the resulting view. Backend failures are part of the
//! page, so every page answers 200.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::client::ChemNetClient;
use crate::error::{PanelError, PanelResult};
use crate::formatters::html::{self, Links, routes};
use crate::models::{
    ChemicalGroup, ChemicalSearchRequest, Chemicals, Companies, CompanyCategory,
    CompanySearchRequest, ResearcherSearchRequest, Researchers, Universities, UniversityCategory,
    UniversitySearchRequest,
};
use crate::panel::{FundingPanel, SearchPanel};
use crate::views::Present;

/// Shared state for HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    pub client: ChemNetClient,
}

/// Query string of the chemical page.
#[derive(Debug, Default, Deserialize)]
pub struct ChemicalQuery {
    pub chemical: Option<String>,
    pub inchikey: Option<String>,
}

impl ChemicalQuery {
    fn request(self) -> Option<ChemicalSearchRequest> {
        let inchikey = self.inchikey;
        self.chemical.map(|chemical| ChemicalSearchRequest::new(chemical, inchikey))
    }
}

/// Query string of the funding-source page.
///
/// Filters are taken as text so a bad value is reported on the page.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    pub company: Option<String>,
    pub category: Option<String>,
    pub chemical_group: Option<String>,
    pub sep_country: Option<String>,
}

impl CompanyQuery {
    fn request(self) -> PanelResult<Option<CompanySearchRequest>> {
        let Some(company) = self.company else { return Ok(None) };
        Ok(Some(CompanySearchRequest {
            company,
            category: parse_filter::<CompanyCategory>("category", self.category)?.unwrap_or_default(),
            chemical_group: parse_filter::<ChemicalGroup>("chemical_group", self.chemical_group)?
                .unwrap_or_default(),
            sep_country: parse_flag("sep_country", self.sep_country)?,
        }))
    }
}

/// Query string of the university page.
#[derive(Debug, Default, Deserialize)]
pub struct UniversityQuery {
    pub university: Option<String>,
    pub category: Option<String>,
    pub chemical_group: Option<String>,
}

impl UniversityQuery {
    fn request(self) -> PanelResult<Option<UniversitySearchRequest>> {
        let Some(university) = self.university else { return Ok(None) };
        Ok(Some(UniversitySearchRequest {
            university,
            category: parse_filter::<UniversityCategory>("category", self.category)?
                .unwrap_or_default(),
            chemical_group: parse_filter::<ChemicalGroup>("chemical_group", self.chemical_group)?
                .unwrap_or_default(),
        }))
    }
}

/// Query string of the researcher page.
#[derive(Debug, Default, Deserialize)]
pub struct ResearcherQuery {
    pub researcher: Option<String>,
    pub selected_index: Option<String>,
    pub combine: Option<String>,
}

impl ResearcherQuery {
    fn request(self) -> PanelResult<Option<ResearcherSearchRequest>> {
        let Some(researcher) = self.researcher else { return Ok(None) };
        let request = ResearcherSearchRequest::new(researcher);
        let combine = parse_flag("combine", self.combine)?;
        let selected = parse_filter::<usize>("selected_index", self.selected_index)?;

        Ok(Some(match (combine, selected) {
            (true, _) => request.combine_all(),
            (false, Some(index)) => request.select(index),
            (false, None) => request,
        }))
    }
}

/// Parse an optional filter; an empty value counts as absent.
fn parse_filter<T>(field: &str, value: Option<String>) -> PanelResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| PanelError::validation(field, format!("invalid value {v:?}: {e}")))
        })
        .transpose()
}

/// Checkbox-style flag: absent is false, `on` (the browser default) is true.
fn parse_flag(field: &str, value: Option<String>) -> PanelResult<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("on") => Ok(true),
        Some(_) => Ok(parse_filter::<bool>(field, value)?.unwrap_or(false)),
    }
}

/// Query string of the funding page.
#[derive(Debug, Default, Deserialize)]
pub struct FundingQuery {
    pub company_name: Option<String>,
}

/// Create the HTTP router.
pub fn create_router(client: ChemNetClient) -> Router {
    let state = Arc::new(AppState { client });

    Router::new()
        .route(routes::HOME, get(home))
        .route(routes::HEALTH, get(health_check))
        .route(routes::CHEMICALS, get(chemicals_page))
        .route(routes::COMPANIES, get(companies_page))
        .route(routes::UNIVERSITIES, get(universities_page))
        .route(routes::RESEARCHERS, get(researchers_page))
        .route(routes::FUNDING, get(funding_page))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the web front end until CTRL+C.
///
/// # Errors
///
/// Returns error if the port cannot be bound or the server fails.
pub async fn serve(client: ChemNetClient, port: u16) -> anyhow::Result<()> {
    let router = create_router(client);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("HTTP server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

async fn home() -> impl IntoResponse {
    Html(html::render_home())
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "chemnet-explorer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Run the search described by `request`, or load examples when there is none.
async fn run_panel<K: Present>(
    client: &ChemNetClient,
    request: PanelResult<Option<K::Request>>,
) -> SearchPanel<K> {
    let mut panel = SearchPanel::<K>::new();
    match request {
        Ok(Some(request)) => {
            panel.search(client, request).await;
        }
        Ok(None) => panel.load_examples(client).await,
        Err(e) => panel.reject(e),
    }
    panel
}

fn render_panel<K: Present>(
    state: &AppState,
    panel: &SearchPanel<K>,
    heading: &str,
    route: &str,
    form: &str,
) -> Html<String> {
    let view = panel.view(state.client.visualization_host());
    let links = Links::for_search::<K>(route, panel.request());
    Html(html::render_search_page(heading, route, form, &view, &links))
}

async fn chemicals_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChemicalQuery>,
) -> impl IntoResponse {
    let panel = run_panel::<Chemicals>(&state.client, Ok(query.request())).await;
    let form = html::chemical_form(panel.request());
    render_panel(&state, &panel, "Chemical Search", routes::CHEMICALS, &form)
}

async fn companies_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompanyQuery>,
) -> impl IntoResponse {
    let panel = run_panel::<Companies>(&state.client, query.request()).await;
    let form = html::company_form(panel.request());
    render_panel(&state, &panel, "Funding Source Search", routes::COMPANIES, &form)
}

async fn universities_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UniversityQuery>,
) -> impl IntoResponse {
    let panel = run_panel::<Universities>(&state.client, query.request()).await;
    let form = html::university_form(panel.request());
    render_panel(&state, &panel, "University Search", routes::UNIVERSITIES, &form)
}

async fn researchers_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResearcherQuery>,
) -> impl IntoResponse {
    let panel = run_panel::<Researchers>(&state.client, query.request()).await;
    let form = html::researcher_form(panel.request());
    render_panel(&state, &panel, "Researcher Search", routes::RESEARCHERS, &form)
}

/// The list and the overlay are fetched concurrently; each lands in its own state.
async fn funding_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FundingQuery>,
) -> impl IntoResponse {
    let client = &state.client;
    let mut panel = FundingPanel::new();

    let list_token = panel.begin_load();
    let details_token = query.company_name.as_deref().and_then(|name| panel.begin_details(name).ok());
    let company = panel.selected().map(|row| row.company.clone());

    let (list, details) = futures::join!(client.get_funding_table(), async {
        match &company {
            Some(name) => Some(client.get_company_details(name).await),
            None => None,
        }
    });

    panel.complete_load(list_token, list);
    if let (Some(token), Some(outcome)) = (details_token, details) {
        panel.complete_details(token, outcome);
    }

    Html(html::render_funding_page(&panel.view(), &Links::funding()))
}
