//! End-to-end panel scenarios against a mock backend.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chemnet_explorer::client::ChemNetClient;
use chemnet_explorer::config::Config;
use chemnet_explorer::error::{MALFORMED_MESSAGE, NETWORK_MESSAGE, PanelError};
use chemnet_explorer::models::{
    ChemicalSearchRequest, Chemicals, CompanyCategory, CompanySearchRequest, UniversitySearchRequest,
};
use chemnet_explorer::panel::{
    ChemicalPanel, CompanyPanel, FundingPanel, LIST_FAILED, PanelState, ResearcherPanel,
    UniversityPanel,
};
use chemnet_explorer::views::{Action, PanelView};

fn client_for(mock_server: &MockServer) -> ChemNetClient {
    ChemNetClient::new(Config::for_testing(&mock_server.uri())).unwrap()
}

fn unreachable_client() -> ChemNetClient {
    ChemNetClient::new(Config::for_testing("http://127.0.0.1:1")).unwrap()
}

fn yang_xin_matches() -> serde_json::Value {
    json!([
        {"Researcher": "Yang, Xin", "Affiliation": "MIT", "Country": "USA"},
        {"Researcher": "Yang, Xin", "Affiliation": "Tsinghua University", "Country": "China", "Department": "Chemistry"},
        {"Researcher": "Yang, Xin", "Affiliation": "ETH Zurich", "Country": "Switzerland", "Department": ""}
    ])
}

// =============================================================================
// Chemical panel
// =============================================================================

#[tokio::test]
async fn test_aspirin_renders_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chemicals/"))
        .and(body_json(json!({"chemical": "Aspirin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "chemical": "Aspirin",
            "inchikey": "BSYNRYMUTXBXSQ-UHFFFAOYSA-N",
            "description": "Aspirin is a salicylate used to reduce pain.",
            "iframe_url": "/static/networks/aspirin.html",
            "connections": {
                "Inchikey": "BSYNRYMUTXBXSQ-UHFFFAOYSA-N",
                "Funding Sources": ["NIH", "NSF"]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ChemicalPanel::new();
    panel.search(&client, ChemicalSearchRequest::new("  Aspirin  ", None)).await;

    let view = panel.view(client.visualization_host());
    let result = view.as_result().expect("result view");
    assert_eq!(result.title, "Chemical Network: Aspirin");
    assert!(result.description.as_deref().unwrap().contains("salicylate"));
    assert_eq!(result.identifier.as_deref(), Some("BSYNRYMUTXBXSQ-UHFFFAOYSA-N"));
    assert_eq!(
        result.frame.as_deref(),
        Some(format!("{}/static/networks/aspirin.html", mock_server.uri()).as_str())
    );
    assert_eq!(result.connections[1].items, ["NIH", "NSF"]);
}

#[tokio::test]
async fn test_misspelling_offers_suggestion_that_researches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chemicals/"))
        .and(body_json(json!({"chemical": "Asprin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Chemical 'Asprin' not found",
            "suggestions": ["Aspirin"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chemicals/"))
        .and(body_json(json!({"chemical": "Aspirin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "chemical": "Aspirin",
            "iframe_url": "/static/networks/aspirin.html"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ChemicalPanel::new();
    panel.search(&client, ChemicalSearchRequest::new("Asprin", None)).await;

    let view = panel.view(client.visualization_host());
    let error = view.as_error().expect("error view");
    assert_eq!(error.message, "Chemical 'Asprin' not found");
    assert_eq!(error.suggestions.len(), 1);

    let Action::Search { query } = &error.suggestions[0].action else {
        panic!("suggestion should search");
    };
    panel.select_suggestion(&client, query).await;

    let view = panel.view(client.visualization_host());
    assert_eq!(view.as_result().unwrap().title, "Chemical Network: Aspirin");
}

#[tokio::test]
async fn test_empty_query_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chemicals/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ChemicalPanel::new();
    let state = panel.search(&client, ChemicalSearchRequest::new("   ", None)).await;

    assert!(matches!(state.error(), Some(PanelError::Validation { field, .. }) if field == "chemical"));
}

#[tokio::test]
async fn test_html_payload_surfaces_as_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chemicals/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html><body>Error</body></html>", "text/html"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ChemicalPanel::new();
    panel.search(&client, ChemicalSearchRequest::new("Aspirin", None)).await;

    let err = panel.state().error().unwrap();
    assert!(matches!(err, PanelError::Server { status: None, .. }));
    assert_eq!(err.to_user_message(), MALFORMED_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = unreachable_client();
    let mut panel = ChemicalPanel::new();
    panel.search(&client, ChemicalSearchRequest::new("Aspirin", None)).await;

    let view = panel.view(client.visualization_host());
    assert_eq!(view.as_error().unwrap().message, NETWORK_MESSAGE);
}

#[tokio::test]
async fn test_status_error_without_body_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chemicals/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ChemicalPanel::new();
    panel.search(&client, ChemicalSearchRequest::new("Aspirin", None)).await;

    assert_eq!(panel.state().error().unwrap().to_user_message(), "Server error: 502");
}

#[tokio::test]
async fn test_stale_response_never_overwrites_newer() {
    let mock_server = MockServer::start().await;

    for name in ["Caffeine", "Aspirin"] {
        Mock::given(method("POST"))
            .and(path("/api/chemicals/"))
            .and(body_json(json!({"chemical": name})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "chemical": name})))
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let mut panel = ChemicalPanel::new();

    let slow = panel.begin(ChemicalSearchRequest::new("Caffeine", None)).unwrap();
    let slow_outcome = client.search::<Chemicals>(&ChemicalSearchRequest::new("Caffeine", None)).await;

    let fast = panel.begin(ChemicalSearchRequest::new("Aspirin", None)).unwrap();
    let fast_outcome = client.search::<Chemicals>(panel.request().unwrap()).await;

    assert!(panel.complete(fast, fast_outcome));
    assert!(!panel.complete(slow, slow_outcome));

    let view = panel.view(client.visualization_host());
    assert_eq!(view.as_result().unwrap().title, "Chemical Network: Aspirin");
}

#[tokio::test]
async fn test_examples_failure_leaves_list_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chemicals/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ChemicalPanel::new();
    panel.load_examples(&client).await;

    assert!(panel.examples().is_empty());
    assert!(matches!(panel.state(), PanelState::Idle));
    assert!(matches!(panel.view(client.visualization_host()), PanelView::Idle { .. }));
}

// =============================================================================
// Company and university panels
// =============================================================================

#[tokio::test]
async fn test_company_suggestion_keeps_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/companies/"))
        .and(body_json(json!({
            "company": "NIHH",
            "category": "Chemicals",
            "chemical_group": "All",
            "sep_country": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "suggestions": ["National Institutes of Health"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/companies/"))
        .and(body_json(json!({
            "company": "National Institutes of Health",
            "category": "Chemicals",
            "chemical_group": "All",
            "sep_country": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "company": "National Institutes of Health",
            "description": {"title": "NIH", "description": "US medical research agency", "url": "https://nih.gov"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = CompanyPanel::new();
    let mut request = CompanySearchRequest::new("NIHH");
    request.category = CompanyCategory::Chemicals;
    panel.search(&client, request).await;

    assert_eq!(panel.state().error().unwrap().to_user_message(), "Company not found");

    panel.select_suggestion(&client, "National Institutes of Health").await;
    let view = panel.view(client.visualization_host());
    let result = view.as_result().unwrap();
    assert_eq!(result.title, "Funding Source Network: National Institutes of Health (Chemicals)");
    assert_eq!(result.description.as_deref(), Some("US medical research agency"));
    assert_eq!(result.profile.as_ref().unwrap().url, "https://nih.gov");
}

#[tokio::test]
async fn test_university_title_uses_category() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/universities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "iframe_url": "/static/mit.html"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = UniversityPanel::new();
    panel.search(&client, UniversitySearchRequest::new("MIT")).await;

    let view = panel.view(client.visualization_host());
    assert_eq!(view.as_result().unwrap().title, "University Network: MIT (Funding Sources)");
}

// =============================================================================
// Researcher disambiguation
// =============================================================================

#[tokio::test]
async fn test_researcher_selection_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/researchers/"))
        .and(body_json(json!({"researcher": "Yang, Xin", "combine": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "needs_selection": true,
            "matches": yang_xin_matches()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/researchers/"))
        .and(body_json(json!({"researcher": "Yang, Xin", "selected_index": 1, "combine": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "researcher": "Yang, Xin",
            "iframe_url": "/static/yang_xin_1.html"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ResearcherPanel::new();
    panel.search(&client, "Yang, Xin").await;

    let view = panel.view(client.visualization_host());
    assert!(view.as_result().is_none(), "no network before a choice is made");
    let selection = view.as_selection().unwrap();
    assert_eq!(selection.candidates.len(), 3);
    assert_eq!(selection.candidates[1].action, Action::Select { index: 1 });
    assert!(selection.candidates[2].department.is_none());

    panel.select(&client, 1).await.unwrap();
    let view = panel.view(client.visualization_host());
    assert_eq!(view.as_result().unwrap().title, "Researcher Network: Yang, Xin");
}

#[tokio::test]
async fn test_researcher_combine_all() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/researchers/"))
        .and(body_json(json!({"researcher": "Yang, Xin", "combine": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "needs_selection": true,
            "matches": yang_xin_matches()
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/researchers/"))
        .and(body_json(json!({"researcher": "Yang, Xin", "combine": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "iframe_url": "/static/yang_xin_all.html"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ResearcherPanel::new();
    panel.search(&client, "Yang, Xin").await;
    panel.combine_all(&client).await.unwrap();

    let view = panel.view(client.visualization_host());
    assert_eq!(view.as_result().unwrap().title, "Researcher Network: Yang, Xin (Combined)");
}

#[tokio::test]
async fn test_researcher_out_of_range_selection_is_local() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/researchers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "needs_selection": true,
            "matches": yang_xin_matches()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = ResearcherPanel::new();
    panel.search(&client, "Yang, Xin").await;

    let err = panel.select(&client, 3).await.unwrap_err();
    assert!(matches!(err, PanelError::Validation { .. }));
    assert!(panel.view(client.visualization_host()).as_selection().is_some());
}

// =============================================================================
// Funding table
// =============================================================================

#[tokio::test]
async fn test_funding_network_failure_then_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/funding-table/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "funding_data": [
                {"company": "NSF", "count": 4, "classification": "Government"},
                {"company": "NIH", "count": 12, "classification": "Government"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut panel = FundingPanel::new();
    panel.load(&unreachable_client()).await;

    let view = panel.view();
    assert_eq!(view.error.as_deref(), Some(LIST_FAILED));
    assert_eq!(view.retry, Some(Action::Retry));

    panel.retry(&client_for(&mock_server)).await;
    let view = panel.view();
    assert!(view.error.is_none());
    assert!(view.retry.is_none());
    let order: Vec<_> = view.cards.iter().map(|c| c.company.as_str()).collect();
    assert_eq!(order, ["NIH", "NSF"]);
}

#[tokio::test]
async fn test_funding_details_overlay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/funding-table/"))
        .and(query_param("company_name", "NIH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "company_name": "NIH",
            "top_chemicals": [["Aspirin", 5]],
            "top_affiliations": ["Harvard University"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut panel = FundingPanel::new();
    panel.open_details(&client, "NIH").await.unwrap();

    let overlay = panel.view().details.unwrap();
    assert!(!overlay.loading);
    assert_eq!(overlay.top_affiliations, vec!["Harvard University".to_string()]);

    panel.close_details();
    assert!(panel.view().details.is_none());
}
