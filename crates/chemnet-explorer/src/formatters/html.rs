//! HTML pages for the web front end.
//!
//! Every interpolated string goes through [`html_escape`]. Clickable elements
//! are plain links whose query string performs the [`Action`] they carry, so
//! the pages work without scripting.

use serde::Serialize;
use url::form_urlencoded;

use crate::models::{
    ChemicalGroup, ChemicalSearchRequest, CompanyCategory, CompanySearchRequest,
    ResearcherSearchRequest, SearchKind, SearchRequest, UniversityCategory,
    UniversitySearchRequest,
};
use crate::views::{
    Action, Choice, DetailsView, ErrorView, FundingCard, FundingView, PanelView, ResultView,
    SelectionView,
};

/// Page routes of the web front end.
pub mod routes {
    pub const HOME: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const CHEMICALS: &str = "/chemicals";
    pub const COMPANIES: &str = "/companies";
    pub const UNIVERSITIES: &str = "/universities";
    pub const RESEARCHERS: &str = "/researchers";
    pub const FUNDING: &str = "/funding";
}

const NAV: [(&str, &str); 5] = [
    (routes::CHEMICALS, "Chemicals"),
    (routes::COMPANIES, "Funding Sources"),
    (routes::UNIVERSITIES, "Universities"),
    (routes::RESEARCHERS, "Researchers"),
    (routes::FUNDING, "Funding Table"),
];

const STYLE: &str = r"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; margin: 0; color: #333; }
nav { background: #1f3a5f; padding: 12px 24px; }
nav a { color: #dfe8f3; margin-right: 18px; text-decoration: none; font-size: 14px; }
nav a.active, nav a:hover { color: #fff; font-weight: 600; }
main { max-width: 1100px; margin: 24px auto; padding: 0 16px; }
form.search { background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); padding: 16px; display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; }
label { display: block; font-size: 13px; font-weight: 500; margin-bottom: 4px; }
input[type=text], select { padding: 8px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px; }
button, a.button { padding: 8px 16px; background: #4a90d9; color: #fff; border: none; border-radius: 4px; font-size: 14px; cursor: pointer; text-decoration: none; display: inline-block; }
a.chip { display: inline-block; padding: 4px 10px; margin: 4px; border-radius: 12px; background: #e3edf8; color: #1f3a5f; text-decoration: none; font-size: 13px; }
.error { background: #fee; border: 1px solid #c00; color: #c00; padding: 10px; border-radius: 4px; margin: 16px 0; }
.notice { background: #eef5ff; border: 1px solid #9ab; color: #234; padding: 10px; border-radius: 4px; margin: 16px 0; }
.result, .selection { background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); padding: 16px; margin-top: 16px; }
iframe.network { width: 100%; height: 640px; border: 1px solid #ddd; border-radius: 4px; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px; margin-top: 16px; }
.card { background: #fff; border-radius: 8px; padding: 12px; text-decoration: none; color: #333; box-shadow: 0 1px 4px rgba(0,0,0,0.1); display: flex; flex-direction: column; gap: 6px; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 12px; width: fit-content; }
.badge-government { background: #ef4444; color: #fff; }
.badge-university { background: #4ade80; color: #000; }
.badge-foundation { background: #14b8a6; color: #fff; }
.badge-company { background: #fde047; color: #000; }
.badge-unknown { background: #e9d5ff; color: #000; }
.overlay { position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; }
.modal { background: #fff; border-radius: 8px; padding: 24px; max-width: 640px; width: 100%; max-height: 80vh; overflow-y: auto; }
";

/// Builds the URL that performs an [`Action`] on a given page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    route: String,
    field: String,
    name: String,
    /// Filters kept when a new name is searched.
    filters: Vec<(String, String)>,
}

impl Links {
    /// Links for a search page, keeping the filters of `request`.
    #[must_use]
    pub fn for_search<K: SearchKind>(route: &str, request: Option<&K::Request>) -> Self {
        let request = request.cloned().unwrap_or_default();
        let filters = query_pairs(&request.with_name(""))
            .into_iter()
            .filter(|(key, _)| key != K::FIELD)
            .collect();

        Self {
            route: route.to_string(),
            field: K::FIELD.to_string(),
            name: request.name().to_string(),
            filters,
        }
    }

    /// Links for the funding table page.
    #[must_use]
    pub fn funding() -> Self {
        Self {
            route: routes::FUNDING.to_string(),
            field: "company_name".to_string(),
            name: String::new(),
            filters: Vec::new(),
        }
    }

    /// URL that performs `action`.
    #[must_use]
    pub fn href(&self, action: &Action) -> String {
        match action {
            Action::Search { query } => {
                let mut pairs = vec![(self.field.clone(), query.clone())];
                pairs.extend(self.filters.iter().cloned());
                with_query(&self.route, &pairs)
            }
            Action::Select { index } => with_query(
                &self.route,
                &[
                    (self.field.clone(), self.name.clone()),
                    ("selected_index".to_string(), index.to_string()),
                ],
            ),
            Action::CombineAll => with_query(
                &self.route,
                &[
                    (self.field.clone(), self.name.clone()),
                    ("combine".to_string(), "true".to_string()),
                ],
            ),
            Action::Retry | Action::CloseDetails => routes::FUNDING.to_string(),
            Action::OpenDetails { company } => {
                with_query(routes::FUNDING, &[("company_name".to_string(), company.clone())])
            }
            Action::ViewFullNetwork { company } => {
                with_query(routes::COMPANIES, &[("company".to_string(), company.clone())])
            }
        }
    }
}

/// Flatten the scalar fields of a request into query pairs.
fn query_pairs<T: Serialize>(value: &T) -> Vec<(String, String)> {
    let Ok(serde_json::Value::Object(map)) = serde_json::to_value(value) else {
        return Vec::new();
    };

    map.into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            serde_json::Value::Number(n) => Some((key, n.to_string())),
            serde_json::Value::Bool(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect()
}

fn with_query(route: &str, pairs: &[(String, String)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish();
    format!("{route}?{query}")
}

/// Wrap `body` in the shared page layout.
#[must_use]
pub fn render_page(title: &str, active: &str, body: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(route, label)| {
            let class = if *route == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{route}"{class}>{label}</a>"#)
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title} - ChemNet Explorer</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="{home}"><strong>ChemNet</strong></a>{nav}</nav>
<main>
{body}
</main>
</body>
</html>"#,
        title = html_escape(title),
        home = routes::HOME,
    )
}

/// Landing page linking every panel.
#[must_use]
pub fn render_home() -> String {
    let items: String = NAV
        .iter()
        .map(|(route, label)| format!(r#"<li><a href="{route}">{label}</a></li>"#))
        .collect();

    let body = format!(
        "<h1>ChemNet Explorer</h1>\n\
         <p>Explore networks of chemicals, funding sources, universities and researchers.</p>\n\
         <ul>{items}</ul>"
    );
    render_page("Home", routes::HOME, &body)
}

/// A search page: the form followed by the panel view.
#[must_use]
pub fn render_search_page(
    heading: &str,
    route: &str,
    form: &str,
    view: &PanelView,
    links: &Links,
) -> String {
    let body = format!("<h1>{}</h1>\n{form}\n{}", html_escape(heading), render_panel_view(view, links));
    render_page(heading, route, &body)
}

/// Body markup of a panel view.
#[must_use]
pub fn render_panel_view(view: &PanelView, links: &Links) -> String {
    match view {
        PanelView::Idle { examples } => render_examples(examples, links),
        PanelView::Loading => r#"<p class="loading">Loading...</p>"#.to_string(),
        PanelView::Result(result) => render_result(result),
        PanelView::Selection(selection) => render_selection(selection, links),
        PanelView::Error(error) => render_error(error, links),
    }
}

fn render_examples(examples: &[Choice], links: &Links) -> String {
    if examples.is_empty() {
        return String::new();
    }
    format!(
        r#"<section class="examples"><h2>Examples</h2><div>{}</div></section>"#,
        render_chips(examples, links)
    )
}

fn render_chips(choices: &[Choice], links: &Links) -> String {
    choices
        .iter()
        .map(|choice| {
            format!(
                r#"<a class="chip" href="{}">{}</a>"#,
                html_escape(&links.href(&choice.action)),
                html_escape(&choice.label)
            )
        })
        .collect()
}

fn render_result(result: &ResultView) -> String {
    let mut html = format!(r#"<article class="result"><h2>{}</h2>"#, html_escape(&result.title));

    if let Some(profile) = &result.profile {
        if let Some(thumbnail) = &profile.thumbnail {
            html.push_str(&format!(
                r#"<img class="thumbnail" src="{}" alt="{}" width="96">"#,
                html_escape(thumbnail),
                html_escape(&profile.title)
            ));
        }
        if !profile.url.is_empty() {
            let title = if profile.title.is_empty() { &profile.url } else { &profile.title };
            html.push_str(&format!(
                r#"<p class="profile"><a href="{}" rel="noopener" target="_blank">{}</a></p>"#,
                html_escape(&profile.url),
                html_escape(title)
            ));
        }
    }

    if let Some(description) = &result.description {
        html.push_str(&format!(r#"<p class="description">{}</p>"#, html_escape(description)));
    }

    if let Some(identifier) = &result.identifier {
        html.push_str(&format!(r#"<p class="identifier"><code>{}</code></p>"#, html_escape(identifier)));
    }

    if let Some(frame) = &result.frame {
        html.push_str(&format!(
            r#"<iframe class="network" src="{}" title="{}" loading="lazy"></iframe>"#,
            html_escape(frame),
            html_escape(&result.title)
        ));
    }

    if !result.connections.is_empty() {
        html.push_str(r#"<section class="connections"><h3>Connections</h3>"#);
        for group in &result.connections {
            html.push_str(&format!("<h4>{}</h4><ul>", html_escape(&group.label)));
            for item in &group.items {
                html.push_str(&format!("<li>{}</li>", html_escape(item)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</section>");
    }

    html.push_str("</article>");
    html
}

fn render_selection(selection: &SelectionView, links: &Links) -> String {
    let mut html = format!(
        r#"<section class="selection"><h2>Multiple researchers match &quot;{}&quot;</h2><ol start="0">"#,
        html_escape(&selection.query)
    );

    for candidate in &selection.candidates {
        let mut details = format!(
            "{}, {}",
            html_escape(&candidate.affiliation),
            html_escape(&candidate.country)
        );
        if let Some(department) = &candidate.department {
            details.push_str(&format!(" ({})", html_escape(department)));
        }
        let class = if candidate.selected { r#" class="selected""# } else { "" };
        html.push_str(&format!(
            r#"<li{class}><a href="{}">{}</a> {details}</li>"#,
            html_escape(&links.href(&candidate.action)),
            html_escape(&candidate.name)
        ));
    }

    html.push_str(&format!(
        r#"</ol><a class="button" href="{}">Combine all</a></section>"#,
        html_escape(&links.href(&selection.combine))
    ));
    html
}

fn render_error(error: &ErrorView, links: &Links) -> String {
    let mut html = format!(r#"<div class="error" role="alert">{}</div>"#, html_escape(&error.message));
    if !error.suggestions.is_empty() {
        html.push_str(&format!(
            r#"<section class="suggestions"><p>Did you mean:</p>{}</section>"#,
            render_chips(&error.suggestions, links)
        ));
    }
    html
}

/// The funding table page, with the detail overlay when one is open.
#[must_use]
pub fn render_funding_page(view: &FundingView, links: &Links) -> String {
    let mut body = String::from("<h1>Top Funding Sources</h1>");

    if view.loading {
        body.push_str(r#"<p class="loading">Loading...</p>"#);
    }
    if let Some(notice) = &view.notice {
        body.push_str(&format!(r#"<div class="notice">{}</div>"#, html_escape(notice)));
    }
    if let Some(error) = &view.error {
        body.push_str(&format!(r#"<div class="error" role="alert">{}</div>"#, html_escape(error)));
    }

    if !view.cards.is_empty() {
        body.push_str(r#"<div class="grid">"#);
        for card in &view.cards {
            body.push_str(&render_card(card, links));
        }
        body.push_str("</div>");
    }

    if let Some(retry) = &view.retry {
        body.push_str(&format!(
            r#"<p>No funding data to show.</p><a class="button" href="{}">Retry</a>"#,
            html_escape(&links.href(retry))
        ));
    }

    if let Some(details) = &view.details {
        body.push_str(&render_details(details, links));
    }

    render_page("Funding Table", routes::FUNDING, &body)
}

fn render_card(card: &FundingCard, links: &Links) -> String {
    let slug = card.classification.slug();
    format!(
        r#"<a class="card card-{slug}" href="{href}" title="{company}"><strong>{label}</strong><span class="badge badge-{slug}">{classification}</span><span class="count">{count} studies</span></a>"#,
        href = html_escape(&links.href(&card.action)),
        company = html_escape(&card.company),
        label = html_escape(&card.label),
        classification = card.classification,
        count = card.count,
    )
}

fn render_details(details: &DetailsView, links: &Links) -> String {
    let slug = details.classification.slug();
    let mut html = format!(
        r#"<div class="overlay"><div class="modal"><h2>{}</h2><p><span class="badge badge-{slug}">{}</span> {} studies</p>"#,
        html_escape(&details.company),
        details.classification,
        details.count
    );

    if details.loading {
        html.push_str(r#"<p class="loading">Loading details...</p>"#);
    } else if let Some(error) = &details.error {
        html.push_str(&format!(r#"<div class="error" role="alert">{}</div>"#, html_escape(error)));
    } else {
        html.push_str("<h3>Top Chemicals</h3><ul>");
        for (name, count) in &details.top_chemicals {
            html.push_str(&format!("<li>{} ({count} studies)</li>", html_escape(name)));
        }
        html.push_str("</ul><h3>Top Affiliations</h3><ul>");
        for affiliation in &details.top_affiliations {
            html.push_str(&format!("<li>{}</li>", html_escape(affiliation)));
        }
        html.push_str("</ul>");
    }

    html.push_str(&format!(
        r#"<p><a class="button" href="{}">View full network</a> <a href="{}">Close</a></p></div></div>"#,
        html_escape(&links.href(&details.full_network)),
        html_escape(&links.href(&details.close))
    ));
    html
}

fn text_input(name: &str, label: &str, value: &str, placeholder: &str) -> String {
    format!(
        r#"<div><label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{}" placeholder="{placeholder}"></div>"#,
        html_escape(value)
    )
}

fn select_input(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let mark = if *option == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{mark}>{0}</option>"#, html_escape(option))
        })
        .collect();
    format!(r#"<div><label for="{name}">{label}</label><select id="{name}" name="{name}">{options}</select></div>"#)
}

fn search_form(route: &str, fields: &str) -> String {
    format!(r#"<form class="search" method="get" action="{route}">{fields}<button type="submit">Search</button></form>"#)
}

/// Chemical search form.
#[must_use]
pub fn chemical_form(request: Option<&ChemicalSearchRequest>) -> String {
    let name = request.map_or("", |r| r.chemical.as_str());
    let inchikey = request.and_then(|r| r.inchikey.as_deref()).unwrap_or_default();
    let fields = format!(
        "{}{}",
        text_input("chemical", "Chemical", name, "e.g. Aspirin"),
        text_input("inchikey", "InChIKey (optional)", inchikey, "BSYNRYMUTXBXSQ-UHFFFAOYSA-N")
    );
    search_form(routes::CHEMICALS, &fields)
}

/// Funding-source search form.
#[must_use]
pub fn company_form(request: Option<&CompanySearchRequest>) -> String {
    let request = request.cloned().unwrap_or_default();
    let categories: Vec<&str> = CompanyCategory::ALL.iter().map(|c| c.as_str()).collect();
    let groups: Vec<&str> = ChemicalGroup::ALL.iter().map(|g| g.as_str()).collect();
    let checked = if request.sep_country { " checked" } else { "" };

    let fields = format!(
        r#"{}{}{}<div><label><input type="checkbox" name="sep_country" value="true"{checked}> Separate by country</label></div>"#,
        text_input("company", "Funding source", &request.company, "e.g. National Institutes of Health"),
        select_input("category", "Category", &categories, request.category.as_str()),
        select_input("chemical_group", "Chemical group", &groups, request.chemical_group.as_str()),
    );
    search_form(routes::COMPANIES, &fields)
}

/// University search form.
#[must_use]
pub fn university_form(request: Option<&UniversitySearchRequest>) -> String {
    let request = request.cloned().unwrap_or_default();
    let categories: Vec<&str> = UniversityCategory::ALL.iter().map(|c| c.as_str()).collect();
    let groups: Vec<&str> = ChemicalGroup::ALL.iter().map(|g| g.as_str()).collect();

    let fields = format!(
        "{}{}{}",
        text_input("university", "University", &request.university, "e.g. Harvard University"),
        select_input("category", "Category", &categories, request.category.as_str()),
        select_input("chemical_group", "Chemical group", &groups, request.chemical_group.as_str()),
    );
    search_form(routes::UNIVERSITIES, &fields)
}

/// Researcher search form.
#[must_use]
pub fn researcher_form(request: Option<&ResearcherSearchRequest>) -> String {
    let name = request.map_or("", |r| r.researcher.as_str());
    search_form(routes::RESEARCHERS, &text_input("researcher", "Researcher", name, "Last, First"))
}

/// Escape HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
