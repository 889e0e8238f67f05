//! Markdown output formatting.

use crate::views::{
    Candidate, DetailsView, ErrorView, FundingCard, FundingView, PanelView, ResultView,
    SelectionView,
};

/// Format any panel view as Markdown.
#[must_use]
pub fn format_panel_markdown(view: &PanelView) -> String {
    match view {
        PanelView::Idle { examples } => {
            let names: Vec<String> = examples.iter().map(|c| c.label.clone()).collect();
            format_examples_markdown(&names)
        }
        PanelView::Loading => "Loading...".to_string(),
        PanelView::Result(result) => format_result_markdown(result),
        PanelView::Selection(selection) => format_selection_markdown(selection),
        PanelView::Error(error) => format_error_markdown(error),
    }
}

/// Format example names as Markdown.
#[must_use]
pub fn format_examples_markdown(examples: &[String]) -> String {
    if examples.is_empty() {
        return "No examples available.".to_string();
    }

    let mut output = format!("# Examples ({})\n\n", examples.len());
    for name in examples {
        output.push_str(&format!("- {name}\n"));
    }
    output
}

/// Format a network result as Markdown.
#[must_use]
pub fn format_result_markdown(result: &ResultView) -> String {
    let mut output = format!("# {}\n\n", result.title);

    if let Some(description) = &result.description {
        output.push_str(&format!("{description}\n\n"));
    }

    if let Some(identifier) = &result.identifier {
        output.push_str(&format!("**Identifier**: `{identifier}`\n\n"));
    }

    if let Some(profile) = &result.profile {
        if !profile.url.is_empty() {
            let title = if profile.title.is_empty() { &profile.url } else { &profile.title };
            output.push_str(&format!("**Profile**: [{title}]({})\n\n", profile.url));
        }
    }

    if let Some(frame) = &result.frame {
        output.push_str(&format!("**Network**: [Open visualization]({frame})\n\n"));
    }

    if !result.connections.is_empty() {
        output.push_str("## Connections\n\n");
        for group in &result.connections {
            output.push_str(&format!("### {}\n\n", group.label));
            if group.items.is_empty() {
                output.push_str("_none_\n\n");
                continue;
            }
            for item in &group.items {
                output.push_str(&format!("- {item}\n"));
            }
            output.push('\n');
        }
    }

    output
}

/// Format a researcher disambiguation list as Markdown.
#[must_use]
pub fn format_selection_markdown(selection: &SelectionView) -> String {
    let mut output = format!(
        "# Multiple researchers match \"{}\" ({} results)\n\n",
        selection.query,
        selection.candidates.len()
    );

    for candidate in &selection.candidates {
        output.push_str(&format_candidate_markdown(candidate));
    }

    output.push_str("\nPick one with `--select <INDEX>` or merge them with `--combine`.\n");
    output
}

fn format_candidate_markdown(candidate: &Candidate) -> String {
    let mut line = format!(
        "- **[{}]** {} | {} | {}",
        candidate.index, candidate.name, candidate.affiliation, candidate.country
    );
    if let Some(department) = &candidate.department {
        line.push_str(&format!(" | {department}"));
    }
    if candidate.selected {
        line.push_str(" (selected)");
    }
    line.push('\n');
    line
}

/// Format a failed search as Markdown.
#[must_use]
pub fn format_error_markdown(error: &ErrorView) -> String {
    let mut output = format!("**Error**: {}\n", error.message);

    if !error.suggestions.is_empty() {
        output.push_str("\nDid you mean:\n\n");
        for suggestion in &error.suggestions {
            output.push_str(&format!("- {}\n", suggestion.label));
        }
    }

    output
}

/// Format the funding table, with its detail overlay when open.
#[must_use]
pub fn format_funding_markdown(view: &FundingView) -> String {
    if view.loading {
        return "Loading...".to_string();
    }

    let mut output = String::new();

    if let Some(error) = &view.error {
        output.push_str(&format!("**Error**: {error}\n\n"));
    }

    if view.cards.is_empty() {
        output.push_str("No funding sources found.\n");
    } else {
        output.push_str(&format!("# Top Funding Sources ({} results)\n\n", view.cards.len()));
        if let Some(notice) = &view.notice {
            output.push_str(&format!("> {notice}\n\n"));
        }
        output.push_str("| # | Funding source | Classification | Studies |\n");
        output.push_str("|---|---|---|---|\n");
        for (i, card) in view.cards.iter().enumerate() {
            output.push_str(&format_card_row(card, i + 1));
        }
    }

    if view.retry.is_some() {
        output.push_str("\nRun the command again to retry.\n");
    }

    if let Some(details) = &view.details {
        output.push_str("\n---\n\n");
        output.push_str(&format_details_markdown(details));
    }

    output
}

fn format_card_row(card: &FundingCard, rank: usize) -> String {
    format!("| {} | {} | {} | {} studies |\n", rank, card.label, card.classification, card.count)
}

/// Format the detail overlay of one funding source.
#[must_use]
pub fn format_details_markdown(details: &DetailsView) -> String {
    let mut output = format!("## {}\n\n", details.company);
    output.push_str(&format!(
        "**Classification**: {} | **Studies**: {}\n\n",
        details.classification, details.count
    ));

    if details.loading {
        output.push_str("Loading details...\n");
        return output;
    }

    if let Some(error) = &details.error {
        output.push_str(&format!("**Error**: {error}\n"));
        return output;
    }

    output.push_str("### Top Chemicals\n\n");
    if details.top_chemicals.is_empty() {
        output.push_str("_none_\n");
    }
    for (name, count) in &details.top_chemicals {
        output.push_str(&format!("- {name} ({count} studies)\n"));
    }

    output.push_str("\n### Top Affiliations\n\n");
    if details.top_affiliations.is_empty() {
        output.push_str("_none_\n");
    }
    for affiliation in &details.top_affiliations {
        output.push_str(&format!("- {affiliation}\n"));
    }

    output.push_str(&format!(
        "\nFull network: `chemnet company \"{}\"`\n",
        details.company
    ));
    output
}
