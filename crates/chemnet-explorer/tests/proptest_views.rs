//! Property-based tests for view invariants.

use proptest::prelude::*;
use url::Url;

use chemnet_explorer::error::PanelError;
use chemnet_explorer::models::{
    ChemicalSearchRequest, ChemicalSearchResult, Chemicals, Classification, FundingRow,
};
use chemnet_explorer::views::{
    Action, FundingView, NAME_DISPLAY_LIMIT, error_view, frame_url, result_view, truncate_name,
};

fn arb_classification() -> impl Strategy<Value = Classification> {
    prop_oneof![
        Just(Classification::Government),
        Just(Classification::University),
        Just(Classification::Foundation),
        Just(Classification::Company),
        Just(Classification::Unknown),
    ]
}

/// Generate arbitrary funding rows.
fn arb_rows() -> impl Strategy<Value = Vec<FundingRow>> {
    proptest::collection::vec(
        ("[A-Za-z ]{1,40}", 0u64..500, arb_classification()).prop_map(
            |(company, count, classification)| FundingRow { company, count, classification },
        ),
        0..30,
    )
}

proptest! {
    /// Cards are ordered by descending count, ties in arrival order.
    #[test]
    fn funding_cards_sorted_desc(rows in arb_rows()) {
        let view = FundingView::from_rows(&rows);
        prop_assert_eq!(view.cards.len(), rows.len());

        for pair in view.cards.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }

        let mut expected = rows.clone();
        expected.sort_by(|a, b| b.count.cmp(&a.count));
        let names: Vec<_> = view.cards.iter().map(|c| c.company.clone()).collect();
        let expected: Vec<_> = expected.into_iter().map(|r| r.company).collect();
        prop_assert_eq!(names, expected);
        prop_assert_eq!(view.retry.is_some(), rows.is_empty());
    }

    /// Short names are kept; long names keep a fixed prefix plus an ellipsis.
    #[test]
    fn truncation_bounds(name in "\\PC{0,60}") {
        let label = truncate_name(&name);
        let chars = name.chars().count();

        if chars <= NAME_DISPLAY_LIMIT {
            prop_assert_eq!(label, name);
        } else {
            prop_assert_eq!(label.chars().count(), NAME_DISPLAY_LIMIT + 3);
            prop_assert!(label.ends_with("..."));
            let prefix: String = name.chars().take(NAME_DISPLAY_LIMIT).collect();
            prop_assert!(label.starts_with(&prefix));
        }
    }

    /// One clickable choice per suggestion, each searching for exactly that string.
    #[test]
    fn one_choice_per_suggestion(suggestions in proptest::collection::vec("\\PC{1,30}", 0..10)) {
        let view = error_view(&PanelError::domain_miss("Chemical not found", suggestions.clone()));
        prop_assert_eq!(view.suggestions.len(), suggestions.len());

        for (choice, suggestion) in view.suggestions.iter().zip(&suggestions) {
            prop_assert_eq!(&choice.action, &Action::Search { query: suggestion.clone() });
        }
    }

    /// Successful results always have a title and frames stay on the visualization host.
    #[test]
    fn result_title_and_frame(
        query in "[A-Za-z]{1,20}",
        resolved in proptest::option::of("[A-Za-z ]{0,20}"),
        iframe in proptest::option::of("/?[a-z]{1,10}(/[a-z0-9_]{1,10}){0,3}\\.html"),
    ) {
        let host = Url::parse("https://viz.example.org").unwrap();
        let request = ChemicalSearchRequest::new(query, None);
        let response = ChemicalSearchResult {
            success: true,
            chemical: resolved,
            iframe_url: iframe.clone(),
            ..Default::default()
        };

        let view = result_view::<Chemicals>(&request, &response, &host);
        prop_assert!(view.title.len() > "Chemical Network: ".len());
        prop_assert_eq!(view.frame.is_some(), iframe.is_some());

        if let Some(path) = iframe {
            let frame = frame_url(&host, &path).unwrap();
            prop_assert_eq!(frame.host_str(), Some("viz.example.org"));
        }
    }
}
