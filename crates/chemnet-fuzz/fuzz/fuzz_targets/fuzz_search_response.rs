#![no_main]

use chemnet_explorer::models::{
    ChemicalSearchRequest, ChemicalSearchResult, Chemicals, ResearcherSearchRequest,
    ResearcherSearchResult, Researchers,
};
use chemnet_explorer::views::{Present, result_view};
use libfuzzer_sys::fuzz_target;
use url::Url;

fuzz_target!(|data: &[u8]| {
    let Ok(host) = Url::parse("https://viz.example.org") else {
        return;
    };

    if let Ok(response) = serde_json::from_slice::<ChemicalSearchResult>(data) {
        let request = ChemicalSearchRequest::new("fuzz", None);
        let _ = result_view::<Chemicals>(&request, &response, &host);
    }

    // Ambiguous researcher answers build a selection list instead
    if let Ok(response) = serde_json::from_slice::<ResearcherSearchResult>(data) {
        let request = ResearcherSearchRequest::new("fuzz").select(1);
        let _ = Researchers::selection(&request, &response);
        let _ = result_view::<Researchers>(&request, &response, &host);
    }
});
