#![no_main]

use chemnet_explorer::models::{CompanyDetails, FundingTable};
use chemnet_explorer::views::{DetailsView, FundingView};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(table) = serde_json::from_slice::<FundingTable>(data) {
        let _ = FundingView::from_rows(&table.funding_data);

        if let Some(row) = table.funding_data.first() {
            let details = serde_json::from_slice::<CompanyDetails>(data).ok();
            let _ = DetailsView::new(row, false, details.as_ref(), None);
        }
    }
});
