#![no_main]

use chemnet_explorer::views::{connection_groups, frame_url};
use libfuzzer_sys::fuzz_target;
use url::Url;

fuzz_target!(|data: &[u8]| {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(data) {
        let _ = connection_groups(Some(&map));
    }

    // Arbitrary iframe paths must resolve or be dropped, never panic
    if let (Ok(path), Ok(host)) = (std::str::from_utf8(data), Url::parse("https://viz.example.org")) {
        let _ = frame_url(&host, path);
    }
});
