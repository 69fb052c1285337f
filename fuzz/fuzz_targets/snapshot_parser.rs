#![no_main]

use api_responsiveness::regression::{normalize, rank_by_volume};
use api_responsiveness::snapshot::ApiResponsiveness;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; a parsed snapshot must normalize and rank cleanly
        if let Ok(snapshot) = ApiResponsiveness::from_json_str(input) {
            let _ = normalize(snapshot.records(), 1e-5);
            let _ = rank_by_volume(snapshot.records());
        }
    }
});
