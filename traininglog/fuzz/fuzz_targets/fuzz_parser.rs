#![no_main]

use libfuzzer_sys::fuzz_target;
use traininglog::Engine;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let engine = Engine::new();
        let _ = engine.parse_session(s, "fuzz.log");
    }
});
