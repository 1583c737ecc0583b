#![no_main]

use libfuzzer_sys::fuzz_target;
use traininglog::{serializers, Engine};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let engine = Engine::new();

        let log = format!(
            "BEGIN\nDate: 2025-10-18\nPhase: 1\nWeek: 1\nFocus: Fuzz\nDuration: 60\nEx1: Row\nW1: {0}\nS1: {0}\nEND\n",
            s
        );

        if let Ok(Some(session)) = engine.parse_session(&log, "fuzz_sets") {
            let rendered = serializers::render(&session);
            let _ = engine.parse_session(&rendered, "fuzz_rendered");
        }
    }
});
