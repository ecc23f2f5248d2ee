#![no_main]

use libfuzzer_sys::fuzz_target;
use mailalias::{parse, reformat_include};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for record in parse(text) {
        assert!(!record.name.is_empty());
        assert!(!record.name.contains(['#', ':', ' ', '\t', '\n']));
        assert!(record.line >= 1);
        // Every line after the first is a continuation line.
        for line in record.expansion.split('\n').skip(1) {
            assert!(line.starts_with([' ', '\t']));
        }
    }

    let folded = reformat_include(text);
    assert!(!folded.contains('\n'));
    assert!(!folded.ends_with(char::is_whitespace));
});
