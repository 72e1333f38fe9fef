#![no_main]
use libfuzzer_sys::fuzz_target;
use ratlog::{Record, parse_line, parse_stream};

fuzz_target!(|data: &[u8]| {
    // Any byte stream yields exactly one record per line, in order; invalid
    // UTF-8 decodes to U+FFFD instead of failing.
    let mut records: Vec<Record> = Vec::new();
    parse_stream(data, &mut records).expect("in-memory stream cannot fail");

    let text = String::from_utf8_lossy(data);
    let expected: Vec<Record> = text.lines().map(parse_line).collect();
    assert_eq!(records, expected);
});
