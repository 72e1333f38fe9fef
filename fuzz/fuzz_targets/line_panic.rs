#![no_main]
use libfuzzer_sys::fuzz_target;
use ratlog::RatlogParser;

fuzz_target!(|data: &[u8]| {
    // The grammar is total: any text must parse without panicking.
    let s = String::from_utf8_lossy(data);
    let parser = RatlogParser::new();
    let record = parser.parse_line(&s);
    assert_eq!(record.message, record.message.trim());
});
