use crate::ir::{Fields, Record, Tag};
use crate::{BasicField, RatlogParser};

fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (*k, BasicField::from(*v)))
        .collect()
}

fn tags(names: &[&str]) -> Vec<Tag> {
    names.iter().map(|n| Tag::from(*n)).collect()
}

#[test]
fn test_parse_request_line() {
    let parser = RatlogParser::new();
    let record = parser.parse_line(
        r"[request|info] GET | ip: \:\:ffff\:172.18.0.3 | url: /api/v1/about | method: GET | xhr: true",
    );
    assert_eq!(
        record,
        Record {
            tags: tags(&["request", "info"]),
            message: "GET".into(),
            fields: fields(&[
                ("ip", "::ffff:172.18.0.3"),
                ("url", "/api/v1/about"),
                ("method", "GET"),
                ("xhr", "true"),
            ]),
        }
    );
}

#[test]
fn test_parse_unescaped_colons_in_value() {
    let parser = RatlogParser::new();
    let record = parser.parse_line(
        "[request|info] GET | ip: ::ffff:172.18.0.3 | url: /api/v1/about | method: GET | xhr: true",
    );
    assert_eq!(record.fields.get_str("ip").as_deref(), Some("::ffff:172.18.0.3"));
    assert_eq!(record.fields.len(), 4);
}

#[test]
fn test_parse_single_tag() {
    let parser = RatlogParser::new();
    let record = parser.parse_line(
        "[graphql] operation-responsetime | operation: onDigitalConsultationEvent | duration: 27.303113068 | operationType: subscription",
    );
    assert_eq!(record.tags, tags(&["graphql"]));
    assert_eq!(record.message, "operation-responsetime");
    assert_eq!(
        record.fields,
        fields(&[
            ("operation", "onDigitalConsultationEvent"),
            ("duration", "27.303113068"),
            ("operationType", "subscription"),
        ])
    );
}

#[test]
fn test_parse_message_only() {
    let record = RatlogParser::new().parse_line("message only");
    assert!(record.tags.is_empty());
    assert_eq!(record.message, "message only");
    assert!(record.fields.is_empty());
}

#[test]
fn test_parse_message_and_fields() {
    let record = RatlogParser::new().parse_line("File not found | path: /tmp/notfound.txt");
    assert!(record.tags.is_empty());
    assert_eq!(record.message, "File not found");
    assert_eq!(record.fields, fields(&[("path", "/tmp/notfound.txt")]));
}

#[test]
fn test_parse_escaped_backslash() {
    let record = RatlogParser::new().parse_line(r"path not found \\");
    assert_eq!(record.message, r"path not found \");
    assert!(record.fields.is_empty());
}

#[test]
fn test_parse_literal_backslash_n() {
    let record = RatlogParser::new().parse_line(r"error\\nin file");
    assert_eq!(record.message, r"error\nin file");
}

#[test]
fn test_parse_escaped_bracket_in_tag() {
    let record = RatlogParser::new().parse_line(r"[nginx\[] GET | url: /v1/");
    assert_eq!(record.tags, tags(&["nginx["]));
    assert_eq!(record.message, "GET");
    assert_eq!(record.fields, fields(&[("url", "/v1/")]));
}

#[test]
fn test_parse_escaped_pipe_in_tag() {
    let record = RatlogParser::new().parse_line(r"[nginx\|] GET | url: /v1/");
    assert_eq!(record.tags, tags(&["nginx|"]));
    assert_eq!(record.message, "GET");
    assert_eq!(record.fields, fields(&[("url", "/v1/")]));
}

#[test]
fn test_parse_escaped_pipe_in_tags() {
    let record = RatlogParser::new().parse_line(r"[nginx\||api] GET | url: /v1/");
    assert_eq!(record.tags, tags(&["nginx|", "api"]));
    assert_eq!(record.message, "GET");
}

#[test]
fn test_parse_duplicate_keys_last_wins() {
    let record = RatlogParser::new().parse_line("msg | k: first | other: x | k: second");
    assert_eq!(record.fields.len(), 2);
    assert_eq!(record.fields.get_str("k").as_deref(), Some("second"));
}

#[test]
fn test_bracket_mid_line_is_text() {
    let record = RatlogParser::new().parse_line("note [not|tags] here");
    assert!(record.tags.is_empty());
    assert_eq!(record.message, "note [not");
    assert_eq!(record.fields.get_str("").as_deref(), Some("tags] here"));
}

#[test]
fn test_leading_space_disables_tags() {
    let record = RatlogParser::new().parse_line(" [tag] msg");
    assert!(record.tags.is_empty());
    assert_eq!(record.message, "[tag] msg");
}

#[test]
fn test_escaped_colon_in_key() {
    let record = RatlogParser::new().parse_line(r"msg | a\:b: c");
    assert_eq!(record.fields.get_str("a:b").as_deref(), Some("c"));
}

#[test]
fn test_escaped_pipe_in_message_and_value() {
    let record = RatlogParser::new().parse_line(r"a \| b | cmd: x \| y");
    assert_eq!(record.message, "a | b");
    assert_eq!(record.fields.get_str("cmd").as_deref(), Some("x | y"));
}

#[test]
fn test_tags_without_message() {
    let record = RatlogParser::new().parse_line("[only]");
    assert_eq!(record.tags, tags(&["only"]));
    assert_eq!(record.message, "");
    assert!(record.fields.is_empty());
}

#[test]
fn test_whitespace_inside_segments_is_kept() {
    let record = RatlogParser::new().parse_line("  two  words  |  some key :  a  b  ");
    assert_eq!(record.message, "two  words");
    assert_eq!(record.fields.get_str("some key").as_deref(), Some("a  b"));
}
