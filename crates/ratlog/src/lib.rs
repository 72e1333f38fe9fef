//! # Ratlog Parser
//!
//! Streaming parser for [ratlog](https://github.com/ratlog/ratlog-spec) lines,
//! a single-line structured log format:
//!
//! ```text
//! [tag1|tag2] message text | key: value | other: value
//! ```
//!
//! ## Overview
//!
//! Each line decodes into a [`Record`](ir::Record) made of:
//!
//! - **Tags**: an optional leading `[...]` section, `|`-separated
//! - **Message**: free text up to the first unescaped `|`
//! - **Fields**: `key: value` pairs, each introduced by `|`
//!
//! `\` escapes `\`, `[` and `|` everywhere, and `:` inside fields. Surrounding
//! whitespace is trimmed from the message, the closing tag, and every field
//! key and value.
//!
//! The grammar never rejects a line. Unterminated tag sections, stray
//! delimiters and unknown escapes all still produce a record; the only errors
//! come from the input source or the sink receiving records.
//! Bytes that are not valid UTF-8 decode to U+FFFD rather than failing.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   lines    ┌──────────────┐   Record   ┌──────────────┐
//! │   BufRead    │ ─────────► │ RatlogParser │ ─────────► │ RecordWriter │
//! └──────────────┘            └──────────────┘            └──────────────┘
//! ```
//!
//! - [`RatlogParser`](parser::RatlogParser) holds no state. Every line gets a
//!   fresh state machine, so a parser can be shared between threads.
//! - [`RatlogParser::parse`](parser::RatlogParser::parse) drives a reader line
//!   by line and writes each record before reading the next line. The first
//!   error stops the stream.
//! - [`RecordBuffer`](buffer::RecordBuffer) is an in-memory FIFO implementing
//!   both [`RecordWriter`](parser::RecordWriter) and
//!   [`RecordReader`](parser::RecordReader).
//!
//! ## Known quirks
//!
//! - A `\` before any character other than `\`, `[`, `|` (or `:` inside
//!   fields) keeps that character but leaves the escape pending, so it applies
//!   to the next escapable character instead.
//! - `\]` is not an escape: tags cannot contain a literal `]`.
//! - Tags closed by `|` are kept untrimmed; only the tag closed by `]` is
//!   trimmed.
//!
//! ## Examples
//!
//! ### Single line
//!
//! ```
//! use ratlog::parse_line;
//!
//! let record = parse_line("[request|info] GET | url: /api/v1/about | xhr: true");
//! assert_eq!(record.tags.len(), 2);
//! assert_eq!(record.message, "GET");
//! assert_eq!(record.fields.get_str("url").as_deref(), Some("/api/v1/about"));
//! ```
//!
//! ### Streaming into a buffer
//!
//! ```
//! use ratlog::{RatlogParser, RecordBuffer, RecordReader};
//!
//! let input = "first | n: 1\nsecond | n: 2\n";
//! let mut buffer = RecordBuffer::new();
//! RatlogParser::new().parse(input.as_bytes(), &mut buffer)?;
//!
//! assert_eq!(buffer.record()?.message, "first");
//! assert_eq!(buffer.record()?.message, "second");
//! # Ok::<(), ratlog::RatlogError>(())
//! ```

/// In-memory record queue.
pub mod buffer;
/// Error type shared by every component.
pub mod error;
/// Record data model.
pub mod ir;
/// Line grammar and stream driver.
pub mod parser;

#[cfg(test)]
mod tests;

pub use buffer::RecordBuffer;
pub use error::{RatlogError, Result};
pub use ir::{BasicField, FieldValue, Fields, Record, Tag};
pub use parser::{
    LineReader, RatlogParser, RecordReader, RecordWriter, parse_line, parse_stream,
};
