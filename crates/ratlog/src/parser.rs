use crate::error::{RatlogError, Result};
use crate::ir::{BasicField, Record, Tag};
use std::io::{self, BufRead, BufReader, Read};

/// Accepts parsed records one at a time.
pub trait RecordWriter {
    /// Takes ownership of `record`. An error aborts the stream feeding this writer.
    fn write(&mut self, record: Record) -> Result<()>;
}

/// Produces records one at a time.
pub trait RecordReader {
    /// Returns the next record, or [`RatlogError::EndOfData`] once exhausted.
    fn record(&mut self) -> Result<Record>;
}

impl RecordWriter for Vec<Record> {
    fn write(&mut self, record: Record) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

impl<W: RecordWriter + ?Sized> RecordWriter for &mut W {
    fn write(&mut self, record: Record) -> Result<()> {
        (**self).write(record)
    }
}

/// A parser for ratlog lines.
///
/// `RatlogParser` holds no state: every call to [`parse_line`](Self::parse_line)
/// builds its own state machine, so one parser can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatlogParser;

impl RatlogParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a single line. The line must not contain its terminator.
    pub fn parse_line(&self, line: &str) -> Record {
        let mut state = LineState::new();
        for c in line.chars() {
            state.push(c);
        }
        state.finish()
    }

    /// Parses a single line from a fallible character source.
    ///
    /// # Errors
    ///
    /// Returns [`RatlogError::Read`] with the first error produced by `chars`.
    pub fn parse_chars<I>(&self, chars: I) -> Result<Record>
    where
        I: IntoIterator<Item = io::Result<char>>,
    {
        let mut state = LineState::new();
        for c in chars {
            state.push(c?);
        }
        Ok(state.finish())
    }

    /// Parses every line of `reader`, handing each record to `sink` before
    /// reading the next line.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first read or sink error. Lines after the
    /// failing one are never read. Bytes that are not valid UTF-8 are not an
    /// error; they decode to U+FFFD.
    pub fn parse<R, W>(&self, mut reader: R, sink: &mut W) -> Result<()>
    where
        R: BufRead,
        W: RecordWriter + ?Sized,
    {
        let mut buf = Vec::new();
        let mut count = 0usize;
        while let Some(line) = next_line(&mut reader, &mut buf)? {
            let record = self.parse_line(&line);
            log::trace!("line {}: {:?}", count + 1, record);
            if let Err(e) = sink.write(record) {
                log::warn!("aborting stream at line {}: {}", count + 1, e);
                return Err(e);
            }
            count += 1;
        }
        log::debug!("parsed {} ratlog records", count);
        Ok(())
    }

    /// Wraps `reader` in a pull-based [`LineReader`].
    pub fn reader<R: BufRead>(&self, reader: R) -> LineReader<R> {
        LineReader {
            parser: *self,
            reader,
            buf: Vec::new(),
        }
    }
}

/// Parses one line with a default [`RatlogParser`].
pub fn parse_line(line: &str) -> Record {
    RatlogParser::new().parse_line(line)
}

/// Parses every line of `input` into `sink`. See [`RatlogParser::parse`].
pub fn parse_stream<R, W>(input: R, sink: &mut W) -> Result<()>
where
    R: Read,
    W: RecordWriter + ?Sized,
{
    RatlogParser::new().parse(BufReader::new(input), sink)
}

/// Lazily parses one line per call.
pub struct LineReader<R> {
    parser: RatlogParser,
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> RecordReader for LineReader<R> {
    fn record(&mut self) -> Result<Record> {
        match next_line(&mut self.reader, &mut self.buf)? {
            Some(line) => Ok(self.parser.parse_line(&line)),
            None => Err(RatlogError::EndOfData),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.record() {
            Err(RatlogError::EndOfData) => None,
            other => Some(other),
        }
    }
}

/// Reads one line without its `\n` or `\r\n` terminator, decoding it lossily.
/// Returns `None` at end of input.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Nothing consumed yet.
    Start,
    Tags,
    Message,
    Fields,
}

/// Per-line state of the grammar.
struct LineState {
    mode: Mode,
    escaping: bool,
    /// Set at the start of each field pair, cleared once its key is captured.
    key_open: bool,
    current_key: String,
    buf: String,
    record: Record,
}

impl LineState {
    fn new() -> Self {
        Self {
            mode: Mode::Start,
            escaping: false,
            key_open: true,
            current_key: String::new(),
            buf: String::new(),
            record: Record::default(),
        }
    }

    fn push(&mut self, c: char) {
        if self.mode == Mode::Start {
            if c == '[' {
                self.mode = Mode::Tags;
                return;
            }
            self.mode = Mode::Message;
        }

        if !self.escaping && c == '\\' {
            self.escaping = true;
            return;
        }
        if self.escaping && matches!(c, '\\' | '[' | '|') {
            self.buf.push(c);
            self.escaping = false;
            return;
        }

        // An escaped character other than the ones above is kept verbatim and
        // the escape stays pending. `\]` is not an escape.
        match (self.mode, c) {
            (Mode::Tags, ']') if !self.escaping => {
                let tag = self.take_trimmed();
                self.record.tags.push(Tag(tag));
                self.mode = Mode::Message;
            }
            // Only the closing tag is trimmed.
            (Mode::Tags, '|') => {
                let tag = std::mem::take(&mut self.buf);
                self.record.tags.push(Tag(tag));
            }
            (Mode::Message, '|') => {
                self.record.message = self.take_trimmed();
                self.mode = Mode::Fields;
            }
            (Mode::Fields, '|') => {
                self.commit_field();
                self.key_open = true;
            }
            (Mode::Fields, ':') if self.escaping => {
                self.buf.push(c);
                self.escaping = false;
            }
            (Mode::Fields, ':') if self.key_open => {
                self.current_key = std::mem::take(&mut self.buf);
                self.key_open = false;
            }
            _ => self.buf.push(c),
        }
    }

    fn finish(mut self) -> Record {
        if self.mode == Mode::Fields {
            self.commit_field();
        } else {
            self.record.message = self.take_trimmed();
        }
        self.record
    }

    fn commit_field(&mut self) {
        let value = self.take_trimmed();
        self.record
            .fields
            .insert(self.current_key.trim(), BasicField(value));
    }

    fn take_trimmed(&mut self) -> String {
        let s = self.buf.trim().to_string();
        self.buf.clear();
        s
    }
}
