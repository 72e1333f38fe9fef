use ratlog::{FieldValue, RatlogError, Record, RecordWriter};
use std::io::{self, Write};

/// Sink that prints matching records in a readable layout.
pub struct Inspector<W: Write> {
    out: W,
    tags: Vec<String>,
    count_only: bool,
    matched: usize,
}

impl<W: Write> Inspector<W> {
    /// `tags` empty means every record matches.
    pub fn new(out: W, tags: Vec<String>, count_only: bool) -> Self {
        Self {
            out,
            tags,
            count_only,
            matched: 0,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| record.has_tag(t))
    }

    fn print(&mut self, record: &Record) -> io::Result<()> {
        if self.matched > 1 {
            writeln!(self.out)?;
        }
        writeln!(self.out, "message: {}", record.message)?;
        if !record.tags.is_empty() {
            let tags: Vec<&str> = record.tags.iter().map(|t| t.as_str()).collect();
            writeln!(self.out, "tags: {}", tags.join(", "))?;
        }
        if !record.fields.is_empty() {
            writeln!(self.out, "fields:")?;
            for (key, value) in record.fields.iter() {
                writeln!(self.out, "  {} = {}", key, value.render())?;
            }
        }
        Ok(())
    }

    /// Flushes output and returns how many records matched.
    pub fn finish(mut self) -> io::Result<usize> {
        if self.count_only {
            writeln!(self.out, "{}", self.matched)?;
        }
        self.out.flush()?;
        Ok(self.matched)
    }
}

impl<W: Write> RecordWriter for Inspector<W> {
    fn write(&mut self, record: Record) -> ratlog::Result<()> {
        if !self.matches(&record) {
            return Ok(());
        }
        self.matched += 1;
        if self.count_only {
            return Ok(());
        }
        self.print(&record).map_err(RatlogError::sink)
    }
}
