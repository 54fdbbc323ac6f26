//! Streaming scan/select pipeline over delimited input.
//!
//! A [`Scanner`] pulls one record per [`scan`](Scanner::scan) call, resolves
//! the selector against the first record of each source, and renders the
//! selected fields as one joined output line.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{PickError, PickResult};
use crate::selector::{ColumnPlan, Selector};

/// Streaming scanner over one delimited source.
///
/// The underlying reader is strict about record shape: a record whose field
/// count differs from the first record of the source is a terminal error.
/// End-of-input is graceful termination, not an error.
pub struct Scanner<R: Read> {
    reader: csv::Reader<R>,
    selector: Selector,
    plan: Option<ColumnPlan>,
    delimiter: u8,
    output_delimiter: String,
    record: StringRecord,
    line: String,
    err: Option<PickError>,
    eof: bool,
}

impl<R: Read> Scanner<R> {
    /// Scanner over `source` with the default delimiters: `,` in, tab out.
    pub fn new(selector: Selector, source: R) -> Self {
        Self::with_delimiters(selector, source, b',', "\t")
    }

    /// Scanner with an explicit field delimiter and output-join string.
    ///
    /// The field delimiter is fixed for the scanner's lifetime; it carries
    /// over to every source bound via [`reset_source`](Self::reset_source).
    pub fn with_delimiters(
        selector: Selector,
        source: R,
        delimiter: u8,
        output_delimiter: impl Into<String>,
    ) -> Self {
        Self {
            reader: build_reader(source, delimiter),
            selector,
            plan: None,
            delimiter,
            output_delimiter: output_delimiter.into(),
            record: StringRecord::new(),
            line: String::new(),
            err: None,
            eof: false,
        }
    }

    /// Rebind to a new source, keeping the selector and delimiter
    /// configuration.
    ///
    /// Header, plan, line, and error state start over: the new source
    /// resolves its own header row independently.
    pub fn reset_source(&mut self, source: R) {
        self.reader = build_reader(source, self.delimiter);
        self.plan = None;
        self.err = None;
        self.eof = false;
        self.line.clear();
    }

    /// Advance to the next output record.
    ///
    /// Returns `false` once the source is exhausted or a terminal error has
    /// been recorded, and keeps returning `false` on every call after that.
    pub fn scan(&mut self) -> bool {
        if self.eof || self.err.is_some() {
            return false;
        }
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => {}
                Ok(false) => {
                    self.eof = true;
                    self.line.clear();
                    return false;
                }
                Err(e) => return self.fail(e.into()),
            }

            if self.plan.is_none() {
                match self.selector.resolve(&self.record) {
                    Ok(plan) => self.plan = Some(plan),
                    Err(e) => return self.fail(e),
                }
                if self.selector.consumes_header() {
                    continue;
                }
            }

            if let Some(plan) = &self.plan {
                self.line = plan.select(&self.record).join(&self.output_delimiter);
            }
            return true;
        }
    }

    /// The line produced by the last successful [`scan`](Self::scan); empty
    /// before the first success and after exhaustion or an error.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The terminal error, if scanning stopped on one. Plain end-of-input
    /// reports `None`.
    pub fn err(&self) -> Option<&PickError> {
        self.err.as_ref()
    }

    /// Consume the terminal state: `Err` with the recorded error, or `Ok`
    /// for graceful end-of-input. The scanner is left exhausted either way;
    /// use [`reset_source`](Self::reset_source) to continue with another
    /// source.
    pub fn finish(&mut self) -> PickResult<()> {
        self.eof = true;
        match self.err.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: PickError) -> bool {
        self.line.clear();
        self.err = Some(err);
        false
    }
}

fn build_reader<R: Read>(source: R, delimiter: u8) -> csv::Reader<R> {
    // Header handling belongs to the scanner, not the reader, and the
    // non-flexible default turns inconsistent field counts into errors.
    ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(source)
}
