//! Unified entry points: a resolved configuration in, output lines out.
//!
//! [`pick_files`] is what the CLI drives: it runs zero or more input files
//! (standard input when none are given) through one shared selection
//! configuration, strictly in sequence, writing one line per selected
//! record. [`pick_from_reader`] and [`pick_from_path`] are the
//! single-source building blocks.

pub mod observability;

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{PickError, PickResult};
use crate::scanner::Scanner;
use crate::selector::Selector;

pub use observability::{
    CompositeObserver, PickContext, PickObserver, PickStats, Source, StdErrObserver,
};

/// Selection mode resolved from the CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No list given: emit every field.
    All,
    /// An index-list expression (`--indexes`).
    Indexes(String),
    /// A header-name-list expression (`--headers`).
    Headers(String),
}

impl Selection {
    /// Build the selection from the two optional, mutually-exclusive list
    /// flags.
    pub fn from_lists(indexes: Option<String>, headers: Option<String>) -> PickResult<Self> {
        match (indexes, headers) {
            (Some(_), Some(_)) => Err(PickError::Config {
                message: "only one type of list may be specified".to_string(),
            }),
            (Some(list), None) => Ok(Selection::Indexes(list)),
            (None, Some(list)) => Ok(Selection::Headers(list)),
            (None, None) => Ok(Selection::All),
        }
    }

    /// Parse into a [`Selector`], surfacing list-syntax errors.
    pub fn selector(&self) -> PickResult<Selector> {
        match self {
            Selection::All => Ok(Selector::all()),
            Selection::Indexes(list) => Selector::indexes(list),
            Selection::Headers(list) => Ok(Selector::headers(list)),
        }
    }
}

/// Options controlling a pick run.
///
/// Use [`Default`] for comma-separated input joined with tabs.
#[derive(Clone)]
pub struct PickOptions {
    /// Field delimiter for the input (one byte).
    pub delimiter: u8,
    /// String joining the selected fields of each output line.
    pub output_delimiter: String,
    /// Optional observer for per-source outcomes.
    pub observer: Option<Arc<dyn PickObserver>>,
}

impl fmt::Debug for PickOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickOptions")
            .field("delimiter", &self.delimiter)
            .field("output_delimiter", &self.output_delimiter)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            output_delimiter: "\t".to_string(),
            observer: None,
        }
    }
}

/// Parse a delimiter flag value into its single-byte character.
///
/// Backslash escapes are unescaped first (`\t` is a tab), so shells need no
/// literal control characters. Anything that is not exactly one single-byte
/// character afterwards is a configuration error.
pub fn parse_delimiter(text: &str) -> PickResult<u8> {
    let unescaped = unescape(text);
    let mut bytes = unescaped.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(b), None) => Ok(b),
        _ => Err(PickError::Config {
            message: format!("{text:?}: the delimiter must be a single character"),
        }),
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Drain one source through a fresh [`Scanner`], writing each output line
/// followed by a newline.
pub fn pick_from_reader<R: Read, W: Write>(
    source: R,
    selector: Selector,
    options: &PickOptions,
    out: &mut W,
) -> PickResult<PickStats> {
    let mut scanner = Scanner::with_delimiters(
        selector,
        source,
        options.delimiter,
        options.output_delimiter.clone(),
    );
    drain(&mut scanner, out)
}

/// Open `path` and drain it, reporting the outcome to the configured
/// observer. The file is closed when the drain completes or fails.
pub fn pick_from_path<W: Write>(
    path: impl AsRef<Path>,
    selection: &Selection,
    options: &PickOptions,
    out: &mut W,
) -> PickResult<PickStats> {
    let path = path.as_ref();
    let ctx = PickContext {
        source: Source::Path(path.to_path_buf()),
    };
    let result = File::open(path)
        .map_err(PickError::from)
        .and_then(|file| pick_from_reader(file, selection.selector()?, options, out));
    report(options, &ctx, &result);
    result
}

/// Run every input file (standard input when `paths` is empty) through one
/// shared selection configuration, strictly in sequence.
///
/// One scanner is reused across files, so the delimiter configuration is
/// shared while each file resolves its own header row. The first failing
/// source stops the run and its error is returned; stats for the completed
/// sources are accumulated.
pub fn pick_files<W: Write>(
    paths: &[PathBuf],
    selection: &Selection,
    options: &PickOptions,
    out: &mut W,
) -> PickResult<PickStats> {
    let selector = selection.selector()?;

    if paths.is_empty() {
        let ctx = PickContext {
            source: Source::Stdin,
        };
        let result = pick_from_reader(io::stdin().lock(), selector, options, out);
        report(options, &ctx, &result);
        return result;
    }

    let mut total = PickStats::default();
    let mut scanner: Option<Scanner<Box<dyn Read>>> = None;
    for path in paths {
        let ctx = PickContext {
            source: Source::Path(path.clone()),
        };
        let result = drain_path(path, &selector, options, &mut scanner, out);
        report(options, &ctx, &result);
        total.records += result?.records;
    }
    Ok(total)
}

fn drain_path<W: Write>(
    path: &Path,
    selector: &Selector,
    options: &PickOptions,
    scanner: &mut Option<Scanner<Box<dyn Read>>>,
    out: &mut W,
) -> PickResult<PickStats> {
    let file: Box<dyn Read> = Box::new(File::open(path)?);
    let scanner = match scanner {
        Some(scanner) => {
            scanner.reset_source(file);
            scanner
        }
        None => scanner.insert(Scanner::with_delimiters(
            selector.clone(),
            file,
            options.delimiter,
            options.output_delimiter.clone(),
        )),
    };
    let result = drain(scanner, out);
    // Release the file before the next source is opened.
    scanner.reset_source(Box::new(io::empty()));
    result
}

fn drain<R: Read, W: Write>(scanner: &mut Scanner<R>, out: &mut W) -> PickResult<PickStats> {
    let mut records = 0;
    while scanner.scan() {
        writeln!(out, "{}", scanner.line())?;
        records += 1;
    }
    scanner.finish()?;
    Ok(PickStats { records })
}

fn report(options: &PickOptions, ctx: &PickContext, result: &PickResult<PickStats>) {
    if let Some(observer) = options.observer.as_ref() {
        match result {
            Ok(stats) => observer.on_success(ctx, *stats),
            Err(error) => observer.on_failure(ctx, error),
        }
    }
}
