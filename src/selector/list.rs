//! List grammars for selection expressions.
//!
//! Two textual grammars, both comma-separated:
//!
//! - index lists: bare 1-based indexes and inclusive ranges (`3`, `1-4`,
//!   `2-`, `-3`, bare `-`)
//! - header-name lists: literal names, with `\,` escaping a comma inside a
//!   name
//!
//! Parsing is pure: a list string in, a structured result or a descriptive
//! error out.

use crate::error::{PickError, PickResult};

/// One parsed term of an index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTerm {
    /// A single 1-based column index.
    Single(usize),
    /// An inclusive 1-based range. `None` bounds are open and default at
    /// resolution time: the lower to 1, the upper to the witnessed width.
    Range {
        first: Option<usize>,
        last: Option<usize>,
    },
}

/// Parse an index-list string into terms.
///
/// Whitespace around terms and around the range hyphen is ignored. The
/// empty string parses to an empty selection. Index `0` is a
/// [`PickError::ZeroIndex`] error; any other malformed term is
/// [`PickError::InvalidList`].
pub fn parse_index_list(list: &str) -> PickResult<Vec<IndexTerm>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|term| parse_index_term(term.trim(), list))
        .collect()
}

fn parse_index_term(term: &str, list: &str) -> PickResult<IndexTerm> {
    if let Some((lo, hi)) = term.split_once('-') {
        if hi.contains('-') {
            return Err(invalid(list));
        }
        return Ok(IndexTerm::Range {
            first: parse_bound(lo.trim(), list)?,
            last: parse_bound(hi.trim(), list)?,
        });
    }
    match parse_bound(term, list)? {
        Some(index) => Ok(IndexTerm::Single(index)),
        None => Err(invalid(list)),
    }
}

fn parse_bound(text: &str, list: &str) -> PickResult<Option<usize>> {
    if text.is_empty() {
        return Ok(None);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(list));
    }
    let index: usize = text.parse().map_err(|_| invalid(list))?;
    if index == 0 {
        return Err(PickError::ZeroIndex);
    }
    Ok(Some(index))
}

fn invalid(list: &str) -> PickError {
    PickError::InvalidList {
        list: list.to_string(),
    }
}

/// Split a header-name list on unescaped commas and unescape each name.
///
/// `\,` yields a literal comma inside a name, `\\` a literal backslash, and
/// any other escaped character is kept verbatim. The empty string parses to
/// an empty selection. Names are not trimmed; a header may legitimately
/// contain spaces.
pub fn parse_header_list(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    let mut names = Vec::new();
    let mut name = String::new();
    let mut chars = list.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => name.push(chars.next().unwrap_or('\\')),
            ',' => names.push(std::mem::take(&mut name)),
            _ => name.push(c),
        }
    }
    names.push(name);
    names
}
