//! Field selection: which subset of each record to emit, in what order.
//!
//! A [`Selector`] is the immutable, parsed form of a selection expression.
//! Resolving it against the first record of a source yields a
//! [`ColumnPlan`], the executable form that is reused for every data
//! record. Keeping the two phases as distinct values makes the
//! resolved/unresolved state machine explicit and testable without I/O.

pub mod list;

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::{PickError, PickResult};

use list::IndexTerm;

/// Parsed selection expression.
///
/// Three variants cover the selection modes: pass-through, 1-based index
/// lists, and header-name lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Emit every field unchanged.
    All,
    /// Select by 1-based positional indexes and ranges.
    Indexes(Vec<IndexTerm>),
    /// Select by header names, resolved against the header row.
    Headers(Vec<String>),
}

impl Selector {
    /// Pass-through selector.
    pub fn all() -> Self {
        Selector::All
    }

    /// Parse an index-list expression (e.g. `"3,1,4-6,8-"`).
    pub fn indexes(list: &str) -> PickResult<Self> {
        Ok(Selector::Indexes(list::parse_index_list(list)?))
    }

    /// Parse a header-name-list expression (e.g. `"name,price"`; `\,`
    /// escapes a comma inside a name).
    pub fn headers(list: &str) -> Self {
        Selector::Headers(list::parse_header_list(list))
    }

    /// Whether the first record of a source is consumed as a header row and
    /// never emitted.
    pub fn consumes_header(&self) -> bool {
        matches!(self, Selector::Headers(_))
    }

    /// Resolve against the first record of a source, producing the
    /// [`ColumnPlan`] used for every subsequent record.
    ///
    /// For index selection the record's width bounds open-ended ranges and
    /// the record itself remains ordinary data. For header selection the
    /// record is the header row; a duplicated header name is an error.
    pub fn resolve(&self, first: &StringRecord) -> PickResult<ColumnPlan> {
        match self {
            Selector::All => Ok(ColumnPlan::All),
            Selector::Indexes(terms) => Ok(resolve_indexes(terms, first.len())),
            Selector::Headers(names) => resolve_headers(names, first),
        }
    }
}

/// A source-column position in a resolved plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Take the field at this 0-based position.
    At(usize),
    /// The requested column does not exist in the source; emit an empty
    /// field.
    Missing,
}

/// Resolved, ordered column positions backing one selection.
///
/// Built once per source and reused for every data record. Selection
/// through a plan never fails: missing positions and rows narrower than the
/// plan yield empty fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPlan {
    /// Pass-through: the record itself, unchanged.
    All,
    /// Explicit positions, one per output field.
    Columns(Vec<Column>),
}

impl ColumnPlan {
    /// Apply the plan to one record, producing the output fields in order.
    pub fn select(&self, record: &StringRecord) -> Vec<String> {
        match self {
            ColumnPlan::All => record.iter().map(str::to_owned).collect(),
            ColumnPlan::Columns(columns) => columns
                .iter()
                .map(|column| match column {
                    Column::At(i) => record.get(*i).unwrap_or("").to_owned(),
                    Column::Missing => String::new(),
                })
                .collect(),
        }
    }
}

fn resolve_indexes(terms: &[IndexTerm], width: usize) -> ColumnPlan {
    let mut columns = Vec::new();
    for term in terms {
        match *term {
            IndexTerm::Single(index) => columns.push(if index <= width {
                Column::At(index - 1)
            } else {
                Column::Missing
            }),
            IndexTerm::Range { first, last } => {
                let first = first.unwrap_or(1);
                let last = last.unwrap_or(width).min(width);
                for index in first..=last {
                    columns.push(Column::At(index - 1));
                }
            }
        }
    }
    ColumnPlan::Columns(columns)
}

fn resolve_headers(names: &[String], header: &StringRecord) -> PickResult<ColumnPlan> {
    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(header.len());
    for (index, name) in header.iter().enumerate() {
        if by_name.insert(name, index).is_some() {
            return Err(PickError::DuplicatedHeader {
                name: name.to_string(),
            });
        }
    }
    let columns = names
        .iter()
        .map(|name| match by_name.get(name.as_str()) {
            Some(&index) => Column::At(index),
            None => Column::Missing,
        })
        .collect();
    Ok(ColumnPlan::Columns(columns))
}
