//! `csvpick` is a small library (and CLI) for selecting fields from
//! delimiter-separated text: it reads tabular records, picks a subset of
//! fields by 1-based positional index or by header name, and re-emits them
//! joined with a configurable output delimiter.
//!
//! ## Selection modes
//!
//! - **Pass-through**: no list given; every field is emitted unchanged.
//! - **Index lists** (e.g. `"3,1,4-6,8-"`): 1-based indexes and inclusive
//!   ranges with open bounds. Out-of-range picks are silent empty fields,
//!   and no header row is required — the first record of a source just
//!   bounds open-ended ranges and stays ordinary data.
//! - **Header lists** (e.g. `"price,name"`, with `\,` escaping a comma
//!   inside a name): the first record of each source is consumed as the
//!   header row and never emitted; requested names missing from the header
//!   produce empty fields, while a duplicated name *in* the header is an
//!   error.
//!
//! ## Quick example
//!
//! ```rust
//! use csvpick::pick::{PickOptions, Selection, pick_from_reader};
//!
//! # fn main() -> Result<(), csvpick::PickError> {
//! let selection = Selection::Indexes("3,1".to_string());
//! let mut out = Vec::new();
//! pick_from_reader(
//!     "1,2,3\n4,5,6\n".as_bytes(),
//!     selection.selector()?,
//!     &PickOptions::default(),
//!     &mut out,
//! )?;
//! assert_eq!(out, b"3\t1\n6\t4\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`selector`]: selection expressions and their two-phase resolution
//!   into column plans
//! - [`scanner`]: the streaming scan/select pipeline over one source
//! - [`pick`]: unified entry points, run configuration, and per-source
//!   observability
//! - [`error`]: the error type shared across all of the above

pub mod error;
pub mod pick;
pub mod scanner;
pub mod selector;

pub use error::{PickError, PickResult};
