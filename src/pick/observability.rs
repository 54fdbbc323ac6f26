//! Per-source outcome reporting.
//!
//! The unified entry points in [`crate::pick`] report each source's outcome
//! to an optional [`PickObserver`]: success with the emitted-record count,
//! or the terminal error.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::PickError;

/// Where a source came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input.
    Stdin,
    /// A file path.
    Path(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("-"),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Context about one source being drained.
#[derive(Debug, Clone)]
pub struct PickContext {
    /// The input source.
    pub source: Source,
}

/// Minimal stats reported when a source drains successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickStats {
    /// Number of output records written.
    pub records: usize,
}

/// Observer interface for per-source outcomes.
///
/// Implementors can record metrics or logs.
pub trait PickObserver: Send + Sync {
    /// Called when a source drains to end-of-input.
    fn on_success(&self, _ctx: &PickContext, _stats: PickStats) {}

    /// Called when a source stops on a terminal error.
    fn on_failure(&self, _ctx: &PickContext, _error: &PickError) {}
}

/// Fans callbacks out to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PickObserver>>,
}

impl CompositeObserver {
    /// Composite over `observers`, called in order.
    pub fn new(observers: Vec<Arc<dyn PickObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PickObserver for CompositeObserver {
    fn on_success(&self, ctx: &PickContext, stats: PickStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &PickContext, error: &PickError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }
}

/// Logs per-source outcomes to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PickObserver for StdErrObserver {
    fn on_success(&self, ctx: &PickContext, stats: PickStats) {
        eprintln!("[pick][ok] source={} records={}", ctx.source, stats.records);
    }

    fn on_failure(&self, ctx: &PickContext, error: &PickError) {
        eprintln!("[pick][fail] source={} err={}", ctx.source, error);
    }
}
