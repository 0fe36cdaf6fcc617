//! Caller-visible error taxonomy.
//!
//! Individual provider failures never surface here; they are captured
//! as outcome values and logged. The only error a caller can observe is
//! the aggregate one: no provider produced a usable result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no provider produced a usable result")]
    AllProvidersFailed,
}
