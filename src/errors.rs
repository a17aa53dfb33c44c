//! Error taxonomy.
//!
//! Every variant here is non-recoverable at the point it is raised: the engine
//! performs no internal retries, and callers (the rule pipeline or a test
//! harness) decide whether to catch and report.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A sound-class expression names an unknown phoneme or yields an empty
    /// class. Always a programming error in the caller.
    #[error("invalid sound class expression {expr:?}")]
    InvalidRange { expr: String },

    /// A rule queried state that cannot hold in a well-formed pipeline, e.g.
    /// partitioning a derivation that contains a term of unknown kind.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Branch exploration failed to converge within its attempt bound. This
    /// indicates a rule that records a decision inconsistently across runs.
    #[error("branch exploration did not converge after {attempts} attempts")]
    ExplorationDiverged { attempts: usize },
}
