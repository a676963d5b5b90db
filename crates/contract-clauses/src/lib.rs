//! Contract clause compilation.
//!
//! Turns the declarative clauses of an interface member
//! (`Contract.Requires`, `Contract.Ensures`, `Contract.OldValue`,
//! `Contract.Result`) into an ordered list of guard statements wrapped around
//! a delegated call to the real implementation.
//!
//! Everything here is a pure function of its inputs: no I/O and no state
//! shared between calls.

mod assembler;
mod classify;
mod clause;
mod error;
mod member;
mod naming;
mod old_value;
mod scan;
mod strategy;

pub use assembler::{assemble, CompiledMember, MemberBodyAssembler};
pub use classify::{classify, ClauseKind};
pub use clause::{Clause, ClauseCall};
pub use error::Error;
pub use member::{GuardStatement, MemberContext, MemberKind, Parameter, ReturnType, Snapshot, Statement};
pub use naming::{snapshot_variable, Naming, OLD_VALUE_SUFFIX};
pub use old_value::{extract as extract_old_values, Extraction, OldValueReference};
pub use strategy::{references_result, synthesize_message, ClauseCompiler, ClauseOutput};

/// Result type for clause compilation.
pub type Result<T> = std::result::Result<T, Error>;
