//! Error types for clause compilation.

use thiserror::Error;

/// Errors surfaced while assembling a member body.
///
/// Unrecognized clauses and unsupported old-value references are not errors;
/// they are elided or left untouched during compilation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Member '{member}' has no delegate target to call")]
    MissingDelegate { member: String },
}

impl Error {
    pub fn missing_delegate(member: impl Into<String>) -> Self {
        Error::MissingDelegate {
            member: member.into(),
        }
    }
}
