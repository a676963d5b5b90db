//! Priority-ordered classification of raw clauses.

use crate::clause::Clause;

/// Kind of a clause. Exactly one kind is assigned per clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// `Contract.Requires<TException>(...)`
    TypedPrecondition,
    /// `Contract.Requires(...)`
    UntypedPrecondition,
    /// `Contract.Ensures(...)`
    Postcondition,
    /// Anything else; compiled to nothing.
    Unrecognized,
}

impl ClauseKind {
    /// All kinds, highest priority first.
    pub const BY_PRIORITY: [ClauseKind; 4] = [
        ClauseKind::TypedPrecondition,
        ClauseKind::UntypedPrecondition,
        ClauseKind::Postcondition,
        ClauseKind::Unrecognized,
    ];

    pub fn priority(self) -> u8 {
        match self {
            ClauseKind::TypedPrecondition => 100,
            ClauseKind::UntypedPrecondition => 80,
            ClauseKind::Postcondition => 60,
            ClauseKind::Unrecognized => 0,
        }
    }

    /// Prefix a clause must start with to be of this kind.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            ClauseKind::TypedPrecondition => Some("Contract.Requires<"),
            ClauseKind::UntypedPrecondition => Some("Contract.Requires("),
            ClauseKind::Postcondition => Some("Contract.Ensures("),
            ClauseKind::Unrecognized => None,
        }
    }

    pub fn matches(self, text: &str) -> bool {
        match self.marker() {
            Some(marker) => text.starts_with(marker),
            None => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClauseKind::TypedPrecondition => "typed precondition",
            ClauseKind::UntypedPrecondition => "untyped precondition",
            ClauseKind::Postcondition => "postcondition",
            ClauseKind::Unrecognized => "unrecognized",
        }
    }
}

/// Classify a clause: the first kind, by descending priority, whose marker
/// prefixes the clause text.
pub fn classify(clause: &Clause) -> ClauseKind {
    let text = clause.text();
    ClauseKind::BY_PRIORITY
        .into_iter()
        .find(|kind| kind.matches(text))
        .unwrap_or(ClauseKind::Unrecognized)
}
