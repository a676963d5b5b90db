//! Extraction of `Contract.OldValue(x)` references.
//!
//! Only bare identifiers are recognized. `Contract.OldValue(a.b)` and other
//! compound arguments are left in the condition untouched.

use std::ops::Range;

use crate::member::Snapshot;
use crate::naming::snapshot_variable;
use crate::scan;

/// One old-value reference found in a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OldValueReference {
    /// Byte span of the reference in the original condition.
    pub span: Range<usize>,
    pub text: String,
    pub identifier: String,
    /// `<identifier>_old`
    pub variable: String,
}

impl OldValueReference {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            identifier: self.identifier.clone(),
            variable: self.variable.clone(),
        }
    }
}

/// References found in a condition plus the rewritten condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// In first-occurrence order, duplicates included.
    pub references: Vec<OldValueReference>,
    pub condition: String,
}

impl Extraction {
    /// One snapshot per reference. Deduplication is left to the caller.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.references.iter().map(OldValueReference::snapshot).collect()
    }
}

/// Find every old-value reference in `condition` and replace each with its
/// snapshot variable.
pub fn extract(condition: &str) -> Extraction {
    let spans = scan::old_value_references(condition);

    let references: Vec<OldValueReference> = spans
        .iter()
        .map(|found| {
            let identifier = &condition[found.identifier.clone()];
            OldValueReference {
                span: found.whole.clone(),
                text: condition[found.whole.clone()].to_string(),
                identifier: identifier.to_string(),
                variable: snapshot_variable(identifier),
            }
        })
        .collect();

    let wholes: Vec<Range<usize>> = spans.into_iter().map(|found| found.whole).collect();
    let mut variables = references.iter().map(|r| r.variable.clone());
    let condition = scan::replace_spans(condition, &wholes, |_| variables.next().unwrap_or_default());

    Extraction {
        references,
        condition,
    }
}
