//! Assembly of a complete member body from its clauses.
//!
//! The body always has the shape
//!
//! ```text
//! snapshots ++ preconditions ++ delegated call ++ postconditions ++ return
//! ```
//!
//! with the delegated call appearing exactly once.

use std::collections::HashSet;

use crate::clause::Clause;
use crate::member::{GuardStatement, MemberContext, Snapshot, Statement};
use crate::naming::Naming;
use crate::strategy::ClauseCompiler;
use crate::Result;

/// Ordered statements generated for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMember {
    statements: Vec<Statement>,
}

impl CompiledMember {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// Index of the delegated call within [`statements`](Self::statements).
    pub fn call_index(&self) -> usize {
        self.statements
            .iter()
            .position(|s| matches!(s, Statement::DelegatedCall { .. }))
            .unwrap_or(0)
    }

    pub fn preconditions(&self) -> impl Iterator<Item = &GuardStatement> {
        self.statements[..self.call_index()].iter().filter_map(as_guard)
    }

    pub fn postconditions(&self) -> impl Iterator<Item = &GuardStatement> {
        self.statements[self.call_index()..].iter().filter_map(as_guard)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        })
    }
}

fn as_guard(statement: &Statement) -> Option<&GuardStatement> {
    match statement {
        Statement::Guard(guard) => Some(guard),
        _ => None,
    }
}

/// Builds member bodies. Holds no per-member state, so one assembler can be
/// reused across members and threads.
#[derive(Debug, Clone, Default)]
pub struct MemberBodyAssembler {
    naming: Naming,
}

impl MemberBodyAssembler {
    pub fn new(naming: Naming) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    /// Compile `clauses` around the delegated call for `member`.
    ///
    /// Fails only when `member` has no delegate target.
    pub fn assemble(&self, member: &MemberContext, clauses: &[Clause]) -> Result<CompiledMember> {
        let target = member.delegate_target()?;

        let mut ordered: Vec<&Clause> = clauses.iter().collect();
        ordered.sort_by_key(|clause| clause.position());

        let compiler = ClauseCompiler::new(member, &self.naming);
        let mut seen = HashSet::new();
        let mut snapshots = Vec::new();
        let mut preconditions = Vec::new();
        let mut postconditions = Vec::new();

        for clause in ordered {
            let output = compiler.compile(clause);

            for snapshot in output.snapshots {
                if seen.insert(snapshot.identifier.clone()) {
                    snapshots.push(Statement::Snapshot(snapshot));
                }
            }

            if let Some(guard) = output.guard {
                if output.is_precondition {
                    preconditions.push(Statement::Guard(guard));
                } else {
                    postconditions.push(Statement::Guard(guard));
                }
            }
        }

        let result = member.result_variable(&self.naming);
        let call = Statement::DelegatedCall {
            expression: member.delegated_expression(target),
            result: result.clone(),
        };

        tracing::debug!(
            member = %member.name,
            snapshots = snapshots.len(),
            preconditions = preconditions.len(),
            postconditions = postconditions.len(),
            "assembled member body"
        );

        let mut statements = snapshots;
        statements.append(&mut preconditions);
        statements.push(call);
        statements.append(&mut postconditions);
        if let Some(result) = result {
            statements.push(Statement::Return(result));
        }

        Ok(CompiledMember { statements })
    }
}

/// Assemble with a one-off assembler.
pub fn assemble(member: &MemberContext, clauses: &[Clause], naming: &Naming) -> Result<CompiledMember> {
    MemberBodyAssembler::new(naming.clone()).assemble(member, clauses)
}
