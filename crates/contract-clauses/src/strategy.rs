//! Per-kind compilation of a single clause into a guard statement.

use crate::classify::{classify, ClauseKind};
use crate::clause::Clause;
use crate::member::{GuardStatement, MemberContext, Snapshot};
use crate::naming::Naming;
use crate::old_value;
use crate::scan;

/// Outcome of compiling one clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseOutput {
    pub kind: ClauseKind,
    /// `None` when the clause compiles to nothing.
    pub guard: Option<GuardStatement>,
    /// Whether the guard runs before the delegated call.
    pub is_precondition: bool,
    /// Snapshots the guard depends on, duplicates included.
    pub snapshots: Vec<Snapshot>,
}

impl ClauseOutput {
    fn passthrough(kind: ClauseKind) -> Self {
        Self {
            kind,
            guard: None,
            is_precondition: true,
            snapshots: Vec::new(),
        }
    }
}

/// Compiles clauses in the context of one member.
pub struct ClauseCompiler<'a> {
    member: &'a MemberContext,
    naming: &'a Naming,
}

impl<'a> ClauseCompiler<'a> {
    pub fn new(member: &'a MemberContext, naming: &'a Naming) -> Self {
        Self { member, naming }
    }

    /// Classify `clause` and compile it with the matching strategy.
    pub fn compile(&self, clause: &Clause) -> ClauseOutput {
        self.compile_as(classify(clause), clause)
    }

    pub fn compile_as(&self, kind: ClauseKind, clause: &Clause) -> ClauseOutput {
        if kind == ClauseKind::Unrecognized {
            tracing::debug!(member = %self.member.name, clause = clause.text(), "dropping unrecognized clause");
            return ClauseOutput::passthrough(kind);
        }

        match self.compile_guard(kind, clause) {
            Some(output) => output,
            None => {
                tracing::warn!(
                    member = %self.member.name,
                    clause = clause.text(),
                    kind = kind.as_str(),
                    "malformed contract clause, dropping it"
                );
                ClauseOutput::passthrough(kind)
            }
        }
    }

    fn compile_guard(&self, kind: ClauseKind, clause: &Clause) -> Option<ClauseOutput> {
        let call = clause.call()?;
        if call.arguments.len() > 2 {
            return None;
        }
        let original = call.condition()?;

        let (exception_type, prefix, is_precondition) = match kind {
            ClauseKind::TypedPrecondition => {
                (call.type_argument?.to_string(), "Precondition", !references_result(original))
            }
            ClauseKind::UntypedPrecondition => (
                self.naming.default_exception.clone(),
                "Precondition",
                !references_result(original),
            ),
            ClauseKind::Postcondition => (self.naming.default_exception.clone(), "Postcondition", false),
            ClauseKind::Unrecognized => return None,
        };

        // a requires clause checking the result is placed after the call
        let condition = if is_precondition {
            original.to_string()
        } else {
            self.substitute_result(original)
        };

        let extraction = old_value::extract(&condition);
        let message = match call.message() {
            Some(message) => message.to_string(),
            None => synthesize_message(prefix, original),
        };

        tracing::debug!(
            member = %self.member.name,
            kind = kind.as_str(),
            is_precondition,
            snapshots = extraction.references.len(),
            "compiled clause"
        );

        Some(ClauseOutput {
            kind,
            snapshots: extraction.snapshots(),
            guard: Some(GuardStatement {
                condition: extraction.condition,
                exception_type,
                message,
            }),
            is_precondition,
        })
    }

    fn substitute_result(&self, condition: &str) -> String {
        match self.member.result_reference(self.naming) {
            Some(reference) => {
                let spans = scan::result_placeholders(condition);
                scan::replace_spans(condition, &spans, |_| reference.clone())
            }
            None => condition.to_string(),
        }
    }
}

/// Whether `condition` mentions the return-value placeholder.
pub fn references_result(condition: &str) -> bool {
    !scan::result_placeholders(condition).is_empty()
}

/// `"Precondition (x > 0) is not satisfied!"`, with double quotes in the
/// condition turned into single quotes so the literal stays well formed.
pub fn synthesize_message(prefix: &str, condition: &str) -> String {
    format!("\"{} ({}) is not satisfied!\"", prefix, condition.replace('"', "'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::ReturnType;

    fn compute() -> MemberContext {
        MemberContext::method("Compute", ReturnType::parse("int"))
            .param("x", "int")
            .delegate("_contract")
    }

    #[test]
    fn test_typed_precondition_with_message() {
        let member = compute();
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Requires<ArgumentException>(x < 100, \"x too large\");"));

        assert_eq!(output.kind, ClauseKind::TypedPrecondition);
        assert!(output.is_precondition);
        let guard = output.guard.unwrap();
        assert_eq!(guard.condition, "x < 100");
        assert_eq!(guard.exception_type, "ArgumentException");
        assert_eq!(guard.message, "\"x too large\"");
    }

    #[test]
    fn test_untyped_precondition_synthesizes_message() {
        let member = compute();
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming).compile(&Clause::new("Contract.Requires(x > 0)"));

        let guard = output.guard.unwrap();
        assert_eq!(guard.exception_type, "Exception");
        assert_eq!(guard.message, "\"Precondition (x > 0) is not satisfied!\"");
    }

    #[test]
    fn test_message_quotes_are_normalized() {
        let member = MemberContext::method("Rename", ReturnType::Void)
            .param("name", "string")
            .delegate("_contract");
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Requires<ArgumentException>(name != \"\")"));

        let guard = output.guard.unwrap();
        assert_eq!(guard.condition, "name != \"\"");
        assert_eq!(guard.message, "\"Precondition (name != '') is not satisfied!\"");
    }

    #[test]
    fn test_postcondition_substitutes_result() {
        let member = compute();
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Ensures(Contract.Result<int>() >= 0 && Contract.Result<int>() < 10)"));

        assert!(!output.is_precondition);
        let guard = output.guard.unwrap();
        assert_eq!(guard.condition, "result >= 0 && result < 10");
        assert_eq!(
            guard.message,
            "\"Postcondition (Contract.Result<int>() >= 0 && Contract.Result<int>() < 10) is not satisfied!\""
        );
    }

    #[test]
    fn test_postcondition_generic_result_type() {
        let member = MemberContext::method("Load", ReturnType::parse("List<User>")).delegate("_contract");
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Ensures(Contract.Result<List<User>>() != null)"));

        assert_eq!(output.guard.unwrap().condition, "result != null");
    }

    #[test]
    fn test_postcondition_with_old_value() {
        let member = MemberContext::method("Deposit", ReturnType::parse("decimal"))
            .param("balance", "decimal")
            .param("amount", "decimal")
            .delegate("_contract");
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming).compile(&Clause::new(
            "Contract.Ensures(Contract.OldValue(balance) + amount == Contract.Result<decimal>())",
        ));

        assert_eq!(output.guard.unwrap().condition, "balance_old + amount == result");
        assert_eq!(
            output.snapshots,
            vec![Snapshot {
                identifier: "balance".into(),
                variable: "balance_old".into()
            }]
        );
    }

    #[test]
    fn test_requires_referencing_result_becomes_postcondition() {
        let member = compute();
        let naming = Naming::default();
        let compiler = ClauseCompiler::new(&member, &naming);

        let typed = compiler.compile(&Clause::new(
            "Contract.Requires<InvalidOperationException>(Contract.Result<int>() != x)",
        ));
        assert!(!typed.is_precondition);
        assert_eq!(typed.guard.as_ref().unwrap().condition, "result != x");
        assert_eq!(typed.guard.unwrap().exception_type, "InvalidOperationException");

        let untyped = compiler.compile(&Clause::new("Contract.Requires(Contract.Result<int>() > 0)"));
        assert!(!untyped.is_precondition);
        assert_eq!(untyped.guard.unwrap().condition, "result > 0");
    }

    #[test]
    fn test_void_method_keeps_placeholder() {
        let member = MemberContext::method("Run", ReturnType::Void).delegate("_contract");
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Ensures(Contract.Result<bool>())"));

        assert_eq!(output.guard.unwrap().condition, "Contract.Result<bool>()");
    }

    #[test]
    fn test_setter_result_refers_to_property() {
        let member = MemberContext::setter("Count").delegate("_contract");
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Ensures(Contract.Result<int>() == value)"));

        assert_eq!(output.guard.unwrap().condition, "_contract.Count == value");
    }

    #[test]
    fn test_custom_default_exception() {
        let member = compute();
        let naming = Naming::default().default_exception("ContractException");
        let output = ClauseCompiler::new(&member, &naming).compile(&Clause::new("Contract.Ensures(x > 0)"));

        assert_eq!(output.guard.unwrap().exception_type, "ContractException");
    }

    #[test]
    fn test_unrecognized_passthrough() {
        let member = compute();
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming).compile(&Clause::new("Contract.Invariant(x > 0)"));

        assert_eq!(output.kind, ClauseKind::Unrecognized);
        assert!(output.guard.is_none());
        assert!(output.is_precondition);
        assert!(output.snapshots.is_empty());
    }

    #[test]
    fn test_malformed_recognized_clause_is_dropped() {
        let member = compute();
        let naming = Naming::default();
        let compiler = ClauseCompiler::new(&member, &naming);

        for text in [
            "Contract.Requires(x > 0",
            "Contract.Requires(x > 0, \"a\", \"b\")",
            "Contract.Requires<>(x > 0)",
        ] {
            let output = compiler.compile(&Clause::new(text));
            assert!(output.guard.is_none(), "{}", text);
            assert!(output.is_precondition);
        }
    }

    #[test]
    fn test_references_result() {
        assert!(references_result("Contract.Result<int>() > 0"));
        assert!(references_result("Contract.Result<Dictionary<string, int>>().Count > 0"));
        assert!(references_result("Contract.Result<(int, string)>().Item1 > 0"));
        assert!(!references_result("result > 0"));
        assert!(!references_result("ICodeContract.Result<int>() > 0"));
    }

    #[test]
    fn test_requires_on_tuple_result_runs_after_call() {
        let member = MemberContext::method("Lookup", ReturnType::parse("(int, string)"))
            .param("x", "int")
            .delegate("_contract");
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Requires(Contract.Result<(int, string)>().Item1 != x)"));

        assert!(!output.is_precondition);
        assert_eq!(output.guard.unwrap().condition, "result.Item1 != x");
    }

    #[test]
    fn test_alias_qualified_result_is_substituted() {
        let member = MemberContext::method("Find", ReturnType::parse("global::Sample.User")).delegate("_contract");
        let naming = Naming::default();
        let output = ClauseCompiler::new(&member, &naming)
            .compile(&Clause::new("Contract.Ensures(Contract.Result<global::Sample.User>() != null)"));

        assert_eq!(output.guard.unwrap().condition, "result != null");
    }

    #[test]
    fn test_lookalike_receivers_are_not_rewritten() {
        let member = compute();
        let naming = Naming::default();
        let compiler = ClauseCompiler::new(&member, &naming);

        let requires = compiler.compile(&Clause::new("Contract.Requires(ICodeContract.Result<int>() > x)"));
        assert!(requires.is_precondition);
        assert_eq!(requires.guard.unwrap().condition, "ICodeContract.Result<int>() > x");

        let ensures = compiler.compile(&Clause::new(
            "Contract.Ensures(MyContract.OldValue(x) < Contract.Result<int>())",
        ));
        assert!(ensures.snapshots.is_empty());
        assert_eq!(ensures.guard.unwrap().condition, "MyContract.OldValue(x) < result");
    }
}
