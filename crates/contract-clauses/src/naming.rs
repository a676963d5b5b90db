//! Identifiers synthesized into generated member bodies.

/// Suffix appended to an argument name to form its snapshot variable.
pub const OLD_VALUE_SUFFIX: &str = "_old";

/// Names the generator invents when it builds a member body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Field holding the wrapped implementation (`_contract`).
    pub delegate_field: String,
    /// Local that receives the delegated call's return value (`result`).
    pub result_variable: String,
    /// Exception thrown by guards that do not declare their own type.
    pub default_exception: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            delegate_field: "_contract".to_string(),
            result_variable: "result".to_string(),
            default_exception: "Exception".to_string(),
        }
    }
}

impl Naming {
    pub fn delegate_field(mut self, name: impl Into<String>) -> Self {
        self.delegate_field = name.into();
        self
    }

    pub fn result_variable(mut self, name: impl Into<String>) -> Self {
        self.result_variable = name.into();
        self
    }

    pub fn default_exception(mut self, name: impl Into<String>) -> Self {
        self.default_exception = name.into();
        self
    }
}

/// Snapshot variable for an argument: `balance` -> `balance_old`.
pub fn snapshot_variable(identifier: &str) -> String {
    format!("{}{}", identifier, OLD_VALUE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_naming() {
        let naming = Naming::default();
        assert_eq!(naming.delegate_field, "_contract");
        assert_eq!(naming.result_variable, "result");
        assert_eq!(naming.default_exception, "Exception");
    }

    #[test]
    fn test_naming_builder() {
        let naming = Naming::default()
            .delegate_field("_inner")
            .result_variable("retVal")
            .default_exception("InvalidOperationException");

        assert_eq!(naming.delegate_field, "_inner");
        assert_eq!(naming.result_variable, "retVal");
        assert_eq!(naming.default_exception, "InvalidOperationException");
    }

    #[test]
    fn test_snapshot_variable() {
        assert_eq!(snapshot_variable("balance"), "balance_old");
    }
}
