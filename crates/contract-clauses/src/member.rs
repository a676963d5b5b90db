//! Member signatures and the statements generated for their bodies.

use std::fmt;

use crate::error::Error;
use crate::naming::Naming;
use crate::Result;

/// What kind of interface member a body is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    /// Property `get` accessor.
    Getter,
    /// Property `set` accessor; the incoming value is named `value`.
    Setter,
}

/// Return-type tag of a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Type(String),
}

impl ReturnType {
    /// Parse a return type as written in a signature. Blank means `void`.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "" | "void" => ReturnType::Void,
            other => ReturnType::Type(other.to_string()),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ReturnType::Void)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReturnType::Void => "void",
            ReturnType::Type(name) => name,
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member parameter: identifier plus declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Signature of the member whose body is being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberContext {
    pub name: String,
    pub kind: MemberKind,
    pub parameters: Vec<Parameter>,
    pub return_type: ReturnType,
    /// Expression the delegated call is made on, usually the proxy's field.
    pub delegate: Option<String>,
}

impl MemberContext {
    pub fn method(name: impl Into<String>, return_type: ReturnType) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            parameters: Vec::new(),
            return_type,
            delegate: None,
        }
    }

    pub fn getter(property: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: property.into(),
            kind: MemberKind::Getter,
            parameters: Vec::new(),
            return_type: ReturnType::Type(property_type.into()),
            delegate: None,
        }
    }

    /// Setters return nothing; their result placeholder refers to the
    /// delegate's property after assignment.
    pub fn setter(property: impl Into<String>) -> Self {
        Self {
            name: property.into(),
            kind: MemberKind::Setter,
            parameters: Vec::new(),
            return_type: ReturnType::Void,
            delegate: None,
        }
    }

    pub fn param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    pub fn delegate(mut self, target: impl Into<String>) -> Self {
        self.delegate = Some(target.into());
        self
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// The delegate target, or an error if the caller never supplied one.
    pub fn delegate_target(&self) -> Result<&str> {
        match self.delegate.as_deref().map(str::trim) {
            Some(target) if !target.is_empty() => Ok(target),
            _ => Err(Error::missing_delegate(&self.name)),
        }
    }

    /// Expression invoking the wrapped implementation on `target`.
    pub fn delegated_expression(&self, target: &str) -> String {
        match self.kind {
            MemberKind::Method => {
                let arguments: Vec<&str> = self.parameter_names().collect();
                format!("{}.{}({})", target, self.name, arguments.join(", "))
            }
            MemberKind::Getter => format!("{}.{}", target, self.name),
            MemberKind::Setter => format!("{}.{} = value", target, self.name),
        }
    }

    /// Local declared to hold the delegated call's value, if the member has one.
    pub fn result_variable(&self, naming: &Naming) -> Option<String> {
        match self.kind {
            MemberKind::Method if self.return_type.is_void() => None,
            MemberKind::Method | MemberKind::Getter => Some(naming.result_variable.clone()),
            MemberKind::Setter => None,
        }
    }

    /// Text substituted for the return-value placeholder in postconditions.
    pub fn result_reference(&self, naming: &Naming) -> Option<String> {
        match self.kind {
            MemberKind::Setter => self
                .delegate_target()
                .ok()
                .map(|target| format!("{}.{}", target, self.name)),
            _ => self.result_variable(naming),
        }
    }
}

/// `var <identifier>_old = <identifier>;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub identifier: String,
    pub variable: String,
}

/// `if (!(condition)) throw new ExceptionType(message);`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuardStatement {
    pub condition: String,
    pub exception_type: String,
    /// Message expression, already in source form (a literal or an expression).
    pub message: String,
}

/// One statement of a generated member body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Snapshot(Snapshot),
    Guard(GuardStatement),
    DelegatedCall {
        expression: String,
        /// Result variable the call is assigned to; `None` for a bare call.
        result: Option<String>,
    },
    Return(String),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Snapshot(snapshot) => {
                write!(f, "var {} = {};", snapshot.variable, snapshot.identifier)
            }
            Statement::Guard(guard) => write!(
                f,
                "if (!({})) throw new {}({});",
                guard.condition, guard.exception_type, guard.message
            ),
            Statement::DelegatedCall {
                expression,
                result: Some(result),
            } => write!(f, "var {} = {};", result, expression),
            Statement::DelegatedCall {
                expression,
                result: None,
            } => write!(f, "{};", expression),
            Statement::Return(value) => write!(f, "return {};", value),
        }
    }
}
