//! Interface descriptions handed over by the source parser.
//!
//! The description is plain JSON: the interface name, its members and the
//! raw contract clauses found in each member of the contract class.

use serde::{Deserialize, Serialize};

use contract_clauses::{Clause, MemberContext, Naming, Parameter, ReturnType};

use crate::error::{CompileError, Result};

/// An interface and the contract clauses of its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    /// Interface name, e.g. `IUserDb`
    pub interface: String,
    /// Contract class the clauses were taken from, e.g. `IUserDb_Contract`
    #[serde(default)]
    pub contract_class: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

/// Interface member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDecl {
    Method(MethodDecl),
    Property(PropertyDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default = "void")]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
    /// Raw clause statements in source order
    #[serde(default)]
    pub clauses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Property with optional accessors; each accessor carries its own clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub getter: Option<Vec<String>>,
    #[serde(default)]
    pub setter: Option<Vec<String>>,
}

fn void() -> String {
    "void".to_string()
}

impl InterfaceDecl {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Reject descriptions the generator cannot produce a class for.
    pub fn validate(&self) -> Result<()> {
        if self.interface.trim().is_empty() {
            return Err(CompileError::semantic("<interface>", "interface name is empty"));
        }

        for member in &self.members {
            match member {
                MemberDecl::Method(method) => method.validate(&self.interface)?,
                MemberDecl::Property(property) => property.validate(&self.interface)?,
            }
        }
        Ok(())
    }
}

impl MethodDecl {
    fn validate(&self, interface: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CompileError::semantic(interface, "method without a name"));
        }
        for param in &self.parameters {
            if param.name.trim().is_empty() || param.type_name.trim().is_empty() {
                return Err(CompileError::semantic(
                    &self.name,
                    "parameter needs both a name and a type",
                ));
            }
        }
        Ok(())
    }

    pub fn context(&self, naming: &Naming) -> MemberContext {
        MemberContext {
            name: self.name.clone(),
            kind: contract_clauses::MemberKind::Method,
            parameters: self
                .parameters
                .iter()
                .map(|p| Parameter::new(&p.name, &p.type_name))
                .collect(),
            return_type: ReturnType::parse(&self.return_type),
            delegate: Some(naming.delegate_field.clone()),
        }
    }

    pub fn clauses(&self) -> Vec<Clause> {
        to_clauses(&self.clauses)
    }
}

impl PropertyDecl {
    fn validate(&self, interface: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CompileError::semantic(interface, "property without a name"));
        }
        if self.type_name.trim().is_empty() {
            return Err(CompileError::semantic(&self.name, "property without a type"));
        }
        if self.getter.is_none() && self.setter.is_none() {
            return Err(CompileError::semantic(
                &self.name,
                "property declares neither a getter nor a setter",
            ));
        }
        Ok(())
    }

    pub fn getter_context(&self, naming: &Naming) -> MemberContext {
        MemberContext::getter(&self.name, &self.type_name).delegate(&naming.delegate_field)
    }

    pub fn setter_context(&self, naming: &Naming) -> MemberContext {
        MemberContext::setter(&self.name).delegate(&naming.delegate_field)
    }
}

/// Clauses keep their index in the member as source position.
pub fn to_clauses(texts: &[String]) -> Vec<Clause> {
    texts
        .iter()
        .enumerate()
        .map(|(position, text)| Clause::at(text, position))
        .collect()
}
