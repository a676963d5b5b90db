//! Contract proxy generator
//!
//! Reads the description of an interface and the contract clauses of its
//! members, and generates a sealed proxy class that checks those clauses
//! around every call to the wrapped implementation, or the abstract contract
//! class stub those clauses are written in.

pub mod codegen;
pub mod driver;
pub mod error;
pub mod interface;
pub mod naming;

pub use codegen::{BodyKind, CodeGenerator, GeneratedBody};
pub use driver::{CompileOptions, CompileOutput, Compiler, OutputKind};
pub use error::{CompileError, Result};
pub use interface::{InterfaceDecl, MemberDecl, MethodDecl, ParamDecl, PropertyDecl};
