//! Error types for the proxy generator

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid interface description in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    #[error("Semantic error in member '{member}': {message}")]
    Semantic { member: String, message: String },

    #[error("Clause compilation error: {0}")]
    Clause(#[from] contract_clauses::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl CompileError {
    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CompileError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn semantic(member: impl Into<String>, message: impl Into<String>) -> Self {
        CompileError::Semantic {
            member: member.into(),
            message: message.into(),
        }
    }
}
