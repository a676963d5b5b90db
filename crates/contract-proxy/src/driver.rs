//! Compiler driver that orchestrates proxy generation

use std::path::{Path, PathBuf};

use contract_clauses::Naming;

use crate::codegen::{CodeGenerator, GeneratedBody};
use crate::error::{CompileError, Result};
use crate::interface::InterfaceDecl;
use crate::naming::{contract_class_name, contract_file_name, default_proxy_file, proxy_class_name, proxy_file_name};

/// Compilation output structure
pub struct CompileOutput {
    /// Interface description that was compiled
    pub source_file: PathBuf,
    /// Interface the proxy implements
    pub interface: String,
    /// What was generated
    pub kind: OutputKind,
    /// Generated class name
    pub class_name: String,
    /// File name the class is (or would be) written to
    pub file_name: String,
    /// Generated C# source
    pub csharp: String,
    /// Compiled member bodies, in member order; empty for contract classes
    pub bodies: Vec<GeneratedBody>,
    /// Path written, when an output directory was given
    pub written_to: Option<PathBuf>,
}

/// Class generated from an interface description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// Sealed proxy checking the clauses around each call
    #[default]
    Proxy,
    /// Abstract contract class stub the clauses are written in
    ContractClass,
}

/// Options for compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Input interface description (JSON)
    pub input: PathBuf,
    /// Output directory; when absent nothing is written
    pub output_dir: Option<PathBuf>,
    /// Log pipeline progress at info level instead of debug
    pub verbose: bool,
    /// Identifiers synthesized into generated bodies
    pub naming: Naming,
    pub kind: OutputKind,
}

impl CompileOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: None,
            verbose: false,
            naming: Naming::default(),
            kind: OutputKind::Proxy,
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    pub fn kind(mut self, kind: OutputKind) -> Self {
        self.kind = kind;
        self
    }
}

/// The proxy compiler
pub struct Compiler {
    options: CompileOptions,
}

macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Read, compile and (optionally) write the proxy for the input file
    pub fn compile(&self) -> Result<CompileOutput> {
        let source = self.read_source()?;
        let mut output = self.compile_source(&source)?;

        if let Some(dir) = &self.options.output_dir {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(&output.file_name);
            std::fs::write(&path, &output.csharp)?;
            progress!(self.options.verbose, path = %path.display(), class = %output.class_name, "wrote class");
            output.written_to = Some(path);
        }

        Ok(output)
    }

    /// Compile an interface description held in memory
    pub fn compile_source(&self, source: &str) -> Result<CompileOutput> {
        let decl = InterfaceDecl::from_json(source)
            .map_err(|e| CompileError::parse(&self.options.input, e.to_string()))?;
        decl.validate()?;

        progress!(
            self.options.verbose,
            interface = %decl.interface,
            members = decl.members.len(),
            "compiling interface"
        );

        let mut generator = CodeGenerator::new(self.options.naming.clone());
        let (csharp, class_name) = match self.options.kind {
            OutputKind::Proxy => (
                generator.generate(&decl)?,
                proxy_class_name(&decl.interface, decl.contract_class.as_deref()),
            ),
            OutputKind::ContractClass => (
                generator.generate_contract_class(&decl)?,
                decl
                    .contract_class
                    .clone()
                    .unwrap_or_else(|| contract_class_name(&decl.interface)),
            ),
        };
        let bodies = generator.bodies().to_vec();

        progress!(
            self.options.verbose,
            bodies = bodies.len(),
            bytes = csharp.len(),
            "code generation successful"
        );

        Ok(CompileOutput {
            source_file: self.options.input.clone(),
            kind: self.options.kind,
            class_name,
            file_name: output_file_name(&self.options.input, &decl.interface, self.options.kind),
            interface: decl.interface,
            csharp,
            bodies,
            written_to: None,
        })
    }

    /// Read the source file
    fn read_source(&self) -> Result<String> {
        if !self.options.input.exists() {
            return Err(CompileError::FileNotFound(self.options.input.clone()));
        }

        std::fs::read_to_string(&self.options.input).map_err(CompileError::from)
    }
}

/// `IUserDb.contract.json` -> `IUserDb.proxy.cs` (or `IUserDb.contract.cs`);
/// other inputs are named after the interface.
fn output_file_name(input: &Path, interface: &str, kind: OutputKind) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|stem| stem.ends_with(".contract"));

    match (kind, stem) {
        (OutputKind::Proxy, Some(stem)) => format!("{}.cs", proxy_file_name(stem)),
        (OutputKind::Proxy, None) => default_proxy_file(interface),
        (OutputKind::ContractClass, Some(stem)) => format!("{}.cs", stem),
        (OutputKind::ContractClass, None) => contract_file_name(interface),
    }
}
