//! Contract proxy compiler CLI

use std::path::PathBuf;
use std::process;

use clap::Parser;
use contract_clauses::Naming;
use contract_proxy::{CompileOptions, Compiler, OutputKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "contractc")]
#[command(about = "Generates contract-checking proxy classes from interface contract descriptions")]
#[command(version)]
struct Args {
    /// Interface description (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output directory for the generated class; prints to stdout when absent
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Generate the contract class stub instead of the proxy
    #[arg(long)]
    contract_class: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Field holding the wrapped implementation
    #[arg(long, value_name = "NAME", default_value = "_contract")]
    delegate_field: String,

    /// Local variable receiving the delegated call's result
    #[arg(long, value_name = "NAME", default_value = "result")]
    result_var: String,

    /// Exception thrown by clauses that do not declare one
    #[arg(long, value_name = "TYPE", default_value = "Exception")]
    default_exception: String,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Compilation failed: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let naming = Naming::default()
        .delegate_field(args.delegate_field)
        .result_variable(args.result_var)
        .default_exception(args.default_exception);

    let kind = if args.contract_class {
        OutputKind::ContractClass
    } else {
        OutputKind::Proxy
    };

    let mut options = CompileOptions::new(args.input)
        .verbose(args.verbose)
        .naming(naming)
        .kind(kind);

    if let Some(output) = args.output {
        options = options.output_dir(output);
    }

    let output = Compiler::new(options).compile()?;

    match &output.written_to {
        Some(path) => {
            if args.verbose {
                eprintln!("Compilation successful!");
                eprintln!("  Source: {}", output.source_file.display());
                eprintln!("  Class: {} ({} member bodies)", output.class_name, output.bodies.len());
            }
            println!("{}", path.display());
        }
        None => print!("{}", output.csharp),
    }

    Ok(())
}
