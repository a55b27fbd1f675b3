use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{ArgEnum, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use wabbit_runtime::{
    builtin::{Builtin, BUILTINS},
    call::{parse_calls, Call},
    disassemble::disassemble,
    jit::JIT,
    logging::init_logging,
    profiler::{profile, profile_log},
};

/// Driver for the Wabbit output builtins.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the exported builtins.
    Symbols,

    /// Emit glue calling the builtins and execute it.
    Run {
        /// how the calls get made
        #[clap(short, long, arg_enum, default_value = "cranelift")]
        backend: Backend,
        /// print the emitted machine code to stderr
        #[clap(long)]
        disasm: bool,
        /// print timings to stderr
        #[clap(long)]
        profile: bool,
        /// read calls from this file when none are given
        #[clap(short, long)]
        path: Option<PathBuf>,
        /// calls such as `int:5 float:3.14 bool:0 char:A`
        calls: Vec<String>,
    },
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum Backend {
    Direct,
    Cranelift,
    Dynasm,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Symbols => symbols(),
        Commands::Run {
            backend,
            disasm,
            profile: show_profile,
            path,
            calls,
        } => {
            let calls = get_calls(path, calls)?;
            run(backend, &calls, disasm)?;
            if show_profile {
                profile_log();
            }
        }
    }

    Ok(())
}

fn symbols() {
    for b in Builtin::ALL {
        let (addr, sig) = &BUILTINS[b.name()];
        println!("{:14} {:16} {:#x}", b.name().green(), sig.to_string(), addr);
    }
}

/// Calls from the arguments, else from the file, else from stdin.
fn get_calls(path: Option<PathBuf>, args: Vec<String>) -> anyhow::Result<Vec<Call>> {
    let source = if !args.is_empty() {
        args.join(" ")
    } else if let Some(path) = path {
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?
    } else {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    };
    Ok(parse_calls(&source)?)
}

fn run(backend: Backend, calls: &[Call], disasm: bool) -> anyhow::Result<()> {
    info!(?backend, calls = calls.len(), "run");
    let start = Instant::now();

    match backend {
        Backend::Direct => {
            profile("exec direct", || calls.iter().for_each(Call::invoke));
        }
        Backend::Cranelift => {
            let mut jit = JIT::new()?;
            let compiled = profile("cranelift compile", || jit.compile(calls))?;
            if disasm {
                print_disasm(compiled.code());
            }
            profile("exec cranelift", || compiled.call());
        }
        Backend::Dynasm => run_dynasm(calls, disasm)?,
    }

    info!(elapsed = ?start.elapsed(), "done");
    Ok(())
}

#[cfg(target_arch = "x86_64")]
fn run_dynasm(calls: &[Call], disasm: bool) -> anyhow::Result<()> {
    let built = profile("dynasm assemble", || wabbit_runtime::native::assemble(calls))?;
    if disasm {
        print_disasm(built.code());
    }
    profile("exec dynasm", || built.call());
    Ok(())
}

#[cfg(not(target_arch = "x86_64"))]
fn run_dynasm(_calls: &[Call], _disasm: bool) -> anyhow::Result<()> {
    Err(wabbit_runtime::Error::Unsupported("dynasm").into())
}

fn print_disasm(code: &[u8]) {
    if cfg!(target_arch = "x86_64") {
        for line in disassemble(code) {
            eprintln!("{}", line);
        }
    } else {
        eprintln!("{}", "disassembly is only available on x86-64".yellow());
    }
}
