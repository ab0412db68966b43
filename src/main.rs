use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use micro86_core::{Cpu, Machine, StdInput, StdOutput, Step};
use tracing_subscriber::prelude::*;

mod loader;
mod report;

#[derive(Debug, Parser)]
#[command(name = "micro86", about = "Micro86 instruction-set emulator")]
struct Args {
    /// Program image: hexadecimal 32-bit words, one per memory cell.
    image: PathBuf,

    /// Print the register file after every executed step.
    #[arg(short, long)]
    trace: bool,

    /// Print a post-mortem register and memory dump after the run.
    #[arg(short, long)]
    dump: bool,
}

fn main() -> Result<()> {
    let stderr_format = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    tracing_subscriber::registry().with(stderr_format).init();

    let args = Args::parse();

    println!("================================");
    println!("Micro86 Emulator version 1.0");
    println!("================================");
    println!("Executable file: {}", args.image.display());

    let text = fs::read_to_string(&args.image)
        .with_context(|| format!("failed to read '{}'", args.image.display()))?;
    let image = loader::parse_image(&text)?;

    let mut machine = Machine::new();
    machine
        .load_image(&image)
        .context("program image does not fit in memory")?;

    println!("{}", report::listing(&machine));
    if args.trace {
        println!("===== Execution Trace =====");
        println!("{}", report::memory_dump(&machine));
    }

    let stdin = io::stdin();
    let mut cpu = Cpu::new(
        machine,
        StdInput::new(stdin.lock()),
        StdOutput::new(io::stdout()),
    );

    tracing::info!("starting fetch-execute loop");
    loop {
        let step = cpu.step().context("execution failed")?;
        if args.trace {
            println!("{}", report::registers_line(cpu.machine()));
        }
        if let Step::Halted = step {
            break;
        }
    }

    println!("{}", report::registers_line(cpu.machine()));
    println!("{}", report::memory_dump(cpu.machine()));

    if args.dump {
        println!("{}", report::post_mortem(cpu.machine()));
    }
    Ok(())
}
