use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use libemulator::Emulator;
use log::info;

mod command;
mod debugger;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Program image, loaded at address zero
    program_path: PathBuf,

    /// Bytes of memory given to the machine
    #[arg(short, long, default_value_t = libisa::MAX_MEMORY_SIZE)]
    memory_size: usize,

    /// Give up after this many instructions
    #[arg(short = 'c', long)]
    max_cycles: Option<u64>,

    /// Start the interactive step debugger instead of running straight through.
    /// Debugger commands and the program's `getc` share stdin, so input meant for
    /// the program has to be typed at the prompt when a `getc` runs
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let program = fs::read(&args.program_path).with_context(|| {
        format!(
            "Failed to read program file {}",
            args.program_path.display()
        )
    })?;

    let mut emulator = Emulator::new(args.memory_size, program)?;

    if args.debug {
        info!("Debugger and program input both read from stdin");
        debugger::run(&mut emulator)?;
    } else if let Some(max_cycles) = args.max_cycles {
        emulator.execute_steps(max_cycles);
    } else {
        emulator.execute_to_halt();
    }

    let report = emulator.report();

    if emulator.running {
        info!("Stopped with the machine still running");
        eprintln!("Stopped before halting, {}", report);
        return Ok(ExitCode::FAILURE);
    }

    eprintln!("{}", report);

    Ok(if report.faulted {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
