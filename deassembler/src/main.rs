use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use libdeassembler::Deassembler;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Program image to list
    program_path: PathBuf,

    /// Byte offset to start decoding from
    #[arg(short, long, default_value_t = 0)]
    offset: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let program = fs::read(&args.program_path).with_context(|| {
        format!(
            "Error reading program file {}",
            args.program_path.display()
        )
    })?;

    let code = program.get(args.offset..).unwrap_or_default();

    let deassembler = Deassembler::starting_at(code.iter(), args.offset);
    print!("{}", deassembler.deassemble_text());

    Ok(())
}
