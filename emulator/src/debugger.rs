use std::io::Write;

use libdeassembler::Deassembler;
use libemulator::{io::HostIo, Emulator};
use libisa::Width;

use crate::command::{Command, CommandError, Number};


const DUMP_ROW_BYTES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Prompts for commands until `q` or the end of stdin.
pub fn run<H>(emulator: &mut Emulator<H>) -> anyhow::Result<()>
where
    H: HostIo,
{
    let mut stdout = std::io::stdout();

    loop {
        print_status(&mut stdout, emulator)?;

        let Some(command) = Command::prompt()? else {
            return Ok(());
        };

        match execute_command(&command, emulator, &mut stdout) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(e) => eprintln!("!> {}", e),
        }
    }
}

pub fn execute_command<H, W>(
    command: &Command,
    emulator: &mut Emulator<H>,
    out: &mut W,
) -> anyhow::Result<Flow>
where
    H: HostIo,
    W: Write,
{
    let mut args = command.args();

    let name = match args.next() {
        Ok(name) => name,
        // Blank line
        Err(CommandError::MissingArgument(_)) => return Ok(Flow::Continue),
        Err(e) => return Err(e.into()),
    };

    match name {
        "s" => {
            let Number(count) = args.next_parsed_or(Number(1))?;
            args.finish()?;

            let executed = emulator.execute_steps(count);
            writeln!(out, "Executed {} instructions", executed)?;
        }
        "r" => {
            args.finish()?;

            let report = emulator.execute_to_halt();
            writeln!(out, "{}", report)?;
        }
        "regs" => {
            args.finish()?;
            print_registers(out, emulator)?;
        }
        "d" => {
            let Number(begin) = args.next_parsed()?;
            let Number(len) = args.next_parsed_or(Number(DUMP_ROW_BYTES as u64))?;
            args.finish()?;

            print_dump(out, emulator, begin as usize, len as usize)?;
        }
        "i" => {
            args.finish()?;

            let pc = emulator.pc() as usize;
            let code = emulator.memory.as_slice().get(pc..).unwrap_or_default();

            let mut deassembler = Deassembler::starting_at(code.iter(), pc);
            writeln!(out, "{:#06x}: {}", pc, deassembler.deassemble_instruction_text())?;
        }
        "q" => {
            args.finish()?;
            return Ok(Flow::Quit);
        }
        _ => return Err(CommandError::UnknownCommand(name.to_string()).into()),
    }

    Ok(Flow::Continue)
}

fn print_status<H, W>(out: &mut W, emulator: &Emulator<H>) -> std::io::Result<()>
where
    H: HostIo,
    W: Write,
{
    if emulator.running {
        writeln!(
            out,
            "<<<   PC: {:#06x}, SP: {:#06x}, {} cycles   >>>",
            emulator.pc(),
            emulator.stack_pointer(),
            emulator.cycles
        )
    } else {
        writeln!(out, "<<<   {}   >>>", emulator.report())
    }
}

fn print_registers<H, W>(out: &mut W, emulator: &Emulator<H>) -> std::io::Result<()>
where
    H: HostIo,
    W: Write,
{
    for (register, value) in emulator.reg_file.iter() {
        writeln!(out, "%{} = {:#018x}", register, value.unsigned(Width::W8))?;
    }

    let flags = emulator.alu.flags;
    writeln!(out, "equal = {}, less = {}", flags.equal, flags.less)
}

fn print_dump<H, W>(
    out: &mut W,
    emulator: &Emulator<H>,
    begin: usize,
    len: usize,
) -> anyhow::Result<()>
where
    H: HostIo,
    W: Write,
{
    let bytes = emulator.memory.bytes(begin, len).ok_or_else(|| {
        anyhow::anyhow!(
            "Dump of {} bytes at {:#06x} exceeds {} bytes of memory",
            len,
            begin,
            emulator.memory.len()
        )
    })?;

    for (row, chunk) in bytes.chunks(DUMP_ROW_BYTES).enumerate() {
        let hex = chunk
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<Vec<_>>()
            .join(" ");

        writeln!(out, "{:#06x}: {}", begin + row * DUMP_ROW_BYTES, hex)?;
    }

    Ok(())
}
