use libisa::{
    instruction::{kind::InstructionKind, Instruction, InstructionDeassemblyError},
    Address, Width,
};
use log::{info, trace, warn};
use thiserror::Error;

use crate::{io::HostIo, Emulator};

mod handlers;
mod resolve;
mod stack;

pub use resolve::Location;


pub const HALT_MESSAGE: &str = "CPU halted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOk {
    Normal,
    Halted,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecuteErr {
    #[error("Memory access violation at {addr:#06x} ({width} bytes)")]
    MemoryAccessViolation { addr: Address, width: Width },

    #[error("Invalid register index {0}")]
    InvalidRegister(u16),

    #[error("Immediate operand {0:#06x} used as a write target")]
    ImmediateWrite(u16),

    #[error("Illegal instruction ({0})")]
    IllegalInstruction(#[from] InstructionDeassemblyError),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid jump condition {0}")]
    InvalidCondition(u16),

    #[error("Invalid size used in instruction: SXD/SXI")]
    InvalidExtendWidth(u16),

    #[error("Output error: {0}")]
    Output(String),

    #[error("CPU is not running")]
    NotRunning,
}

impl<H> Emulator<H>
where
    H: HostIo,
{
    /// Runs until the machine halts or faults.
    pub fn execute_to_halt(&mut self) -> crate::Report {
        while self.running {
            // Failures are recorded on the machine itself.
            let _ = self.execute_instruction();
        }

        self.report()
    }

    /// Executes at most `count` instructions, returning how many ran.
    pub fn execute_steps(&mut self, count: u64) -> u64 {
        let mut executed = 0;

        while self.running && executed < count {
            let _ = self.execute_instruction();
            executed += 1;
        }

        executed
    }

    /// Fetches, decodes and executes one instruction. Any error stops the machine for good.
    pub fn execute_instruction(&mut self) -> Result<ExecuteOk, ExecuteErr> {
        if !self.running {
            return Err(ExecuteErr::NotRunning);
        }

        let result = self.fetch_and_execute();

        match &result {
            Ok(ExecuteOk::Normal) => {}
            Ok(ExecuteOk::Halted) => {
                info!("CPU halted after {} cycles", self.cycles);
                self.stop(HALT_MESSAGE.to_string(), false);
            }
            Err(e) => {
                warn!("CPU panicked at cycle {}: {}", self.cycles, e);
                self.stop(e.to_string(), true);
            }
        }

        result
    }

    fn fetch_and_execute(&mut self) -> Result<ExecuteOk, ExecuteErr> {
        let pc = self.pc();
        let (kind, width) = self.fetch_opcode()?;

        trace!("{:#06x}: {}{}", pc, kind, width);

        self.execute_decoded(kind, width)
    }

    fn fetch_opcode(&mut self) -> Result<(InstructionKind, Width), ExecuteErr> {
        let pc = self.pc();
        let byte = self.read_memory(pc, Width::W1)?.unsigned(Width::W1) as u8;

        self.cycles += 1;
        self.set_pc(pc.wrapping_add(1));

        Ok(Instruction::deassemble_opcode_byte(byte)?)
    }

    fn stop(&mut self, message: String, faulted: bool) {
        self.running = false;
        self.faulted = faulted;
        self.panic_message = Some(message);
    }
}
