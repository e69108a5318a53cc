use std::fmt::Display;

use alu::ALU;
use anyhow::bail;
use io::{HostIo, StdHostIo};
use libisa::{Address, Register, POINTER_WIDTH};
use log::debug;
use memory::Memory;
use regfile::RegFile;

pub mod alu;
pub mod execute;
pub mod io;
pub mod memory;
pub mod regfile;
pub mod value;

/// Interpreter state. Owned by whoever drives the execution loop, nothing in here is shared.
pub struct Emulator<H = StdHostIo>
where
    H: HostIo,
{
    pub memory: Memory,
    pub reg_file: RegFile,
    pub alu: ALU,
    pub io: H,

    pub cycles: u64,
    pub running: bool,
    /// Set exactly once, when the machine stops.
    pub panic_message: Option<String>,
    faulted: bool,
}

/// What a stopped machine reports back to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub faulted: bool,
    pub message: Option<String>,
    pub cycles: u64,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} after {} cycles",
            self.message.as_deref().unwrap_or("Still running"),
            self.cycles
        )
    }
}

impl Emulator<StdHostIo> {
    pub fn new(memory_size: usize, program: Vec<u8>) -> anyhow::Result<Self> {
        Self::with_io(memory_size, program, StdHostIo::new())
    }
}

impl<H> Emulator<H>
where
    H: HostIo,
{
    /// Loads `program` at address zero of a zeroed memory of `memory_size` bytes.
    pub fn with_io(memory_size: usize, program: Vec<u8>, io: H) -> anyhow::Result<Self> {
        if memory_size > libisa::MAX_MEMORY_SIZE {
            bail!(
                "Memory size {} exceeds the {} byte address space",
                memory_size,
                libisa::MAX_MEMORY_SIZE
            );
        }

        if program.len() > memory_size {
            bail!("Program doesn't fit into memory of specified size");
        }

        debug!(
            "Loading {} byte program into {} bytes of memory",
            program.len(),
            memory_size
        );

        let mut memory_data = program;
        memory_data.resize(memory_size, 0);

        Ok(Self {
            memory: Memory::new(memory_data),
            reg_file: RegFile::new(),
            alu: ALU::new(),
            io,
            cycles: 0,
            running: true,
            panic_message: None,
            faulted: false,
        })
    }

    /// Whether the machine stopped for any reason other than `halt`.
    pub fn faulted(&self) -> bool {
        self.faulted
    }

    pub fn report(&self) -> Report {
        Report {
            faulted: self.faulted,
            message: self.panic_message.clone(),
            cycles: self.cycles,
        }
    }

    pub fn pc(&self) -> Address {
        self.reg_file.register(Register::Cur).unsigned(POINTER_WIDTH) as Address
    }

    pub fn set_pc(&mut self, pc: Address) {
        self.reg_file
            .register_mut(Register::Cur)
            .set(POINTER_WIDTH, pc as u64);
    }
}
