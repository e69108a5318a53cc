use std::fmt::Display;

use bitflags::bitflags;
use thiserror::Error;

use crate::{Register, Word};

pub const PAYLOAD_BITS: u32 = 14;
pub const PAYLOAD_MASK: Word = (1 << PAYLOAD_BITS) - 1;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OperandFlags: Word {
        /// Payload names a register instead of being a value or address.
        const REGISTER = 1 << 15;
        /// Follow the resolved value as a memory address.
        const DEREF    = 1 << 14;
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OperandError {
    #[error("Payload {0:#x} doesn't fit into 14 bits")]
    PayloadTooWide(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Immediate,
    Register,
    Memory,
    RegisterIndirect,
}

/// A 16-bit operand field: two flag bits on top of a 14-bit payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand(Word);

impl Operand {
    pub fn immediate(value: u16) -> Result<Self, OperandError> {
        Self::with_payload(OperandFlags::empty(), value)
    }

    /// Memory operand addressing `address` directly. Addresses above 14 bits must go through a register.
    pub fn memory(address: u16) -> Result<Self, OperandError> {
        Self::with_payload(OperandFlags::DEREF, address)
    }

    pub const fn register(register: Register) -> Self {
        Self(OperandFlags::REGISTER.bits() | register.index() as Word)
    }

    /// Memory operand addressing whatever `register` holds.
    pub const fn register_indirect(register: Register) -> Self {
        Self(OperandFlags::REGISTER.bits() | OperandFlags::DEREF.bits() | register.index() as Word)
    }

    /// Field that isn't resolved through addressing modes, like a jump condition or an extend target width.
    pub const fn raw(word: Word) -> Self {
        Self(word)
    }

    pub const fn word(self) -> Word {
        self.0
    }

    pub fn flags(self) -> OperandFlags {
        OperandFlags::from_bits_truncate(self.0)
    }

    pub const fn payload(self) -> Word {
        self.0 & PAYLOAD_MASK
    }

    pub fn mode(self) -> AddressingMode {
        let flags = self.flags();

        match (
            flags.contains(OperandFlags::REGISTER),
            flags.contains(OperandFlags::DEREF),
        ) {
            (false, false) => AddressingMode::Immediate,
            (true, false) => AddressingMode::Register,
            (false, true) => AddressingMode::Memory,
            (true, true) => AddressingMode::RegisterIndirect,
        }
    }

    fn with_payload(flags: OperandFlags, payload: u16) -> Result<Self, OperandError> {
        if payload > PAYLOAD_MASK {
            return Err(OperandError::PayloadTooWide(payload));
        }

        Ok(Self(flags.bits() | payload))
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let payload = self.payload();
        let register = Register::from_index(payload);

        match (self.mode(), register) {
            (AddressingMode::Immediate, _) => write!(f, "#{}", payload),
            (AddressingMode::Memory, _) => write!(f, "[{:#06x}]", payload),
            (AddressingMode::Register, Some(register)) => write!(f, "%{}", register),
            (AddressingMode::RegisterIndirect, Some(register)) => write!(f, "[%{}]", register),
            (AddressingMode::Register, None) => write!(f, "%<{}>", payload),
            (AddressingMode::RegisterIndirect, None) => write!(f, "[%<{}>]", payload),
        }
    }
}
