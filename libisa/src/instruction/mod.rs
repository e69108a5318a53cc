use std::fmt::Display;

use kind::InstructionKind;
use thiserror::Error;

use crate::{operand::Operand, Width};

pub mod assembler;
pub mod kind;

#[cfg(test)]
mod tests;

pub const OPCODE_BITS: u32 = 6;
pub const OPCODE_MASK: u8 = (1 << OPCODE_BITS) - 1;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("{kind} takes {expected} operands, got {actual}")]
    OperandCountMismatch {
        kind: InstructionKind,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InstructionDeassemblyError {
    #[error("Unrecognized opcode {0}")]
    UnrecognizedOpcode(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub width: Width,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub const fn new(kind: InstructionKind) -> Self {
        Self {
            kind,
            width: Width::W1,
            operands: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn with_operand(mut self, operand: Operand) -> Self {
        self.operands.push(operand);
        self
    }

    pub fn with_operands<I>(mut self, operands: I) -> Self
    where
        I: IntoIterator<Item = Operand>,
    {
        self.operands.extend(operands);
        self
    }

    pub fn opcode_byte(&self) -> u8 {
        self.width.code() << OPCODE_BITS | self.kind.opcode()
    }

    pub fn encoded_len(&self) -> usize {
        1 + self.kind.operand_count() * crate::BYTES_PER_WORD
    }

    pub fn assemble(&self) -> Result<Vec<u8>, AssemblyError> {
        let expected = self.kind.operand_count();
        if self.operands.len() != expected {
            return Err(AssemblyError::OperandCountMismatch {
                kind: self.kind,
                expected,
                actual: self.operands.len(),
            });
        }

        let mut output = Vec::with_capacity(self.encoded_len());
        output.push(self.opcode_byte());
        output.extend(
            self.operands
                .iter()
                .flat_map(|operand| crate::word_to_bytes(operand.word())),
        );

        Ok(output)
    }

    /// Splits an opcode byte into its kind and width. Operands are read separately.
    pub fn deassemble_opcode_byte(
        byte: u8,
    ) -> Result<(InstructionKind, Width), InstructionDeassemblyError> {
        let opcode = byte & OPCODE_MASK;

        let kind = InstructionKind::from_opcode(opcode)
            .ok_or(InstructionDeassemblyError::UnrecognizedOpcode(opcode))?;

        // Two bits can only ever hold a valid width code.
        let width = Width::from_code(byte >> OPCODE_BITS).unwrap_or(Width::W1);

        Ok((kind, width))
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind, self.width)?;

        for (index, operand) in self.operands.iter().enumerate() {
            let separator = if index == 0 { " " } else { ", " };
            f.write_str(separator)?;

            match (self.kind, index) {
                (InstructionKind::Jmp, 0) => {
                    match crate::condition::Condition::from_code(operand.word()) {
                        Some(condition) => write!(f, "{}", condition)?,
                        None => write!(f, "<{}>", operand.word())?,
                    }
                }
                (InstructionKind::Sxu | InstructionKind::Sxi, 2) => {
                    write!(f, "{}", operand.word())?
                }
                _ => write!(f, "{}", operand)?,
            }
        }

        Ok(())
    }
}
