use std::iter::Peekable;

use libisa::{
    instruction::{Instruction, InstructionDeassemblyError},
    operand::Operand,
    Word,
};
use thiserror::Error;


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeassemblyError {
    #[error("<out of deassembler bounds>")]
    OutOfBounds,

    #[error("<{0}>")]
    Opcode(#[from] InstructionDeassemblyError),

    #[error("<incomplete {kind}: {found} of {expected} operands>")]
    IncompleteOperands {
        kind: String,
        expected: usize,
        found: usize,
    },
}

pub struct Deassembler<'a, I>
where
    I: Iterator<Item = &'a u8>,
{
    code_iter: Peekable<I>,
    offset: usize,
}

impl<'a, I> Deassembler<'a, I>
where
    I: Iterator<Item = &'a u8>,
{
    pub fn new(code_iter: I) -> Self {
        Self::starting_at(code_iter, 0)
    }

    /// Only affects the addresses printed in listings.
    pub fn starting_at(code_iter: I, offset: usize) -> Self {
        Self {
            code_iter: code_iter.peekable(),
            offset,
        }
    }

    /// Address of the next byte to be decoded.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn deassemble(mut self) -> Result<Vec<(usize, Instruction)>, DeassemblyError> {
        let mut output = Vec::new();

        while self.code_iter.peek().is_some() {
            let offset = self.offset;
            output.push((offset, self.deassemble_instruction()?));
        }

        Ok(output)
    }

    /// One `address: instruction` line per instruction. Decoding stops at the first
    /// malformed instruction, which is printed in place of the rest.
    pub fn deassemble_text(mut self) -> String {
        let mut output = String::new();

        while self.code_iter.peek().is_some() {
            let offset = self.offset;
            let line = self.deassemble_instruction_text();
            let failed = line.starts_with('<');

            output.push_str(&format!("{:#06x}: {}\n", offset, line));

            if failed {
                break;
            }
        }

        output
    }

    pub fn deassemble_instruction(&mut self) -> Result<Instruction, DeassemblyError> {
        let opcode_byte = *self.next_byte().ok_or(DeassemblyError::OutOfBounds)?;
        let (kind, width) = Instruction::deassemble_opcode_byte(opcode_byte)?;

        let expected = kind.operand_count();
        let mut operands = Vec::with_capacity(expected);

        for found in 0..expected {
            let word = self
                .next_word()
                .ok_or_else(|| DeassemblyError::IncompleteOperands {
                    kind: kind.to_string(),
                    expected,
                    found,
                })?;

            operands.push(Operand::raw(word));
        }

        Ok(Instruction::new(kind)
            .with_width(width)
            .with_operands(operands))
    }

    pub fn deassemble_instruction_text(&mut self) -> String {
        match self.deassemble_instruction() {
            Ok(instr) => format!("{}", instr),
            Err(e) => e.to_string(),
        }
    }

    fn next_byte(&mut self) -> Option<&'a u8> {
        let byte = self.code_iter.next()?;
        self.offset += 1;
        Some(byte)
    }

    fn next_word(&mut self) -> Option<Word> {
        let first_byte = *self.next_byte()?;
        let second_byte = *self.next_byte()?;
        Some(libisa::bytes_to_word([first_byte, second_byte]))
    }
}
