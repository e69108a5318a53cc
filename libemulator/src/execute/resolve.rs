use libisa::{
    operand::{AddressingMode, Operand},
    Address, Register, Width, POINTER_WIDTH,
};

use crate::{io::HostIo, value::SizedValue, Emulator};

use super::ExecuteErr;

/// Where an operand's value lives once its addressing mode has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Immediate(u16),
    Register(Register),
    Memory(Address),
}

impl<H> Emulator<H>
where
    H: HostIo,
{
    /// Register-indirect addresses are taken from the register's low pointer-width bytes,
    /// which lets them reach the whole address space unlike 14-bit direct addresses.
    pub fn locate(&self, operand: Operand) -> Result<Location, ExecuteErr> {
        let payload = operand.payload();

        Ok(match operand.mode() {
            AddressingMode::Immediate => Location::Immediate(payload),
            AddressingMode::Register => Location::Register(register(payload)?),
            AddressingMode::Memory => Location::Memory(payload),
            AddressingMode::RegisterIndirect => {
                let base = self.reg_file.register(register(payload)?);
                Location::Memory(base.unsigned(POINTER_WIDTH) as Address)
            }
        })
    }

    pub fn resolve_read(&self, operand: Operand, width: Width) -> Result<SizedValue, ExecuteErr> {
        match self.locate(operand)? {
            Location::Immediate(value) => Ok(SizedValue::packed(value as u64, width)),
            Location::Register(register) => Ok(self.reg_file.register(register).truncated(width)),
            Location::Memory(addr) => self.read_memory(addr, width),
        }
    }

    /// Stores the low `width` bytes of `value`. Register writes leave the register's upper bytes alone.
    pub fn resolve_write(
        &mut self,
        operand: Operand,
        width: Width,
        value: SizedValue,
    ) -> Result<(), ExecuteErr> {
        match self.locate(operand)? {
            Location::Immediate(_) => Err(ExecuteErr::ImmediateWrite(operand.word())),
            Location::Register(register) => {
                self.reg_file
                    .register_mut(register)
                    .set(width, value.unsigned(width));
                Ok(())
            }
            Location::Memory(addr) => self.write_memory(addr, width, value),
        }
    }
}

fn register(index: u16) -> Result<Register, ExecuteErr> {
    Register::from_index(index).ok_or(ExecuteErr::InvalidRegister(index))
}
