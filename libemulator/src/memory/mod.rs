use libisa::{operand::Operand, Address, Width, Word};

use crate::{execute::ExecuteErr, io::HostIo, value::SizedValue, Emulator};

#[cfg(test)]
mod tests;

/// Byte-addressable store with a capacity fixed at construction.
pub struct Memory(Vec<u8>);

impl Memory {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn byte(&self, addr: usize) -> Option<u8> {
        self.0.get(addr).copied()
    }

    pub fn bytes(&self, addr: usize, len: usize) -> Option<&[u8]> {
        self.0.get(addr..addr.checked_add(len)?)
    }

    /// Reads `width` bytes, the byte at `addr` being the least significant.
    pub fn read(&self, addr: usize, width: Width) -> Option<SizedValue> {
        self.bytes(addr, width.bytes()).map(SizedValue::from_le_bytes)
    }

    pub fn write(&mut self, addr: usize, width: Width, value: SizedValue) -> Option<()> {
        let dest = self.0.get_mut(addr..addr.checked_add(width.bytes())?)?;
        dest.copy_from_slice(value.le_bytes(width));
        Some(())
    }

    /// Big-endian instruction stream word.
    pub fn word(&self, addr: usize) -> Option<Word> {
        let bytes = self.bytes(addr, libisa::BYTES_PER_WORD)?;
        Some(libisa::bytes_to_word([bytes[0], bytes[1]]))
    }
}

impl<H> Emulator<H>
where
    H: HostIo,
{
    pub fn read_memory(&self, addr: Address, width: Width) -> Result<SizedValue, ExecuteErr> {
        self.memory
            .read(addr as usize, width)
            .ok_or(ExecuteErr::MemoryAccessViolation { addr, width })
    }

    pub fn write_memory(
        &mut self,
        addr: Address,
        width: Width,
        value: SizedValue,
    ) -> Result<(), ExecuteErr> {
        self.memory
            .write(addr as usize, width, value)
            .ok_or(ExecuteErr::MemoryAccessViolation { addr, width })
    }

    /// Reads the operand field at the program counter and steps past it.
    pub(crate) fn next_operand(&mut self) -> Result<Operand, ExecuteErr> {
        let pc = self.pc();
        let word = self
            .memory
            .word(pc as usize)
            .ok_or(ExecuteErr::MemoryAccessViolation {
                addr: pc,
                width: libisa::POINTER_WIDTH,
            })?;

        self.set_pc(pc.wrapping_add(libisa::BYTES_PER_WORD as Address));
        Ok(Operand::raw(word))
    }
}
