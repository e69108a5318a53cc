use libisa::{Address, Register, Width, POINTER_WIDTH};

use crate::{io::HostIo, value::SizedValue, Emulator};

use super::ExecuteErr;

// The stack grows upwards: push writes at the stack pointer then bumps it,
// pop steps it back first and reads from there.
impl<H> Emulator<H>
where
    H: HostIo,
{
    pub fn stack_pointer(&self) -> Address {
        self.reg_file.register(Register::Stk).unsigned(POINTER_WIDTH) as Address
    }

    pub fn set_stack_pointer(&mut self, sp: Address) {
        self.reg_file
            .register_mut(Register::Stk)
            .set(POINTER_WIDTH, sp as u64);
    }

    pub fn push(&mut self, value: SizedValue, width: Width) -> Result<(), ExecuteErr> {
        let sp = self.stack_pointer();
        self.write_memory(sp, width, value)?;
        self.set_stack_pointer(sp.wrapping_add(width.bytes() as Address));
        Ok(())
    }

    pub fn pop(&mut self, width: Width) -> Result<SizedValue, ExecuteErr> {
        let sp = self.stack_pointer().wrapping_sub(width.bytes() as Address);
        let value = self.read_memory(sp, width)?;
        self.set_stack_pointer(sp);
        Ok(value)
    }
}
