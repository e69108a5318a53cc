use libisa::{
    condition::Condition, instruction::kind::InstructionKind, Address, Width, POINTER_WIDTH,
};

use crate::{
    alu::{BinaryOp, UnaryOp, ALU},
    io::{HostIo, END_OF_INPUT},
    value::SizedValue,
    Emulator,
};

use super::{ExecuteErr, ExecuteOk};

// Each handler pulls its own operand fields off the instruction stream, then resolves them.
// Destinations are always written last so a fault leaves earlier state untouched.
impl<H> Emulator<H>
where
    H: HostIo,
{
    pub(super) fn execute_decoded(
        &mut self,
        kind: InstructionKind,
        width: Width,
    ) -> Result<ExecuteOk, ExecuteErr> {
        match kind {
            InstructionKind::Mov => {
                let dest = self.next_operand()?;
                let src = self.next_operand()?;

                let value = self.resolve_read(src, width)?;
                self.resolve_write(dest, width, value)?;
            }

            InstructionKind::Add => self.binary(BinaryOp::Add, width)?,
            InstructionKind::Sub => self.binary(BinaryOp::Sub, width)?,
            InstructionKind::Mul => self.binary(BinaryOp::Mul, width)?,
            InstructionKind::UDiv => self.binary(BinaryOp::UDiv, width)?,
            InstructionKind::IDiv => self.binary(BinaryOp::IDiv, width)?,
            InstructionKind::Shl => self.binary(BinaryOp::Shl, width)?,
            InstructionKind::Shr => self.binary(BinaryOp::Shr, width)?,
            InstructionKind::Sal => self.binary(BinaryOp::Sal, width)?,
            InstructionKind::Sar => self.binary(BinaryOp::Sar, width)?,
            InstructionKind::And => self.binary(BinaryOp::And, width)?,
            InstructionKind::Or => self.binary(BinaryOp::Or, width)?,
            InstructionKind::Xor => self.binary(BinaryOp::Xor, width)?,

            InstructionKind::Neg => self.unary(UnaryOp::Neg, width)?,
            InstructionKind::Pos => self.unary(UnaryOp::Pos, width)?,
            InstructionKind::BNot => self.unary(UnaryOp::BNot, width)?,
            InstructionKind::LNot => self.unary(UnaryOp::LNot, width)?,

            InstructionKind::Sxu => self.extend(width, false)?,
            InstructionKind::Sxi => self.extend(width, true)?,

            InstructionKind::Cmp => self.compare(width, false)?,
            InstructionKind::ICmp => self.compare(width, true)?,

            InstructionKind::Halt => return Ok(ExecuteOk::Halted),

            InstructionKind::Jmp => {
                let code = self.next_operand()?.word();
                let target = self.next_operand()?;

                let condition =
                    Condition::from_code(code).ok_or(ExecuteErr::InvalidCondition(code))?;

                if self.alu.flags.holds(condition) {
                    let target = self.resolve_read(target, POINTER_WIDTH)?;
                    self.set_pc(target.unsigned(POINTER_WIDTH) as Address);
                }
            }

            InstructionKind::Stks => {
                let src = self.next_operand()?;

                let sp = self.resolve_read(src, POINTER_WIDTH)?;
                self.set_stack_pointer(sp.unsigned(POINTER_WIDTH) as Address);
            }

            InstructionKind::Push => {
                let src = self.next_operand()?;

                let value = self.resolve_read(src, width)?;
                self.push(value, width)?;
            }

            InstructionKind::Pop => {
                let dest = self.next_operand()?;

                let sp = self.stack_pointer();
                let value = self.pop(width)?;
                self.resolve_write(dest, width, value).map_err(|e| {
                    self.set_stack_pointer(sp);
                    e
                })?;
            }

            InstructionKind::Call => {
                let target = self.next_operand()?;

                let target = self.resolve_read(target, POINTER_WIDTH)?;
                let return_address = SizedValue::packed(self.pc() as u64, POINTER_WIDTH);

                self.push(return_address, POINTER_WIDTH)?;
                self.set_pc(target.unsigned(POINTER_WIDTH) as Address);
            }

            InstructionKind::Ret => {
                let frame = self.next_operand()?;

                let frame_size = self.resolve_read(frame, width)?.unsigned(width) as Address;
                let sp = self.stack_pointer();

                self.set_stack_pointer(sp.wrapping_sub(frame_size));
                let return_address = self.pop(POINTER_WIDTH).map_err(|e| {
                    self.set_stack_pointer(sp);
                    e
                })?;

                self.set_pc(return_address.unsigned(POINTER_WIDTH) as Address);
            }

            InstructionKind::Getc => {
                let dest = self.next_operand()?;

                let byte = self.io.getc().unwrap_or(END_OF_INPUT);
                self.resolve_write(dest, Width::W1, SizedValue::packed(byte as u64, Width::W1))?;
            }

            InstructionKind::Putc => {
                let src = self.next_operand()?;

                let value = self.resolve_read(src, width)?;
                self.io
                    .putc(value.unsigned(Width::W1) as u8)
                    .map_err(|e| ExecuteErr::Output(e.to_string()))?;
            }
        }

        Ok(ExecuteOk::Normal)
    }

    /// `op a, b, dest`
    fn binary(&mut self, op: BinaryOp, width: Width) -> Result<(), ExecuteErr> {
        let a = self.next_operand()?;
        let b = self.next_operand()?;
        let dest = self.next_operand()?;

        let a = self.resolve_read(a, width)?;
        let b = self.resolve_read(b, width)?;

        let result = self.alu.binary(op, width, a, b)?;
        self.resolve_write(dest, width, result)
    }

    /// `op src, dest`
    fn unary(&mut self, op: UnaryOp, width: Width) -> Result<(), ExecuteErr> {
        let src = self.next_operand()?;
        let dest = self.next_operand()?;

        let value = self.resolve_read(src, width)?;
        let result = self.alu.unary(op, width, value);
        self.resolve_write(dest, width, result)
    }

    /// `sxu/sxi src, dest, target_bytes`
    fn extend(&mut self, width: Width, signed: bool) -> Result<(), ExecuteErr> {
        let src = self.next_operand()?;
        let dest = self.next_operand()?;
        let target = self.next_operand()?.word();

        let target = Width::from_bytes(target).ok_or(ExecuteErr::InvalidExtendWidth(target))?;

        let value = self.resolve_read(src, width)?;
        self.resolve_write(dest, target, ALU::extend(value, width, target, signed))
    }

    /// `cmp a, b`
    fn compare(&mut self, width: Width, signed: bool) -> Result<(), ExecuteErr> {
        let a = self.next_operand()?;
        let b = self.next_operand()?;

        let a = self.resolve_read(a, width)?;
        let b = self.resolve_read(b, width)?;

        self.alu.compare(width, a, b, signed);
        Ok(())
    }
}
