use flags::Flags;
use libisa::Width;
use num::{
    traits::{WrappingAdd, WrappingMul, WrappingShl, WrappingShr, WrappingSub},
    PrimInt,
};

use crate::{execute::ExecuteErr, value::SizedValue};

pub mod flags;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    UDiv,
    IDiv,
    Shl,
    Shr,
    Sal,
    Sar,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    fn is_signed(self) -> bool {
        matches!(self, Self::IDiv | Self::Sal | Self::Sar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    BNot,
    LNot,
}

/// Integer lane the binary operators are computed in, one per width and signedness.
trait Lane: PrimInt + WrappingAdd + WrappingSub + WrappingMul + WrappingShl + WrappingShr {}

impl<T> Lane for T where T: PrimInt + WrappingAdd + WrappingSub + WrappingMul + WrappingShl + WrappingShr {}

pub struct ALU {
    pub flags: Flags,
}

impl ALU {
    pub fn new() -> Self {
        Self {
            flags: Flags::default(),
        }
    }

    /// Computes `a op b` at `width`. Shift counts wrap at the width's bit count.
    pub fn binary(
        &self,
        op: BinaryOp,
        width: Width,
        a: SizedValue,
        b: SizedValue,
    ) -> Result<SizedValue, ExecuteErr> {
        let result = if op.is_signed() {
            signed_lane(op, width, a.signed(width), b.signed(width))
        } else {
            unsigned_lane(op, width, a.unsigned(width), b.unsigned(width))
        };

        result
            .map(|value| SizedValue::packed(value, width))
            .ok_or(ExecuteErr::DivisionByZero)
    }

    pub fn unary(&self, op: UnaryOp, width: Width, a: SizedValue) -> SizedValue {
        let a = a.unsigned(width);

        let value = match op {
            UnaryOp::Neg => a.wrapping_neg(),
            UnaryOp::Pos => a,
            UnaryOp::BNot => !a,
            UnaryOp::LNot => (a == 0) as u64,
        };

        SizedValue::packed(value, width)
    }

    pub fn compare(&mut self, width: Width, a: SizedValue, b: SizedValue, signed: bool) {
        let (equal, less) = if signed {
            let [a, b] = [a.signed(width), b.signed(width)];
            (a == b, a < b)
        } else {
            let [a, b] = [a.unsigned(width), b.unsigned(width)];
            (a == b, a < b)
        };

        self.flags = Flags { equal, less };
    }

    /// Re-stores `value` read at `from` as a `to`-wide value, zero or sign extending.
    pub fn extend(value: SizedValue, from: Width, to: Width, signed: bool) -> SizedValue {
        let extended = if signed {
            value.signed(from) as u64
        } else {
            value.unsigned(from)
        };

        SizedValue::packed(extended, to)
    }
}

impl Default for ALU {
    fn default() -> Self {
        Self::new()
    }
}

fn unsigned_lane(op: BinaryOp, width: Width, a: u64, b: u64) -> Option<u64> {
    let shift = b as u32;

    match width {
        Width::W1 => apply(op, a as u8, b as u8, shift).map(u64::from),
        Width::W2 => apply(op, a as u16, b as u16, shift).map(u64::from),
        Width::W4 => apply(op, a as u32, b as u32, shift).map(u64::from),
        Width::W8 => apply(op, a, b, shift),
    }
}

fn signed_lane(op: BinaryOp, width: Width, a: i64, b: i64) -> Option<u64> {
    let shift = b as u32;

    match width {
        Width::W1 => apply(op, a as i8, b as i8, shift).map(|value| value as u8 as u64),
        Width::W2 => apply(op, a as i16, b as i16, shift).map(|value| value as u16 as u64),
        Width::W4 => apply(op, a as i32, b as i32, shift).map(|value| value as u32 as u64),
        Width::W8 => apply(op, a, b, shift).map(|value| value as u64),
    }
}

/// `None` only for a zero divisor.
fn apply<T>(op: BinaryOp, a: T, b: T, shift: u32) -> Option<T>
where
    T: Lane,
{
    let value = match op {
        BinaryOp::Add => a.wrapping_add(&b),
        BinaryOp::Sub => a.wrapping_sub(&b),
        BinaryOp::Mul => a.wrapping_mul(&b),
        BinaryOp::UDiv | BinaryOp::IDiv => {
            if b.is_zero() {
                return None;
            }

            // Only MIN / -1 overflows, which wraps back to MIN.
            a.checked_div(&b).unwrap_or(a)
        }
        BinaryOp::Shl | BinaryOp::Sal => a.wrapping_shl(shift),
        BinaryOp::Shr | BinaryOp::Sar => a.wrapping_shr(shift),
        BinaryOp::And => a & b,
        BinaryOp::Or => a | b,
        BinaryOp::Xor => a ^ b,
    };

    Some(value)
}
