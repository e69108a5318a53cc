use std::fmt::Display;

use bimap::BiMap;
use lazy_static::lazy_static;

lazy_static! {
    static ref KIND_MNEMONIC_BIMAP: BiMap<InstructionKind, &'static str> = BiMap::from_iter([
        (InstructionKind::Mov, "mov"),
        (InstructionKind::Add, "add"),
        (InstructionKind::Sub, "sub"),
        (InstructionKind::Mul, "mul"),
        (InstructionKind::UDiv, "udiv"),
        (InstructionKind::IDiv, "idiv"),
        (InstructionKind::Shl, "shl"),
        (InstructionKind::Shr, "shr"),
        (InstructionKind::Sar, "sar"),
        (InstructionKind::And, "and"),
        (InstructionKind::Or, "or"),
        (InstructionKind::Xor, "xor"),
        (InstructionKind::Sxu, "sxu"),
        (InstructionKind::Sxi, "sxi"),
        (InstructionKind::Halt, "halt"),
        (InstructionKind::Jmp, "jmp"),
        (InstructionKind::Stks, "stks"),
        (InstructionKind::Push, "push"),
        (InstructionKind::Pop, "pop"),
        (InstructionKind::Call, "call"),
        (InstructionKind::Ret, "ret"),
        (InstructionKind::Getc, "getc"),
        (InstructionKind::Putc, "putc"),
        (InstructionKind::Neg, "neg"),
        (InstructionKind::Pos, "pos"),
        (InstructionKind::BNot, "bnot"),
        (InstructionKind::LNot, "lnot"),
        (InstructionKind::Sal, "sal"),
        (InstructionKind::Cmp, "cmp"),
        (InstructionKind::ICmp, "icmp"),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Mov,

    Add,
    Sub,
    Mul,
    UDiv,
    IDiv,
    Shl,
    Shr,
    Sar,
    And,
    Or,
    Xor,

    Sxu,
    Sxi,

    Halt,
    Jmp,

    Stks,
    Push,
    Pop,
    Call,
    Ret,

    Getc,
    Putc,

    Neg,
    Pos,
    BNot,
    LNot,

    Sal,

    Cmp,
    ICmp,
}

impl InstructionKind {
    pub const ALL: [InstructionKind; 30] = [
        Self::Mov,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::UDiv,
        Self::IDiv,
        Self::Shl,
        Self::Shr,
        Self::Sar,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Sxu,
        Self::Sxi,
        Self::Halt,
        Self::Jmp,
        Self::Stks,
        Self::Push,
        Self::Pop,
        Self::Call,
        Self::Ret,
        Self::Getc,
        Self::Putc,
        Self::Neg,
        Self::Pos,
        Self::BNot,
        Self::LNot,
        Self::Sal,
        Self::Cmp,
        Self::ICmp,
    ];

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        let kind = Self::ALL.get(opcode as usize).copied()?;

        // ALL is ordered by opcode, which `opcode` pins down exhaustively.
        debug_assert_eq!(kind.opcode(), opcode);
        Some(kind)
    }

    /// Index into the opcode table, bits 5..0 of the opcode byte.
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Mov => 0,
            Self::Add => 1,
            Self::Sub => 2,
            Self::Mul => 3,
            Self::UDiv => 4,
            Self::IDiv => 5,
            Self::Shl => 6,
            Self::Shr => 7,
            Self::Sar => 8,
            Self::And => 9,
            Self::Or => 10,
            Self::Xor => 11,
            Self::Sxu => 12,
            Self::Sxi => 13,
            Self::Halt => 14,
            Self::Jmp => 15,
            Self::Stks => 16,
            Self::Push => 17,
            Self::Pop => 18,
            Self::Call => 19,
            Self::Ret => 20,
            Self::Getc => 21,
            Self::Putc => 22,
            Self::Neg => 23,
            Self::Pos => 24,
            Self::BNot => 25,
            Self::LNot => 26,
            Self::Sal => 27,
            Self::Cmp => 28,
            Self::ICmp => 29,
        }
    }

    /// Number of 16-bit fields following the opcode byte.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Halt => 0,

            Self::Stks | Self::Push | Self::Pop | Self::Call | Self::Ret => 1,
            Self::Getc | Self::Putc => 1,

            Self::Mov | Self::Jmp | Self::Cmp | Self::ICmp => 2,
            Self::Neg | Self::Pos | Self::BNot | Self::LNot => 2,

            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::UDiv
            | Self::IDiv
            | Self::Shl
            | Self::Shr
            | Self::Sal
            | Self::Sar
            | Self::And
            | Self::Or
            | Self::Xor => 3,

            Self::Sxu | Self::Sxi => 3,
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        KIND_MNEMONIC_BIMAP.get_by_right(mnemonic).copied()
    }

    pub fn mnemonic(&self) -> &'static str {
        KIND_MNEMONIC_BIMAP
            .get_by_left(self)
            .copied()
            .expect("No mnemonic mapping for instruction kind")
    }
}

impl Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
