use std::fmt::Display;

pub mod condition;
pub mod instruction;
pub mod operand;


/// Raw 16-bit operand field as it appears in the instruction stream.
pub type Word = u16;
pub type Address = u16;

pub const BYTES_PER_WORD: usize = 2;

pub const REGISTER_COUNT: usize = 6;

/// Largest memory the 16-bit address space can reach.
pub const MAX_MEMORY_SIZE: usize = 1 << 16;

/// Width used for addresses: jump/call targets, the stack pointer and the program counter.
pub const POINTER_WIDTH: Width = Width::W2;

/// Operand and result size selected by the two high bits of an opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Width {
    W1,
    W2,
    W4,
    W8,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::W1, Width::W2, Width::W4, Width::W8];

    /// Codes 0..=3 map to 1, 2, 4 and 8 bytes. Any assembler targeting this machine must agree.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::W1),
            1 => Some(Self::W2),
            2 => Some(Self::W4),
            3 => Some(Self::W8),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::W1 => 0,
            Self::W2 => 1,
            Self::W4 => 2,
            Self::W8 => 3,
        }
    }

    pub const fn from_bytes(bytes: u16) -> Option<Self> {
        match bytes {
            1 => Some(Self::W1),
            2 => Some(Self::W2),
            4 => Some(Self::W4),
            8 => Some(Self::W8),
            _ => None,
        }
    }

    pub const fn bytes(self) -> usize {
        match self {
            Self::W1 => 1,
            Self::W2 => 2,
            Self::W4 => 4,
            Self::W8 => 8,
        }
    }

    pub const fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// All-ones mask covering exactly this width.
    pub const fn mask(self) -> u64 {
        match self {
            Self::W8 => u64::MAX,
            _ => (1 << self.bits()) - 1,
        }
    }
}

impl Display for Width {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    Aaa,
    Bbb,
    /// Stack pointer.
    Stk,
    Bsp,
    Acc,
    /// Program counter.
    Cur,
}

impl Register {
    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::Aaa,
        Register::Bbb,
        Register::Stk,
        Register::Bsp,
        Register::Acc,
        Register::Cur,
    ];

    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aaa => "aaa",
            Self::Bbb => "bbb",
            Self::Stk => "stk",
            Self::Bsp => "bsp",
            Self::Acc => "acc",
            Self::Cur => "cur",
        }
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand fields travel big-endian on the wire.
pub fn word_to_bytes(word: Word) -> [u8; BYTES_PER_WORD] {
    [((word & 0xFF00) >> 8) as u8, (word & 0x00FF) as u8]
}

pub fn bytes_to_word(bytes: [u8; BYTES_PER_WORD]) -> Word {
    (bytes[0] as u16) << 8 | (bytes[1] as u16)
}
