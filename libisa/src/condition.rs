use std::fmt::Display;

use crate::Word;

/// Jump conditions, tested against the `equal` and `less` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Always,
    Less,
    LessEqual,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
}

impl Condition {
    pub const ALL: [Condition; 7] = [
        Condition::Always,
        Condition::Less,
        Condition::LessEqual,
        Condition::Equal,
        Condition::NotEqual,
        Condition::Greater,
        Condition::GreaterEqual,
    ];

    pub fn from_code(code: Word) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub const fn code(self) -> Word {
        self as Word
    }

    pub const fn holds(self, equal: bool, less: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Less => less,
            Self::LessEqual => less || equal,
            Self::Equal => equal,
            Self::NotEqual => !equal,
            Self::Greater => !less && !equal,
            Self::GreaterEqual => !less,
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Always => "always",
            Self::Less => "lt",
            Self::LessEqual => "le",
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::Greater => "gt",
            Self::GreaterEqual => "ge",
        })
    }
}
