use libisa::{Register, REGISTER_COUNT};

use crate::value::SizedValue;

pub struct RegFile([SizedValue; REGISTER_COUNT]);

impl RegFile {
    pub fn new() -> Self {
        Self([SizedValue::ZERO; REGISTER_COUNT])
    }

    pub fn register(&self, register: Register) -> &SizedValue {
        &self.0[register.index()]
    }

    pub fn register_mut(&mut self, register: Register) -> &mut SizedValue {
        &mut self.0[register.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Register, &SizedValue)> {
        Register::ALL.into_iter().zip(self.0.iter())
    }
}

impl Default for RegFile {
    fn default() -> Self {
        Self::new()
    }
}
