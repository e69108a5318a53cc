use libisa::Width;

#[cfg(test)]
mod tests;

pub const SLOT_BYTES: usize = 8;

/// One 8-byte storage slot, read and written as a 1, 2, 4 or 8 byte integer.
/// Byte 0 is the least significant. Every access touches only the bytes of its own width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizedValue([u8; SLOT_BYTES]);

impl SizedValue {
    pub const ZERO: Self = Self([0; SLOT_BYTES]);

    /// Slot holding the low `width` bytes of `value`, the rest zeroed.
    pub fn packed(value: u64, width: Width) -> Self {
        let mut slot = Self::ZERO;
        slot.set(width, value);
        slot
    }

    /// Assembles up to eight bytes, least significant first.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let mut slot = Self::ZERO;
        for (dest, byte) in slot.0.iter_mut().zip(bytes) {
            *dest = *byte;
        }
        slot
    }

    pub fn le_bytes(&self, width: Width) -> &[u8] {
        &self.0[..width.bytes()]
    }

    pub fn unsigned(&self, width: Width) -> u64 {
        self.le_bytes(width)
            .iter()
            .enumerate()
            .fold(0, |value, (index, byte)| value | (*byte as u64) << (8 * index))
    }

    pub fn signed(&self, width: Width) -> i64 {
        let unused_bits = 64 - width.bits();
        ((self.unsigned(width) << unused_bits) as i64) >> unused_bits
    }

    /// Overwrites the low `width` bytes, leaving the upper ones untouched.
    pub fn set(&mut self, width: Width, value: u64) {
        for (index, byte) in self.0[..width.bytes()].iter_mut().enumerate() {
            *byte = (value >> (8 * index)) as u8;
        }
    }

    /// Same value narrowed to `width`, upper bytes cleared.
    pub fn truncated(&self, width: Width) -> Self {
        Self::from_le_bytes(self.le_bytes(width))
    }
}
