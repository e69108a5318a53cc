use libisa::Width;

use crate::value::SizedValue;

use super::Memory;

#[test]
fn writes_little_endian() {
    let mut memory = Memory::new(vec![0; 4]);
    memory
        .write(1, Width::W2, SizedValue::packed(0xABCD, Width::W2))
        .unwrap();

    assert_eq!(memory.as_slice(), [0x00, 0xCD, 0xAB, 0x00]);
    assert_eq!(memory.read(1, Width::W2).unwrap().unsigned(Width::W2), 0xABCD);
}

#[test]
fn narrow_write_keeps_neighbours() {
    let mut memory = Memory::new(vec![0xEE; 8]);
    memory
        .write(0, Width::W1, SizedValue::packed(0x12345678, Width::W4))
        .unwrap();

    assert_eq!(
        memory.read(0, Width::W4).unwrap().unsigned(Width::W4),
        0xEEEE_EE78
    );
}

#[test]
fn out_of_bounds_accesses_fail() {
    let mut memory = Memory::new(vec![0; 4]);

    assert!(memory.read(3, Width::W2).is_none());
    assert!(memory.read(usize::MAX, Width::W8).is_none());
    assert!(memory
        .write(2, Width::W4, SizedValue::packed(1, Width::W4))
        .is_none());
    assert_eq!(memory.as_slice(), [0; 4], "failed write must not touch memory");
    assert!(memory.read(0, Width::W4).is_some());
}

#[test]
fn instruction_words_are_big_endian() {
    let memory = Memory::new(vec![0x80, 0x04, 0x00]);

    assert_eq!(memory.word(0), Some(0x8004));
    assert_eq!(memory.word(2), None);
}
