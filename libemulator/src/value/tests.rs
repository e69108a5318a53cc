use libisa::Width;

use super::SizedValue;

#[test]
fn assembles_least_significant_byte_first() {
    let value = SizedValue::from_le_bytes(&[0xCD, 0xAB]);

    assert_eq!(value.unsigned(Width::W2), 0xABCD);
    assert_eq!(value.unsigned(Width::W1), 0xCD);
    assert_eq!(value.le_bytes(Width::W2), [0xCD, 0xAB]);
}

#[test]
fn narrow_write_only_touches_its_bytes() {
    let mut value = SizedValue::packed(0x1122_3344_5566_7788, Width::W8);
    value.set(Width::W2, 0xAAAA);

    assert_eq!(value.unsigned(Width::W8), 0x1122_3344_5566_AAAA);
    assert_eq!(value.unsigned(Width::W4), 0x5566_AAAA);
}

#[test]
fn packed_clears_upper_bytes() {
    let value = SizedValue::packed(0xFFFF_FFFF_FFFF_FF05, Width::W1);

    assert_eq!(value.unsigned(Width::W8), 0x05);
    assert_eq!(
        SizedValue::packed(0x1234_5678, Width::W4).truncated(Width::W2),
        SizedValue::packed(0x5678, Width::W2)
    );
}

#[test]
fn signed_views_sign_extend() {
    let value = SizedValue::packed(0x80, Width::W1);

    assert_eq!(value.signed(Width::W1), -128);
    assert_eq!(value.signed(Width::W2), 0x80);
    assert_eq!(SizedValue::packed(u64::MAX, Width::W8).signed(Width::W8), -1);
    assert_eq!(SizedValue::packed(0xFFFE, Width::W2).signed(Width::W2), -2);
}
