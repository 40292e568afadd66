//! Small helpers shared by the report decoders.
//!
//! All multi-byte values on the wire are big-endian.

/// Encodes the lower 24 bits of `value` as a big-endian register offset.
#[must_use]
pub const fn u24_to_be_bytes(value: u32) -> [u8; 3] {
    let bytes = value.to_be_bytes();
    [bytes[1], bytes[2], bytes[3]]
}

/// Decodes up to 8 big-endian bytes into an integer, e.g. the 6 byte extension identifier.
#[must_use]
pub fn be_value(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .fold(0u64, |value, byte| (value << 8) | u64::from(*byte))
}

/// Extracts `width` bits of `byte` starting at bit `shift`.
#[must_use]
pub const fn field(byte: u8, shift: u32, width: u32) -> u8 {
    (byte >> shift) & ((1u16 << width) - 1) as u8
}

/// Returns true if any bit of `mask` is set.
#[must_use]
pub const fn is_set(byte: u8, mask: u8) -> bool {
    byte & mask != 0
}

/// Most extension controllers report buttons as 0 when pressed.
#[must_use]
pub const fn is_pressed_active_low(byte: u8, mask: u8) -> bool {
    byte & mask == 0
}

/// Combines a byte holding the high bits with `low_width` low bits.
#[must_use]
pub const fn with_low_bits(high: u8, low: u8, low_width: u32) -> u16 {
    ((high as u16) << low_width) | low as u16
}
