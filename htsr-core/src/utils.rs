///
/// The 16-symbol nucleotide alphabet used by BAM: index is the 4-bit code,
/// value is the canonical character.
///
pub const NT16_TABLE: &[u8; 16] = b"=ACMGRSVTWYHKDBN";

/// Code used for bases that aren't part of the nt16 alphabet.
pub const NT16_UNKNOWN: u8 = 15;

///
/// Decode a single 4-bit code. Only the low four bits are looked at, so every
/// byte maps to some base.
///
#[inline]
pub fn decode_nt16(code: u8) -> u8 {
    NT16_TABLE[(code & 0x0f) as usize]
}

///
/// Encode an ASCII base into its nt16 code. Lowercase bases are folded to
/// uppercase; anything outside the alphabet becomes `N`.
///
#[inline]
pub fn encode_nt16(base: u8) -> u8 {
    let base = base.to_ascii_uppercase();
    NT16_TABLE
        .iter()
        .position(|&b| b == base)
        .map(|i| i as u8)
        .unwrap_or(NT16_UNKNOWN)
}

///
/// Expand a BAM-packed sequence (two codes per byte, high nibble first) into
/// one code per base.
///
/// # Arguments
/// - packed: the packed bytes
/// - base_count: the number of bases; the low nibble of the last byte is padding when odd
///
pub fn unpack_nt16(packed: &[u8], base_count: usize) -> Vec<u8> {
    let mut codes = Vec::with_capacity(base_count);
    for &byte in packed {
        if codes.len() < base_count {
            codes.push(byte >> 4);
        }
        if codes.len() < base_count {
            codes.push(byte & 0x0f);
        }
    }
    codes
}
