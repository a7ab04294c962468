///
/// An owned snapshot of one alignment record, copied out of the reader
/// during a single iteration step.
///
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AlignmentRecord {
    /// 0-based leftmost mapped base.
    pub position: u64,
    /// 0-based, one past the rightmost mapped base.
    pub end_position: u64,
    /// SAM flag word.
    pub flags: u16,
    /// One 4-bit nt16 code per query position (see [crate::utils::NT16_TABLE]).
    pub bases: Vec<u8>,
}

impl AlignmentRecord {
    pub fn new(position: u64, end_position: u64, bases: Vec<u8>) -> Self {
        AlignmentRecord {
            position,
            end_position,
            flags: 0,
            bases,
        }
    }

    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    ///
    /// Build a record from an ASCII sequence, encoding each base to nt16.
    ///
    pub fn from_ascii(position: u64, end_position: u64, sequence: &str) -> Self {
        let bases = sequence.bytes().map(crate::utils::encode_nt16).collect();
        AlignmentRecord::new(position, end_position, bases)
    }
}
