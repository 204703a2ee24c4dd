pub mod crash;

/// Domain separator mixed into every generator hash.
pub const NAMESPACE: &[u8] = b"_ASCENT";
