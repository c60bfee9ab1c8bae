pub mod store_const {
    pub const INVITE_PREFIX: &str = "invite:";
    pub const MERCHANT_PREFIX: &str = "merchant:";
}

pub mod invite_const {
    /// Excludes glyphs that read ambiguously (0/O, 1/I).
    pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    pub const CODE_LEN: usize = 8;

    /// Batch size bounds for a single generate call.
    pub const MIN_BATCH: i64 = 1;
    pub const MAX_BATCH: i64 = 50;
}
