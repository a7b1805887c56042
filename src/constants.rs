/// Maximum length in bytes of a single instruction word in source form.
pub const MAX_WORD_LEN: usize = 32;

/// Wall-clock cap in seconds applied when a run requests no time limit.
/// A week is effectively unbounded for evolutionary workloads while still
/// guaranteeing that every watchdog eventually fires.
pub const MAX_RTIME_CAP: u64 = 3600 * 24 * 7;

/// RNG seed used when the host does not supply one.
pub const DEFAULT_SEED: i64 = -2237;

/// Numeric-literal instruction count of the stock command-line driver.
pub const DEFAULT_NUMERIC_INSTRUCTIONS: u32 = 32768;

/// Data/label tape length of the stock command-line driver.
pub const DEFAULT_TAPE_SIZE: u32 = 10;
