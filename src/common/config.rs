/** Starting capacity used by the interactive shell when none is given. */
pub const INITIAL_CAPACITY: usize = 10;

/** Smallest capacity a table may shrink to; keeps the bucket index well defined. */
pub const MIN_CAPACITY: usize = 1;

/** When size / capacity reaches this, the bucket array doubles. */
pub const GROWTH_LOAD_FACTOR: f64 = 0.75;

/** When size / capacity drops to this or below, the bucket array halves. */
pub const SHRINK_LOAD_FACTOR: f64 = 0.25;

pub type Key = i64; // entry key type
pub type Value = i64; // entry value type
