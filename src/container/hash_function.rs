use crate::common::config::Key;

/// Maps a key to a bucket index using the modulo policy.
///
/// `rem_euclid` keeps the result in `[0, capacity)` for negative keys as well,
/// where a plain `%` would produce a negative remainder.
///
/// # Parameters
/// - `key`: The key to be placed.
/// - `capacity`: The number of buckets; must be at least 1.
///
/// # Returns
/// The bucket index the key belongs to.
pub fn bucket_index(key: Key, capacity: usize) -> usize {
    debug_assert!(capacity >= 1);
    key.rem_euclid(capacity as Key) as usize
}
