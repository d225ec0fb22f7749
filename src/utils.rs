//! Key hashing and bucket addressing shared by `HashTable` and its diagnostics

use std::hash::{DefaultHasher, Hash, Hasher};

/// Hashes a key with its own `Hash` implementation.
///
/// `DefaultHasher::new()` is seeded with fixed keys, so the result is stable across
/// runs and bucket placement is reproducible.
#[must_use]
pub fn hash_key<Q: ?Sized + Hash>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Maps a hash onto `0..bucket_count` with a plain modulo.
///
/// Returns `None` for an empty bucket array.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn bucket_index(hash: u64, bucket_count: usize) -> Option<usize> {
    // the remainder is below `bucket_count`, so narrowing it back to usize is lossless
    hash.checked_rem(bucket_count as u64).map(|index| index as usize)
}
