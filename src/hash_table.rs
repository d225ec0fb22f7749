use std::{borrow::Borrow, hash::Hash, iter, mem};

use crate::{
    TableConfig, TableError,
    utils::{bucket_index, hash_key},
};

/// A key-value pair stored in a chain
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key, overwritten in place on update
    value: V,
}

/// A chain of entries whose keys share a bucket index, in insertion order
type Bucket<K, V> = Vec<Entry<K, V>>;

/// A hash table resolving collisions by separate chaining.
///
/// Every bucket is a `Vec` of entries. A key lives in bucket `hash(key) % bucket_count`,
/// and the bucket array doubles whenever the entries-per-bucket ratio rises above the
/// configured load factor. Growth happens before the entry that triggered it is placed.
///
/// Note: This implementation is not thread-safe. Wrap it in a `Mutex` for shared access.
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    /// The chains, never empty
    buckets: Vec<Bucket<K, V>>,
    /// Number of unique keys, always the sum of all chain lengths
    num_entries: usize,
    /// Parameters the table was built with
    config: TableConfig,
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Allocates `count` empty chains
fn empty_buckets<K, V>(count: usize) -> Vec<Bucket<K, V>> {
    log::trace!("allocating {count} buckets");
    iter::repeat_with(Vec::new).take(count).collect()
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty table with the default configuration (4 buckets, load factor 0.75)
    #[must_use]
    pub fn new() -> Self {
        Self::from_validated(TableConfig::default())
    }

    /// Creates an empty table with `initial_size` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidArgument`] when `initial_size` is zero.
    pub fn with_buckets(initial_size: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::default().with_initial_buckets(initial_size))
    }

    /// Creates an empty table from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidArgument`] when the configuration does not validate.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config
            .validate()
            .inspect_err(|err| log::warn!("rejected table configuration: {err}"))?;
        Ok(Self::from_validated(config))
    }

    /// Builds the table from a configuration that already passed validation
    fn from_validated(config: TableConfig) -> Self {
        Self { buckets: empty_buckets(config.initial_buckets), num_entries: 0, config }
    }

    /// Associates `value` with `key`.
    ///
    /// The resize check runs first, so the table may grow even when `key` is already
    /// present. An existing entry keeps its place in its chain and gets the new value;
    /// the replaced value is returned. A new key is appended to the end of its chain.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.expand_if_necessary();

        let hash = hash_key(&key);
        let Some(bucket) = self.bucket_mut(hash) else {
            // The bucket array is never empty
            return None;
        };

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { key, value });
        self.num_entries = self.num_entries.saturating_add(1);
        None
    }

    /// Retrieve the value stored for `key`, or `None` when it was never inserted
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(hash_key(key))?
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Get a mutable reference to the value stored for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket_mut(hash_key(key))?
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns true if the table holds a value for `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Doubles the bucket array when the load ratio is above the threshold.
    ///
    /// Entries are moved, not cloned. Old buckets are drained in index order and each
    /// chain front to back, so entries that share a new bucket keep their relative order.
    fn expand_if_necessary(&mut self) {
        let old_count = self.buckets.len();
        if !self.config.policy.exceeds(self.num_entries, old_count, self.config.load_factor) {
            return;
        }

        let new_count = old_count.saturating_mul(2).max(1);
        let mut new_buckets = empty_buckets(new_count);

        for entry in mem::take(&mut self.buckets).into_iter().flatten() {
            let target = bucket_index(hash_key(&entry.key), new_count)
                .and_then(|index| new_buckets.get_mut(index));
            if let Some(bucket) = target {
                bucket.push(entry);
            }
        }

        self.buckets = new_buckets;
        log::debug!(
            "resized table from {old_count} to {new_count} buckets holding {} entries",
            self.num_entries
        );
    }
}

impl<K, V> HashTable<K, V> {
    /// Returns the number of unique keys in the table
    #[must_use]
    pub fn size(&self) -> usize {
        self.num_entries
    }

    /// Same as [`HashTable::size`]
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Returns the number of buckets currently allocated
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current entries-per-bucket ratio
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.num_entries as f64 / self.buckets.len() as f64
    }

    /// Returns the configuration the table was built with
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the length of every chain, in bucket index order
    #[must_use]
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Returns the length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The chain a hash maps to
    fn bucket(&self, hash: u64) -> Option<&Bucket<K, V>> {
        bucket_index(hash, self.buckets.len()).and_then(|index| self.buckets.get(index))
    }

    /// Mutable access to the chain a hash maps to
    fn bucket_mut(&mut self, hash: u64) -> Option<&mut Bucket<K, V>> {
        bucket_index(hash, self.buckets.len()).and_then(|index| self.buckets.get_mut(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use std::hash::Hasher;

    use super::*;
    use crate::ResizePolicy;

    /// A key whose hash ignores its id, so every instance collides
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Colliding(u32);

    impl Hash for Colliding {
        fn hash<H: Hasher>(&self, state: &mut H) {
            0_u8.hash(state);
        }
    }

    /// Checks that every entry sits in the bucket its hash maps to and that the
    /// counter matches the chains
    fn assert_consistent<K: Eq + Hash, V>(table: &HashTable<K, V>) {
        let count = table.bucket_count();
        for (index, bucket) in table.buckets.iter().enumerate() {
            for entry in bucket {
                assert_eq!(bucket_index(hash_key(&entry.key), count), Some(index));
            }
        }
        assert_eq!(table.chain_lengths().iter().sum::<usize>(), table.size());
    }

    #[test]
    fn test_put_and_get() {
        let mut table = HashTable::new();
        table.put("a".to_string(), 1);
        table.put("b".to_string(), 2);
        table.put("c".to_string(), 3);

        assert_eq!(table.size(), 3);
        assert_eq!(table.get("a"), Some(&1));
        assert_eq!(table.get("b"), Some(&2));
        assert_eq!(table.get("c"), Some(&3));
        assert_eq!(table.get("z"), None);
    }

    #[test]
    fn test_update_keeps_size() {
        let mut table = HashTable::new();
        assert_eq!(table.put("x".to_string(), 1), None);
        assert_eq!(table.put("x".to_string(), 2), Some(1));

        assert_eq!(table.size(), 1);
        assert_eq!(table.get("x"), Some(&2));
    }

    #[test]
    fn test_grows_from_two_buckets() {
        let mut table = HashTable::with_buckets(2).unwrap();
        table.put("k1", 1);
        table.put("k2", 2);
        assert_eq!(table.bucket_count(), 2);

        // 2 entries over 2 buckets is above 0.75, so the third put doubles first
        table.put("k3", 3);
        assert_eq!(table.bucket_count(), 4);

        assert_eq!(table.get("k1"), Some(&1));
        assert_eq!(table.get("k2"), Some(&2));
        assert_eq!(table.get("k3"), Some(&3));
        assert_consistent(&table);
    }

    #[test]
    fn test_rejects_zero_buckets() {
        let result = HashTable::<String, i32>::with_buckets(0);
        assert!(matches!(result, Err(TableError::InvalidArgument { .. })));
    }

    #[test]
    fn test_fractional_grows_before_truncating() {
        let fractional = TableConfig::default().with_initial_buckets(8);
        let truncating = fractional.with_policy(ResizePolicy::Truncating);

        let mut exact: HashTable<u32, u32> = HashTable::with_config(fractional).unwrap();
        let mut legacy: HashTable<u32, u32> = HashTable::with_config(truncating).unwrap();
        for i in 0..8 {
            exact.put(i, i);
            legacy.put(i, i);
        }

        // 7 / 8 = 0.875 grows the exact table, while 7 / 8 truncates to 0
        assert_eq!(exact.bucket_count(), 16);
        assert_eq!(legacy.bucket_count(), 8);

        legacy.put(8, 8);
        assert_eq!(legacy.bucket_count(), 16);
        for i in 0..=8 {
            assert_eq!(legacy.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_update_can_trigger_resize() {
        let mut table = HashTable::with_buckets(1).unwrap();
        table.put(1, "one");
        assert_eq!(table.bucket_count(), 1);

        table.put(1, "uno");
        assert_eq!(table.bucket_count(), 2);
        assert_eq!(table.size(), 1);
        assert_eq!(table.get(&1), Some(&"uno"));
    }

    #[test]
    fn test_colliding_keys_chain_in_order() {
        let config = TableConfig::default().with_initial_buckets(4).with_load_factor(100.0);
        let mut table = HashTable::with_config(config).unwrap();
        for id in 0..10 {
            table.put(Colliding(id), id);
        }

        assert_eq!(table.size(), 10);
        assert_eq!(table.longest_chain(), 10);
        let chain = table.buckets.iter().find(|bucket| !bucket.is_empty()).unwrap();
        let ids: Vec<u32> = chain.iter().map(|entry| entry.key.0).collect();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());

        table.put(Colliding(4), 40);
        assert_eq!(table.size(), 10);
        assert_eq!(table.get(&Colliding(4)), Some(&40));
    }

    #[test]
    fn test_resize_preserves_chain_order() {
        let mut table = HashTable::with_buckets(1).unwrap();
        for id in 0..20 {
            table.put(Colliding(id), id);
        }

        assert!(table.bucket_count() > 1);
        let chain = table.buckets.iter().find(|bucket| !bucket.is_empty()).unwrap();
        let ids: Vec<u32> = chain.iter().map(|entry| entry.key.0).collect();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
        assert_consistent(&table);
    }

    #[test]
    fn test_many_inserts_stay_consistent() {
        let mut table = HashTable::new();
        for i in 0..1_000_u32 {
            table.put(i.to_string(), i);
        }

        assert_eq!(table.size(), 1_000);
        assert!(table.load_factor() <= 0.75);
        for i in 0..1_000_u32 {
            assert_eq!(table.get(&i.to_string()), Some(&i));
        }
        assert_consistent(&table);
    }

    #[test]
    fn test_get_mut() {
        let mut table = HashTable::new();
        table.put("key1".to_string(), 1);

        if let Some(value) = table.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(table.get("key1"), Some(&11));
        assert_eq!(table.get_mut("missing"), None);
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut table = HashTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);

        table.put("key1", 1);
        assert!(!table.is_empty());
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("key1"));
        assert!(!table.contains_key("key2"));
    }

    #[test]
    fn test_from_iter_and_extend() {
        let mut table: HashTable<String, i32> =
            vec![("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        table.extend(vec![("b".to_string(), 20), ("c".to_string(), 3)]);

        assert_eq!(table.size(), 3);
        assert_eq!(table.get("b"), Some(&20));
        assert_eq!(table.get("c"), Some(&3));
    }

    #[test]
    fn test_diagnostics() {
        let table: HashTable<u8, u8> = HashTable::default();
        assert_eq!(table.bucket_count(), 4);
        assert_eq!(table.chain_lengths(), vec![0, 0, 0, 0]);
        assert_eq!(table.longest_chain(), 0);
        assert!(table.load_factor().abs() < f64::EPSILON);
        assert_eq!(table.config(), &TableConfig::default());
    }
}
