//! Construction parameters for `HashTable`

use crate::TableError;

/// Number of buckets a table starts with when none is given
pub const DEFAULT_INITIAL_BUCKETS: usize = 4;

/// Average chain length above which the table doubles its bucket count
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// How the entries-per-bucket ratio is computed before it is compared to the load factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Compare the exact ratio `entries / buckets`.
    #[default]
    Fractional,
    /// Compare the integer quotient `entries / buckets`.
    ///
    /// With a load factor below 1 this only grows once every bucket holds one entry on
    /// average, and with a load factor of 1.5 only once the average reaches 2.
    Truncating,
}

impl ResizePolicy {
    /// Returns true when a table holding `entries` items in `buckets` buckets must grow.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub fn exceeds(self, entries: usize, buckets: usize, load_factor: f64) -> bool {
        if buckets == 0 {
            return true;
        }
        let ratio = match self {
            Self::Fractional => entries as f64 / buckets as f64,
            Self::Truncating => (entries / buckets) as f64,
        };
        ratio > load_factor
    }
}

/// Parameters a `HashTable` is built from.
///
/// ```rust
/// use chaining::{HashTable, ResizePolicy, TableConfig};
///
/// let config = TableConfig::default()
///     .with_initial_buckets(16)
///     .with_load_factor(2.0)
///     .with_policy(ResizePolicy::Truncating);
///
/// let table: HashTable<String, u32> = HashTable::with_config(config).unwrap();
/// assert_eq!(table.bucket_count(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated up front
    pub initial_buckets: usize,
    /// Threshold for the entries-per-bucket ratio
    pub load_factor: f64,
    /// How the ratio is computed
    pub policy: ResizePolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
            load_factor: DEFAULT_LOAD_FACTOR,
            policy: ResizePolicy::default(),
        }
    }
}

impl TableConfig {
    /// Sets the number of buckets the table starts with
    #[must_use]
    pub fn with_initial_buckets(mut self, initial_buckets: usize) -> Self {
        self.initial_buckets = initial_buckets;
        self
    }

    /// Sets the load factor threshold
    #[must_use]
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the resize policy
    #[must_use]
    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidArgument`] when `initial_buckets` is zero or when
    /// `load_factor` is not a finite, strictly positive number.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_buckets == 0 {
            return Err(TableError::invalid("initial_buckets", "must be at least 1, got 0"));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(TableError::invalid(
                "load_factor",
                format!("must be finite and greater than 0, got {}", self.load_factor),
            ));
        }
        Ok(())
    }
}
