//! # Chaining
//!
//! A hash table that resolves collisions with separate chaining.
//!
//! `HashTable` keeps an array of buckets, each an ordered chain of key-value entries.
//! A key is stored in bucket `hash(key) % bucket_count`; when the ratio of entries to
//! buckets rises above the load factor the array doubles and every entry is moved to
//! its new bucket.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chaining::HashTable;
//!
//! // Four buckets, load factor 0.75
//! let mut table = HashTable::new();
//!
//! table.put("apple".to_string(), 1);
//! table.put("banana".to_string(), 2);
//! assert_eq!(table.size(), 2);
//! assert_eq!(table.get("apple"), Some(&1));
//! assert_eq!(table.get("cherry"), None);
//!
//! // Putting an existing key replaces its value in place
//! assert_eq!(table.put("apple".to_string(), 10), Some(1));
//! assert_eq!(table.get("apple"), Some(&10));
//! assert_eq!(table.size(), 2);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use chaining::{HashTable, ResizePolicy, TableConfig, TableError};
//!
//! let table = HashTable::<u64, u64>::with_buckets(0);
//! assert!(matches!(table, Err(TableError::InvalidArgument { .. })));
//!
//! // Compare the truncated quotient instead of the exact ratio
//! let config = TableConfig::default().with_policy(ResizePolicy::Truncating);
//! let mut table = HashTable::with_config(config)?;
//! for i in 0..5_u64 {
//!     table.put(i, i * i);
//! }
//! assert_eq!(table.bucket_count(), 8);
//! # Ok::<(), TableError>(())
//! ```

/// Construction parameters and the resize trigger
mod config;
/// Error type returned by fallible constructors
mod error;
/// Module implementing the separate-chaining hash table
mod hash_table;
/// Key hashing and bucket addressing
pub mod utils;

pub use config::{DEFAULT_INITIAL_BUCKETS, DEFAULT_LOAD_FACTOR, ResizePolicy, TableConfig};
pub use error::TableError;
pub use hash_table::HashTable;
