//! # Chained Hash Table Core
//!
//! A fixed-size associative container that resolves collisions by chaining
//! and picks its hash function at random from a universal family, so that no
//! fixed key sequence can force long chains on every instance.
//!
//! ## Hashing
//!
//! ```text
//! index = ((a * digest(key) + b) mod p) mod bucket_count
//!          a in 1..p, b in 0..p, p = 1_000_000_007
//! ```
//!
//! `a` and `b` are drawn once per table and never change. Integer keys digest
//! to themselves; text keys use a fixed polynomial rolling hash, so a seeded
//! table lays out the same way on every run and every platform.
//!
//! ## Example
//!
//! ```rust
//! use chaintab_core::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::new(11).unwrap();
//! table.insert("apple".to_string(), 1);
//! table.insert("apple".to_string(), 99);
//!
//! assert_eq!(table.search("apple"), Some(&99));
//! assert!(table.delete("apple"));
//! assert!(!table.delete("apple"));
//! ```
//!
//! ## Reproducible layouts
//!
//! ```rust
//! use chaintab_core::{ChainedHashTable, TableConfig};
//!
//! let config = TableConfig { bucket_count: 11, seed: Some(7) };
//! let mut left = ChainedHashTable::from_config(&config).unwrap();
//! let mut right = ChainedHashTable::from_config(&config).unwrap();
//! left.insert(10u64, "ten");
//! right.insert(10u64, "ten");
//! assert_eq!(left.dump(), right.dump());
//! ```

mod digest;
mod error;
mod params;
mod source;
mod table;
mod uhash;

pub use digest::{Digest, digest_str};
pub use error::TableError;
pub use params::*;
pub use source::{CoefficientSource, OsEntropy, SeededSource};
pub use table::{BucketListing, ChainedHashTable, TableConfig, TableStats};
pub use uhash::UniversalHash;
