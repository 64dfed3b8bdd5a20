//! Chained Hash Table Toolkit
//!
//! A fixed-size hash table that resolves collisions by chaining and draws a
//! fresh universal hash function for every instance.
//!
//! # Overview
//!
//! The table itself lives in `chaintab-core`, re-exported here as
//! [`table`]. This crate adds what the command-line front end needs on top:
//!
//! - [`Scalar`]: a key/value type that is either an integer or text, so a
//!   single table can hold `"apple"` and `10` side by side
//! - [`script`]: a line-oriented command language and a [`Session`] that
//!   runs it against a table
//! - [`demo`]: the insert/search/delete walkthrough the CLI prints
//!
//! # Example
//!
//! ```rust
//! use chaintab::{ChainedHashTable, Scalar};
//!
//! let mut table = ChainedHashTable::new(11).unwrap();
//! table.insert(Scalar::from("apple"), Scalar::Int(1));
//! table.insert(Scalar::Int(10), Scalar::from("ten"));
//! table.insert(Scalar::from("apple"), Scalar::Int(99));
//!
//! assert_eq!(table.search(&Scalar::from("apple")), Some(&Scalar::Int(99)));
//! assert_eq!(table.search(&Scalar::Int(42)), None);
//! ```

// Re-export the core table
pub use chaintab_core as table;

pub mod demo;
pub mod scalar;
pub mod script;

// Convenience re-exports
pub use scalar::Scalar;
pub use script::{Command, OutputFormat, Session};
pub use table::{ChainedHashTable, TableConfig};
