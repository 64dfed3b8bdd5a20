//! Chained hash table
//!
//! A fixed array of buckets; each bucket is a `Vec` of entries kept in
//! insertion order. Keys are routed to a bucket by the table's
//! [`UniversalHash`] and then found by a linear scan of that bucket.

use std::borrow::Borrow;
use std::fmt;

use crate::digest::Digest;
use crate::error::TableError;
use crate::params::DEFAULT_BUCKET_COUNT;
use crate::source::{CoefficientSource, OsEntropy, SeededSource};
use crate::uhash::UniversalHash;

/// Table construction settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConfig {
    /// Number of buckets, fixed for the table's lifetime
    pub bucket_count: usize,
    /// Draw coefficients from a seeded stream instead of OS entropy
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// One non-empty bucket as reported by [`ChainedHashTable::dump`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BucketListing<'a, K, V> {
    pub index: usize,
    /// Entries oldest first
    pub entries: Vec<(&'a K, &'a V)>,
}

/// Occupancy summary
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableStats {
    pub entries: usize,
    pub bucket_count: usize,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
    /// `entries / bucket_count`
    pub load_factor: f64,
}

/// Fixed-size hash table with separate chaining.
///
/// Invariants held by every method:
/// - a key appears at most once in the whole table;
/// - an entry always sits in the bucket its key hashes to;
/// - the bucket count and hash coefficients never change.
#[derive(Debug, Clone)]
pub struct ChainedHashTable<K, V> {
    buckets: Vec<Vec<Entry<K, V>>>,
    hasher: UniversalHash,
    len: usize,
}

impl<K, V> ChainedHashTable<K, V>
where
    K: Digest + Eq,
{
    /// Create a table with `bucket_count` buckets and OS-random coefficients.
    pub fn new(bucket_count: usize) -> Result<Self, TableError> {
        Self::with_source(bucket_count, &mut OsEntropy)
    }

    /// Create a table with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn with_default_buckets() -> Result<Self, TableError> {
        Self::new(DEFAULT_BUCKET_COUNT)
    }

    /// Create a table drawing its coefficients from `source`.
    pub fn with_source<S>(bucket_count: usize, source: &mut S) -> Result<Self, TableError>
    where
        S: CoefficientSource + ?Sized,
    {
        let hasher = UniversalHash::draw(source, bucket_count)?;
        Self::with_hasher(hasher)
    }

    /// Create a table from a config; a seed makes the layout reproducible.
    pub fn from_config(config: &TableConfig) -> Result<Self, TableError> {
        match config.seed {
            Some(seed) => Self::with_source(config.bucket_count, &mut SeededSource::new(seed)),
            None => Self::new(config.bucket_count),
        }
    }

    /// Create an empty table around an existing hash function.
    ///
    /// Fails with [`TableError::Allocation`] if the bucket array cannot be
    /// allocated.
    pub fn with_hasher(hasher: UniversalHash) -> Result<Self, TableError> {
        let bucket_count = hasher.bucket_count();
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|_| TableError::Allocation {
                buckets: bucket_count,
            })?;
        buckets.resize_with(bucket_count, Vec::new);

        tracing::debug!(
            buckets = hasher.bucket_count(),
            a = hasher.a(),
            b = hasher.b(),
            "created chained hash table"
        );

        Ok(Self {
            buckets,
            hasher,
            len: 0,
        })
    }

    /// Insert or overwrite.
    ///
    /// An existing key keeps its position in the bucket and gets the new
    /// value; the previous value is returned. A new key is appended to the
    /// end of its bucket.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.hasher.index_of(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { key, value });
        self.len += 1;
        None
    }

    /// Value stored under `key`, if any.
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Digest + Eq + ?Sized,
    {
        self.buckets[self.hasher.index_of(key)]
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Digest + Eq + ?Sized,
    {
        let index = self.hasher.index_of(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Digest + Eq + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Remove `key`, returning its value.
    ///
    /// Remaining entries in the bucket keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Digest + Eq + ?Sized,
    {
        let index = self.hasher.index_of(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|entry| entry.key.borrow() == key)?;
        self.len -= 1;
        Some(bucket.remove(position).value)
    }

    /// Remove `key`; `true` if it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Digest + Eq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Bucket a key maps to under this table's hash function.
    pub fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Digest + ?Sized,
    {
        self.hasher.index_of(key)
    }
}

impl<K, V> ChainedHashTable<K, V> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &UniversalHash {
        &self.hasher
    }

    /// Drop every entry. The hash function is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Entries in bucket order, oldest first within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Non-empty buckets in ascending index order.
    pub fn dump(&self) -> Vec<BucketListing<'_, K, V>> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(index, bucket)| BucketListing {
                index,
                entries: bucket
                    .iter()
                    .map(|entry| (&entry.key, &entry.value))
                    .collect(),
            })
            .collect()
    }

    pub fn stats(&self) -> TableStats {
        let occupied_buckets = self.buckets.iter().filter(|b| !b.is_empty()).count();
        let longest_chain = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        TableStats {
            entries: self.len,
            bucket_count: self.buckets.len(),
            occupied_buckets,
            longest_chain,
            load_factor: self.len as f64 / self.buckets.len() as f64,
        }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for BucketListing<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bucket {}: [", self.index)?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({}, {})", key, value)?;
        }
        f.write_str("]")
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for ChainedHashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listing = self.dump();
        if listing.is_empty() {
            return f.write_str("Empty hash table");
        }
        for (i, bucket) in listing.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", bucket)?;
        }
        Ok(())
    }
}
