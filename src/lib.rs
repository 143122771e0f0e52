#![doc = include_str!("../README.md")]

#![no_std]

#![warn(
    anonymous_parameters,
    missing_copy_implementations,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_qualifications,
    variant_size_differences
)]

extern crate alloc;

use core::fmt;
use core::mem;
use core::borrow::Borrow;
use core::ops::Index;
use core::hash::{Hash, BuildHasher};
use core::iter::FromIterator;

use alloc::vec::Vec;

use hashbrown::{HashMap, DefaultHashBuilder};

mod error;
mod iter;

pub use error::Error;
pub use iter::{Iter, Keys, Values};

/// A key-value pair stored at one position of an `IndexedMap`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    #[inline(always)]
    const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline(always)]
    fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

/// An insertion-ordered hash map addressable by key and by position.
///
/// Every entry sits at a position in `[0, len)`. New entries are appended at
/// the tail and only the tail can be removed, so positions never have gaps
/// and an entry keeps its position for as long as it lives. Values can be
/// replaced in place; keys and positions cannot.
pub struct IndexedMap<K, V, S = DefaultHashBuilder> {
    index_map: HashMap<K, usize, S>, // key -> position in entries
    entries: Vec<Entry<K, V>>, // position -> entry
}

impl<K, V> IndexedMap<K, V, DefaultHashBuilder> {
    /// Creates an empty `IndexedMap`.
    ///
    /// The map is initially created with a capacity of 0, so it will not allocate until it
    /// is first inserted into.
    #[inline]
    pub fn new() -> Self {
        Self {
            index_map: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Creates an empty `IndexedMap` with the specified capacity.
    ///
    /// The map will be able to hold at least `capacity` elements without
    /// reallocating. If `capacity` is 0, the map will not allocate.
    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            index_map: HashMap::with_capacity(n),
            entries: Vec::with_capacity(n),
        }
    }
}

impl<K, V> IndexedMap<K, V, DefaultHashBuilder>
where
    K: Eq + Hash + Clone,
{
    /// Creates a map holding a single entry at position 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::IndexedMap;
    ///
    /// let map = IndexedMap::with_entry("a", 1);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.first(), Some((&"a", &1)));
    /// ```
    #[inline]
    pub fn with_entry(key: K, value: V) -> Self {
        let mut map = Self::with_capacity(1);
        map.push_new(key, value);
        map
    }
}

impl<K, V, S> IndexedMap<K, V, S> {
    /// Creates an empty `IndexedMap` using the provided hasher `h`.
    #[inline]
    pub fn with_hasher(h: S) -> Self {
        Self::with_capacity_and_hasher(0, h)
    }

    /// Creates an empty `IndexedMap` with the specified initial capacity `n` and hasher `h`.
    #[inline]
    pub fn with_capacity_and_hasher(n: usize, h: S) -> Self {
        Self {
            index_map: HashMap::with_capacity_and_hasher(n, h),
            entries: Vec::with_capacity(n),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// This is also one past the highest occupied position.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at position 0, or `None` if the map is empty.
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first().map(Entry::pair)
    }

    /// Returns the entry at position `len - 1`, or `None` if the map is empty.
    #[inline]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entries.last().map(Entry::pair)
    }

    /// Returns the entry at `index`, or `None` if `index >= len`.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get(index).map(Entry::pair)
    }

    /// Returns the entry at `index`.
    ///
    /// Unlike `map[index]`, an out of range position is reported as an error
    /// instead of a panic.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::{Error, IndexedMap};
    ///
    /// let map = IndexedMap::with_entry("a", 1);
    /// assert_eq!(map.try_get_index(0), Ok((&"a", &1)));
    /// assert_eq!(map.try_get_index(1), Err(Error::IndexOutOfBounds { index: 1, len: 1 }));
    /// ```
    #[inline]
    pub fn try_get_index(&self, index: usize) -> Result<(&K, &V), Error> {
        let len = self.len();
        self.get_index(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the value at `index`, or `None` if `index >= len`.
    ///
    /// The key at that position cannot be changed.
    #[inline]
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut V> {
        self.entries.get_mut(index).map(|entry| &mut entry.value)
    }

    /// Replaces the value at `index`, returning the old one.
    ///
    /// Does nothing and returns `None` if `index >= len`; `value` is dropped.
    #[inline]
    pub fn set_index(&mut self, index: usize, value: V) -> Option<V> {
        self.try_set_index(index, value).ok()
    }

    /// Replaces the value at `index`, returning the old one, or reports an
    /// out of range position.
    #[inline]
    pub fn try_set_index(&mut self, index: usize, value: V) -> Result<V, Error> {
        let len = self.len();
        match self.get_index_mut(index) {
            Some(slot) => Ok(mem::replace(slot, value)),
            None => Err(Error::IndexOutOfBounds { index, len }),
        }
    }

    /// Returns all keys in position order, or `None` if the map is empty.
    ///
    /// An empty map never yields `Some(vec![])`. Use [`keys`](Self::keys) to
    /// iterate without that distinction.
    #[inline]
    pub fn keys_in_order(&self) -> Option<Vec<&K>> {
        if self.is_empty() {
            return None
        }
        Some(self.keys().collect())
    }

    /// Returns all values in position order, or `None` if the map is empty.
    #[inline]
    pub fn values_in_order(&self) -> Option<Vec<&V>> {
        if self.is_empty() {
            return None
        }
        Some(self.values().collect())
    }

    /// Returns the positions whose value equals `value`, in ascending order.
    ///
    /// Returns `None` only if the map is empty. A non-empty map with no
    /// matching value yields an empty vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::IndexedMap;
    ///
    /// let map: IndexedMap<_, _> = [("a", 1), ("b", 2), ("c", 1)].into_iter().collect();
    /// assert_eq!(map.indexes_of_value(&1), Some(vec![0, 2]));
    /// assert_eq!(map.indexes_of_value(&3), Some(vec![]));
    ///
    /// let empty = IndexedMap::<&str, i32>::new();
    /// assert_eq!(empty.indexes_of_value(&1), None);
    /// ```
    pub fn indexes_of_value(&self, value: &V) -> Option<Vec<usize>>
    where
        V: PartialEq,
    {
        if self.is_empty() {
            return None
        }

        let indexes = self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.value == *value)
            .map(|(i, _)| i)
            .collect();

        Some(indexes)
    }

    /// Returns an iterator over entries in position order.
    ///
    /// The iterator implements `ExactSizeIterator`, `DoubleEndedIterator` and `FusedIterator`.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { entries: self.entries.iter() }
    }

    /// Returns an iterator over keys in position order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in position order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Removes every entry, keeping the allocated memory for reuse.
    #[inline]
    pub fn clear(&mut self) {
        log::trace!("clearing indexed map of {} entries", self.entries.len());
        self.index_map.clear();
        self.entries.clear();
    }
}

impl<K, V, S> IndexedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns the position of `key`, or `None` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::IndexedMap;
    ///
    /// let mut map = IndexedMap::new();
    /// map.add(0, "zero").unwrap();
    /// map.add(1, "one").unwrap();
    /// assert_eq!(map.get_index_of(&0), Some(0));
    /// assert_eq!(map.get_index_of(&1), Some(1));
    /// assert_eq!(map.get_index_of(&2), None);
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn get_index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index_map.get(key).copied()
    }

    /// Returns a reference to the value corresponding to the key.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let idx = self.get_index_of(key)?;
        Some(&self.entries[idx].value)
    }

    /// Returns the position, key and value for `key`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn get_full<Q>(&self, key: &Q) -> Option<(usize, &K, &V)>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let idx = self.get_index_of(key)?;
        let entry = &self.entries[idx];
        Some((idx, &entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let idx = self.get_index_of(key)?;
        Some(&mut self.entries[idx].value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index_map.contains_key(key)
    }

    /// Replaces the value of an existing key, returning the old one.
    ///
    /// Never creates an entry: if `key` is not present this does nothing,
    /// drops `value` and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::IndexedMap;
    ///
    /// let mut map = IndexedMap::with_entry("a", 1);
    /// assert_eq!(map.set("a", 10), Some(1));
    /// assert_eq!(map.set("b", 2), None);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get("a"), Some(&10));
    /// ```
    #[inline]
    pub fn set<Q>(&mut self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.try_set(key, value).ok()
    }

    /// Replaces the value of an existing key, returning the old one, or
    /// reports a missing key.
    #[inline]
    pub fn try_set<Q>(&mut self, key: &Q, value: V) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.get_mut(key) {
            Some(slot) => Ok(mem::replace(slot, value)),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Removes the entry at the highest position and returns it.
    ///
    /// Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::IndexedMap;
    ///
    /// let mut map = IndexedMap::with_entry("a", 1);
    /// assert_eq!(map.pop(), Some(("a", 1)));
    /// assert_eq!(map.pop(), None);
    /// ```
    #[doc(alias = "remove_last")]
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn pop(&mut self) -> Option<(K, V)> {
        let Entry { key, value } = self.entries.pop()?;
        self.index_map.remove(&key);
        log::trace!("popped entry at index {}", self.entries.len());
        Some((key, value))
    }

    /// Reserves capacity for at least `additional` more entries.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.index_map.reserve(additional);
        self.entries.reserve(additional);
    }

    /// Shrinks the capacity of the map as much as possible.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.index_map.shrink_to_fit();
        self.entries.shrink_to_fit();
    }
}

impl<K, V, S> IndexedMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Appends a new entry at position `len` and returns that position.
    ///
    /// A key that is already present is rejected with [`Error::DuplicateKey`]
    /// and the map is left untouched; `value` is dropped. Use
    /// [`set`](Self::set) to replace the value of an existing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::{Error, IndexedMap};
    ///
    /// let mut map = IndexedMap::new();
    /// assert_eq!(map.add("a", 1), Ok(0));
    /// assert_eq!(map.add("b", 2), Ok(1));
    /// assert_eq!(map.add("a", 3), Err(Error::DuplicateKey { index: 0 }));
    /// assert_eq!(map.get("a"), Some(&1));
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn add(&mut self, key: K, value: V) -> Result<usize, Error> {
        if let Some(&index) = self.index_map.get(&key) {
            log::debug!("rejected duplicate key already present at index {index}");
            return Err(Error::DuplicateKey { index })
        }
        Ok(self.push_new(key, value))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key already exists its value is replaced in place and the old
    /// value is returned; the entry keeps its position.
    /// Otherwise the entry is appended at position `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_map::IndexedMap;
    ///
    /// let mut map = IndexedMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.insert(1, "c"), Some("a"));
    /// assert_eq!(map.get_index(0), Some((&1, &"c")));
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index_map.get(&key) {
            return Some(mem::replace(&mut self.entries[idx].value, value))
        }
        self.push_new(key, value);
        None
    }

    /// Appends an entry whose key is known to be absent.
    #[inline]
    fn push_new(&mut self, key: K, value: V) -> usize {
        let idx = self.entries.len();
        self.entries.push(Entry::new(key.clone(), value));
        self.index_map.insert(key, idx);
        idx
    }
}

impl<K, V, S> Index<usize> for IndexedMap<K, V, S> {
    type Output = V;

    /// Returns the value at position `index`.
    ///
    /// # Panics
    ///
    /// If `index >= len`. Use [`IndexedMap::try_get_index`] to get an error instead.
    fn index(&self, index: usize) -> &Self::Output {
        match self.entries.get(index) {
            Some(entry) => &entry.value,
            None => panic!("index {index} is out of bounds for a map of length {}", self.len()),
        }
    }
}

impl<K, Q, V, S> Index<&Q> for IndexedMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Returns the value for `key`.
    ///
    /// # Panics
    ///
    /// If `key` is not present.
    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in indexed map"),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a IndexedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> FromIterator<(K, V)> for IndexedMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: Default + BuildHasher,
{
    #[cfg_attr(feature = "inline-more", inline)]
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut map = IndexedMap::with_capacity_and_hasher(
            iter.size_hint().0,
            S::default()
        );
        iter.for_each(|(k, v)| _ = map.insert(k, v));
        map
    }
}

impl<K, V, S> Extend<(K, V)> for IndexedMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    #[cfg_attr(feature = "inline-more", inline)]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let reserve = if self.is_empty() {
            iter.size_hint().0
        } else {
            (iter.size_hint().0 + 1) / 2
        };
        self.reserve(reserve);
        iter.for_each(move |(k, v)| _ = self.insert(k, v));
    }
}

impl<K, V, S> Default for IndexedMap<K, V, S>
where
    S: Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity_and_hasher(0, S::default())
    }
}

impl<K, V, S> Clone for IndexedMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            index_map: self.index_map.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<K, V, S> PartialEq for IndexedMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    /// Two maps are equal when they hold equal entries at equal positions.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V, S> Eq for IndexedMap<K, V, S>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, S> fmt::Debug for IndexedMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Lists one `index: i, key: k, value: v` line per entry inside brackets,
/// or `nil` for an empty map.
impl<K, V, S> fmt::Display for IndexedMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("nil")
        }

        f.write_str("[")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "index: {i}, key: {key}, value: {value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    use alloc::vec;
    use alloc::string::{String, ToString};

    fn abc() -> IndexedMap<&'static str, i32> {
        let mut map = IndexedMap::new();
        map.add("a", 1).unwrap();
        map.add("b", 2).unwrap();
        map.add("c", 3).unwrap();
        map
    }

    fn assert_consistent<K, V, S>(map: &IndexedMap<K, V, S>)
    where
        K: Eq + Hash,
        S: BuildHasher,
    {
        assert_eq!(map.index_map.len(), map.entries.len());
        for (i, entry) in map.entries.iter().enumerate() {
            assert_eq!(map.index_map.get(&entry.key), Some(&i));
        }
    }

    #[test]
    fn test_new_and_default_and_with_capacity() {
        let a: IndexedMap<u64, u64> = IndexedMap::new();
        assert!(a.is_empty());
        assert_eq!(a.len(), 0);
        let b: IndexedMap<u64, u64> = IndexedMap::default();
        assert!(b.is_empty());
        let c: IndexedMap<u64, u64> = IndexedMap::with_capacity(10);
        assert!(c.is_empty());
        assert!(c.entries.capacity() >= 10);
    }

    #[test]
    fn test_with_entry_seeds_position_zero() {
        let map = IndexedMap::with_entry("seed", 7);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.get_index(0), Some((&"seed", &7)));
        assert_eq!(map.get_index_of("seed"), Some(0));
        assert_eq!(map.first(), map.last());
        assert_consistent(&map);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let map = abc();
        assert_eq!(map.len(), 3);
        assert_eq!(map.keys_in_order(), Some(vec![&"a", &"b", &"c"]));
        assert_eq!(map.values_in_order(), Some(vec![&1, &2, &3]));
        assert_eq!(map.get_index_of("b"), Some(1));
        assert_eq!(map.first(), Some((&"a", &1)));
        assert_eq!(map.last(), Some((&"c", &3)));
        assert_consistent(&map);
    }

    #[test]
    fn test_add_many_distinct_keys() {
        let mut map = IndexedMap::new();
        for i in 0..100u32 {
            assert_eq!(map.add(i * 7, i), Ok(i as usize));
        }
        assert_eq!(map.len(), 100);
        let keys: Vec<_> = map.keys().copied().collect();
        let expected: Vec<_> = (0..100u32).map(|i| i * 7).collect();
        assert_eq!(keys, expected);
        for i in 0..100u32 {
            assert_eq!(map.get_index_of(&(i * 7)), Some(i as usize));
        }
        assert_consistent(&map);
    }

    #[test]
    fn test_pop_returns_tail() {
        let mut map = abc();
        assert_eq!(map.pop(), Some(("c", 3)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("c"), None);
        assert_eq!(map.get_index_of("c"), None);
        assert_eq!(map.last(), Some((&"b", &2)));
        assert_consistent(&map);
    }

    #[test]
    fn test_pop_empty_returns_none() {
        let mut map: IndexedMap<u32, u32> = IndexedMap::new();
        assert_eq!(map.pop(), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_pop_then_readd_restores_map() {
        let before = abc();
        let mut map = before.clone();
        let (k, v) = map.pop().unwrap();
        assert_eq!(map.add(k, v), Ok(2));
        assert_eq!(map, before);
        assert_eq!(map.get_index(2), Some((&"c", &3)));
        assert_consistent(&map);
    }

    #[test]
    fn test_get_index_of_key_at_zero_and_absent() {
        let mut map = IndexedMap::new();
        map.add(String::new(), 0).unwrap();
        map.add("x".to_string(), 1).unwrap();
        assert_eq!(map.get_index_of(""), Some(0));
        assert_eq!(map.get_index_of("x"), Some(1));
        assert_eq!(map.get_index_of("missing"), None);

        let mut ints = IndexedMap::new();
        ints.add(5u8, "five").unwrap();
        assert_eq!(ints.get_index_of(&0), None);
        assert_eq!(ints.get_index_of(&5), Some(0));
    }

    #[test]
    fn test_add_duplicate_key_is_rejected() {
        let mut map = abc();
        let before = map.clone();
        assert_eq!(map.add("b", 20), Err(Error::DuplicateKey { index: 1 }));
        assert_eq!(map, before);
        assert_eq!(map.len(), 3);
        assert_consistent(&map);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map = abc();
        assert_eq!(map.insert("a", 10), Some(1));
        assert_eq!(map.insert("d", 4), None);
        assert_eq!(map.keys_in_order(), Some(vec![&"a", &"b", &"c", &"d"]));
        assert_eq!(map.values_in_order(), Some(vec![&10, &2, &3, &4]));
        assert_consistent(&map);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut map = abc();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.keys_in_order(), None);
        assert_eq!(map.values_in_order(), None);
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
        assert_eq!(map.get_index(0), None);
        assert_eq!(map.get_index_of("a"), None);
        assert_eq!(map.indexes_of_value(&1), None);
        assert_eq!(map.pop(), None);
        assert_consistent(&map);

        assert_eq!(map.add("z", 26), Ok(0));
        assert_eq!(map.first(), Some((&"z", &26)));
    }

    #[test]
    fn test_set_absent_key_is_noop() {
        let mut map = abc();
        let before = map.clone();
        assert_eq!(map.set("zz", 99), None);
        assert_eq!(map.try_set("zz", 99), Err(Error::KeyNotFound));
        assert_eq!(map, before);
    }

    #[test]
    fn test_set_existing_key_keeps_position() {
        let mut map = abc();
        assert_eq!(map.set("b", 20), Some(2));
        assert_eq!(map.try_set("b", 200), Ok(20));
        assert_eq!(map.get_index(1), Some((&"b", &200)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_set_index_bounds() {
        let mut map = abc();
        assert_eq!(map.set_index(2, 30), Some(3));
        assert_eq!(map.get_index(2), Some((&"c", &30)));

        let before = map.clone();
        assert_eq!(map.set_index(3, 40), None);
        assert_eq!(
            map.try_set_index(3, 40),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(map.set_index(usize::MAX, 40), None);
        assert_eq!(map, before);
    }

    #[test]
    fn test_get_index_bounds() {
        let map = abc();
        assert_eq!(map.get_index(0), Some((&"a", &1)));
        assert_eq!(map.get_index(2), Some((&"c", &3)));
        assert_eq!(map.get_index(3), None);
        assert_eq!(
            map.try_get_index(3),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(map[0], 1);
        assert_eq!(map[2], 3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_at_len_panics() {
        let map = abc();
        let _value = map[3];
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_on_empty_panics() {
        let map: IndexedMap<u8, u8> = IndexedMap::new();
        let _value = map[0];
    }

    #[test]
    fn test_index_by_key() {
        let map = abc();
        assert_eq!(map["b"], 2);
    }

    #[test]
    #[should_panic(expected = "key not found")]
    fn test_index_by_missing_key_panics() {
        let map = abc();
        let _value = map["nope"];
    }

    #[test]
    fn test_indexes_of_value() {
        let mut map = abc();
        map.add("d", 1).unwrap();
        assert_eq!(map.indexes_of_value(&1), Some(vec![0, 3]));
        assert_eq!(map.indexes_of_value(&2), Some(vec![1]));
        assert_eq!(map.indexes_of_value(&42), Some(vec![]));

        let empty: IndexedMap<&str, i32> = IndexedMap::new();
        assert_eq!(empty.indexes_of_value(&1), None);
    }

    #[test]
    fn test_get_mut_changes_value() {
        let mut map = IndexedMap::new();
        map.add(10, String::from("hello")).unwrap();
        {
            let s = map.get_mut(&10).unwrap();
            s.push_str("_world");
        }
        map.get_index_mut(0).unwrap().push('!');
        assert_eq!(map.get(&10).map(|s| s.as_str()), Some("hello_world!"));
        assert_eq!(map.get_full(&10).map(|(i, k, _)| (i, *k)), Some((0, 10)));
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let src = vec![(1u32, "a"), (2, "b"), (3, "c")];
        let map: IndexedMap<_, _> = src.clone().into_iter().collect();
        assert_eq!(map.len(), 3);
        assert_eq!(
            map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            src
        );

        let mut m2 = IndexedMap::new();
        m2.extend(src.clone());
        m2.extend(vec![(2, "B"), (4, "d")]);
        assert_eq!(
            m2.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![(1, "a"), (2, "B"), (3, "c"), (4, "d")]
        );
        assert_consistent(&m2);
    }

    #[test]
    fn test_clone_and_partial_eq_and_eq() {
        let a = abc();
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.pop();
        assert_ne!(a, c);

        // same pairs at different positions are not equal
        let d: IndexedMap<_, _> = vec![("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        assert_ne!(a, d);
    }

    #[test]
    fn test_iter_exact_size_double_ended_and_fused() {
        let map = abc();
        let mut it = map.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some((&"a", &1)));
        assert_eq!(it.next_back(), Some((&"c", &3)));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next(), Some((&"b", &2)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);

        assert_eq!(map.keys().rev().copied().collect::<Vec<_>>(), vec!["c", "b", "a"]);
        assert_eq!(map.values().sum::<i32>(), 6);
        assert_eq!((&map).into_iter().count(), 3);
    }

    #[test]
    fn test_display() {
        let map = abc();
        assert_eq!(
            map.to_string(),
            "[index: 0, key: a, value: 1\nindex: 1, key: b, value: 2\nindex: 2, key: c, value: 3]"
        );

        let single = IndexedMap::with_entry("k", 'v');
        assert_eq!(single.to_string(), "[index: 0, key: k, value: v]");

        let empty: IndexedMap<&str, i32> = IndexedMap::new();
        assert_eq!(empty.to_string(), "nil");
    }

    #[test]
    fn test_debug_lists_entries_in_order() {
        let map = abc();
        assert_eq!(format!("{:?}", map), r#"{"a": 1, "b": 2, "c": 3}"#);
    }

    #[test]
    fn test_reserve_and_shrink() {
        let mut m: IndexedMap<u64, u64> = IndexedMap::new();
        m.reserve(100);
        assert!(m.entries.capacity() >= 100);
        assert!(m.index_map.capacity() >= 100);
        m.add(1, 1).unwrap();
        m.shrink_to_fit();
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&1), Some(&1));
    }
}
