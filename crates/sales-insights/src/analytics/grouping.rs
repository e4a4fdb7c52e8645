use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Map that iterates in first-insertion order.
///
/// Winner selection in the bonus rules resolves ties in favor of the entry
/// created first, so every derived map in the engine has to iterate the way
/// the input batch populated it. `HashMap` alone cannot promise that.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let slot = *self.index.get(key)?;
        Some(&mut self.entries[slot].1)
    }

    /// Returns the value for `key`, inserting `default()` on first sight.
    pub fn entry_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Partitions `items` by the key each element derives, preserving relative
/// order inside every group. Keys appear in first-occurrence order and no
/// entry is created for a key that never occurs.
pub fn group_by<I, T, K, F>(items: I, mut key_fn: F) -> OrderedMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut groups = OrderedMap::new();
    for item in items {
        let key = key_fn(&item);
        groups.entry_or_insert_with(key, Vec::new).push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_preserves_order_and_loses_nothing() {
        let words = vec!["ant", "bee", "ape", "bat", "cow"];
        let groups = group_by(words.clone(), |word| word.as_bytes()[0]);

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![b'a', b'b', b'c']);
        assert_eq!(groups.get(&b'a').expect("a group"), &vec!["ant", "ape"]);
        assert_eq!(groups.get(&b'b').expect("b group"), &vec!["bee", "bat"]);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, words.len(), "union of groups equals the input");
    }

    #[test]
    fn empty_input_produces_no_groups() {
        let groups = group_by(Vec::<i32>::new(), |value| *value);
        assert!(groups.is_empty());
    }

    #[test]
    fn entry_or_insert_keeps_first_slot() {
        let mut map = OrderedMap::new();
        *map.entry_or_insert_with("a", || 0) += 1;
        *map.entry_or_insert_with("b", || 0) += 1;
        *map.entry_or_insert_with("a", || 0) += 1;

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get(&"a"), Some(&2));
    }
}
