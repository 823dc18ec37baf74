use crate::core::{FeatureId, Value};

/// One entry of a feature map: which member feature it belongs to, and its
/// value (an object id for element content, a string for text).
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub feature: FeatureId,
    pub value: Value,
}

impl MapEntry {
    pub fn new(feature: FeatureId, value: Value) -> Self {
        Self { feature, value }
    }
}

/// Backing sequence of a mixed-content group.
///
/// Order is document order across all member kinds; member projections are
/// filtered views over this one sequence, so mutating a projection mutates
/// the backing and vice versa. Allocates nothing until the first entry.
#[derive(Debug, Default)]
pub(crate) struct FeatureMap {
    entries: Vec<MapEntry>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: MapEntry) {
        self.entries.push(entry);
    }

    pub fn insert(&mut self, index: usize, entry: MapEntry) {
        self.entries.insert(index, entry);
    }

    pub fn remove(&mut self, index: usize) -> MapEntry {
        self.entries.remove(index)
    }

    pub fn take(&mut self) -> Vec<MapEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Projection of one member kind, in backing order.
    pub fn member_values(&self, member: FeatureId) -> impl Iterator<Item = &Value> {
        self.entries
            .iter()
            .filter(move |e| e.feature == member)
            .map(|e| &e.value)
    }

    /// Backing position of the `nth` entry of `member`.
    pub fn member_position(&self, member: FeatureId, nth: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.feature == member)
            .map(|(i, _)| i)
            .nth(nth)
    }

    /// Backing positions of every entry of `member`, ascending.
    pub fn member_positions(&self, member: FeatureId) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.feature == member)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn contains_object(&self, object: crate::core::ObjectId) -> bool {
        self.entries
            .iter()
            .any(|e| e.value.as_object() == Some(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(i: u16) -> FeatureId {
        FeatureId::new(i)
    }

    #[test]
    fn projection_is_a_stable_subsequence() {
        let a = f(1);
        let b = f(2);
        let mut map = FeatureMap::new();
        map.push(MapEntry::new(a, Value::Int(1)));
        map.push(MapEntry::new(b, Value::Int(2)));
        map.push(MapEntry::new(a, Value::Int(3)));
        let of_a: Vec<_> = map.member_values(a).cloned().collect();
        assert_eq!(of_a, vec![Value::Int(1), Value::Int(3)]);
        assert_eq!(map.member_position(a, 1), Some(2));
        assert_eq!(map.member_position(b, 0), Some(1));
        assert_eq!(map.member_position(b, 1), None);
    }
}
