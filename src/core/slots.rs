use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-keyed scratch storage for handles owned by external pipeline stages.
///
/// Normalizers, variant mappers and similar objects are attached here so they
/// travel with the variant between stages. One value per type; the record
/// never looks inside.
#[derive(Default)]
pub struct StageSlots {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl StageSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the previous value of the same type
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
    }

    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| *v)
    }

    #[must_use]
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for StageSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageSlots")
            .field("len", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Normalizer {
        shuffle: &'static str,
    }

    #[derive(Debug, PartialEq)]
    struct Mapper(u32);

    #[test]
    fn test_insert_get_remove() {
        let mut slots = StageSlots::new();
        assert!(slots.is_empty());

        assert!(slots.insert(Normalizer { shuffle: "3prime" }).is_none());
        slots.insert(Mapper(1));
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.get::<Normalizer>().unwrap().shuffle, "3prime");

        slots.get_mut::<Mapper>().unwrap().0 = 7;
        assert_eq!(slots.get::<Mapper>(), Some(&Mapper(7)));

        let old = slots.insert(Mapper(9));
        assert_eq!(old, Some(Mapper(7)));

        assert_eq!(slots.remove::<Normalizer>(), Some(Normalizer { shuffle: "3prime" }));
        assert!(!slots.contains::<Normalizer>());
        assert!(slots.contains::<Mapper>());
    }
}
