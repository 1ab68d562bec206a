use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// Values keyed by their type, at most one per type.
#[derive(Debug, Default)]
pub struct TypeMap(HashMap<TypeId, Box<dyn Any>>);

impl TypeMap {
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.0
            .get(&TypeId::of::<T>())
            .and_then(|x| x.downcast_ref())
    }

    pub fn insert<T: 'static>(&mut self, x: T) {
        self.0.insert(TypeId::of::<T>(), Box::new(x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_value_per_type() {
        let mut map = TypeMap::default();
        map.insert(1u32);
        map.insert("first");
        map.insert("second");

        assert_eq!(map.get::<u32>(), Some(&1));
        assert_eq!(map.get::<&str>(), Some(&"second"));
        assert_eq!(map.get::<u64>(), None);
    }
}
