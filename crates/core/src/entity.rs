//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// First entity in `entities` whose identifier equals `id`.
pub fn find_by_id<'a, E, Q>(id: &Q, entities: &'a [E]) -> Option<&'a E>
where
    E: Entity,
    E::Id: PartialEq<Q>,
    Q: ?Sized,
{
    entities.iter().find(|entity| entity.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        key: String,
        label: &'static str,
    }

    impl Entity for Row {
        type Id = String;

        fn id(&self) -> &String {
            &self.key
        }
    }

    #[test]
    fn find_by_id_returns_first_match() {
        let rows = vec![
            Row { key: "a".into(), label: "first" },
            Row { key: "b".into(), label: "second" },
            Row { key: "b".into(), label: "duplicate" },
        ];

        assert_eq!(find_by_id("b", &rows).map(|r| r.label), Some("second"));
        assert!(find_by_id("z", &rows).is_none());
    }
}
