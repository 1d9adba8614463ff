//! Positional identifier renumbering.
//!
//! Identifiers of ordered collections are conventionally their 1-based
//! position. After an insert, removal or move the ids are recomputed here.

use std::collections::HashMap;

use crate::document::schema::{
    BagWeightPolicy, CabinSection, Configuration, EnvelopeType, Hold, HoldConfiguration,
    PaxWeightPolicy, Variation,
};

/// An entity carrying an identifier unique within its collection.
pub trait Identified {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> u32 {
                    self.id
                }

                fn set_id(&mut self, id: u32) {
                    self.id = id;
                }
            }
        )*
    };
}

identified!(
    Variation,
    Configuration,
    PaxWeightPolicy,
    BagWeightPolicy,
    CabinSection,
    Hold,
    EnvelopeType,
);

/// Assign ids `1..=n` by position. Order and all other fields are kept.
pub fn renumber_in_place<T: Identified>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_id(position as u32 + 1);
    }
}

/// Owned form of [`renumber_in_place`].
pub fn renumber<T: Identified>(mut items: Vec<T>) -> Vec<T> {
    renumber_in_place(&mut items);
    items
}

impl HoldConfiguration {
    /// Renumber holds by position and rewrite combined-limit references to match.
    ///
    /// References to ids that matched no hold before renumbering are left as-is.
    /// When two holds shared an id, references resolve to the first of them.
    pub fn renumber_holds(&mut self) {
        let mut mapping: HashMap<u32, u32> = HashMap::new();
        for (position, hold) in self.holds.iter().enumerate() {
            mapping.entry(hold.id).or_insert(position as u32 + 1);
        }

        renumber_in_place(&mut self.holds);

        for limit in &mut self.combined_limits {
            for id in &mut limit.holds {
                if let Some(new_id) = mapping.get(id) {
                    *id = *new_id;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::defaults::make_default_variation;
    use crate::document::schema::CombinedLimit;

    #[test]
    fn test_renumber_is_positional_and_idempotent() {
        let variations = vec![
            make_default_variation(9),
            make_default_variation(3),
            make_default_variation(3),
        ];
        let ids: Vec<u32> = variations.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![9, 3, 3]);

        let once = renumber(variations);
        assert_eq!(once.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let twice = renumber(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_renumber_keeps_other_fields() {
        let mut first = make_default_variation(5);
        first.name = "summer".into();
        let mut second = make_default_variation(2);
        second.name = "winter".into();

        let out = renumber(vec![first, second]);
        assert_eq!(out[0].name, "summer");
        assert_eq!(out[1].name, "winter");
        assert_eq!(out[1].id, 2);
    }

    #[test]
    fn test_renumber_holds_rewrites_references() {
        let mut config = HoldConfiguration {
            holds: vec![
                Hold { id: 10, ..Default::default() },
                Hold { id: 20, ..Default::default() },
                Hold { id: 30, ..Default::default() },
            ],
            combined_limits: vec![CombinedLimit {
                max: Some(500.0),
                holds: vec![30, 10, 99],
            }],
            ..Default::default()
        };

        config.renumber_holds();

        assert_eq!(config.holds.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(config.combined_limits[0].holds, vec![3, 1, 99]);
    }
}
