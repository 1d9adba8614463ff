//! Baseline construction.
//!
//! Every constructor here returns a fully populated tree that the validator
//! accepts (given a valid registration on the enclosing [`Root`]).

use crate::document::schema::{
    Aircraft, Cabin, EnvelopeType, Fuel, General, HoldConfiguration, Lines, Records, Root,
    StructuralMtow, Table, Variation, WeightPolicy,
};

/// Label of the envelope type seeded into every new variation.
pub const STANDARD_ENVELOPE_LABEL: &str = "STANDARD";

impl Default for Aircraft {
    fn default() -> Self {
        Self {
            structural_mzfw: 0.0,
            structural_mrmpw: 0.0,
            structural_mlw: 0.0,
            configuration_groups: Vec::new(),
            structural_mtows: vec![StructuralMtow::default()],
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self {
            standard_fueling: vec![Records::default()],
            cg_to_mac: vec![Lines::default()],
            mac_to_ths: vec![Records::default()],
        }
    }
}

/// The envelope type every new variation starts with.
pub fn standard_envelope_type() -> EnvelopeType {
    EnvelopeType {
        id: 1,
        label: STANDARD_ENVELOPE_LABEL.to_string(),
        ..Default::default()
    }
}

/// Build an empty but structurally complete variation.
pub fn make_default_variation(id: u32) -> Variation {
    Variation {
        id,
        name: String::new(),
        short_description: None,
        info: None,
        is_default: None,
        general: General::default(),
        aircraft: Aircraft::default(),
        weight_policy: WeightPolicy::default(),
        cabin: Cabin::default(),
        hold_configuration: HoldConfiguration::default(),
        fuel: Fuel {
            trimming: Some(false),
        },
        envelope_types: vec![standard_envelope_type()],
        table: Table::default(),
    }
}

/// A new document holding a single default variation.
pub fn new_root(registration: impl Into<String>) -> Root {
    Root {
        registration: registration.into(),
        operational_use: false,
        variations: Some(vec![make_default_variation(1)]),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::primitives::{CabinType, MassUnit, Range};

    #[test]
    fn test_default_variation_shape() {
        let v = make_default_variation(7);
        assert_eq!(v.id, 7);
        assert!(v.name.is_empty());
        assert_eq!(v.general.weight_unit, MassUnit::Kg);
        assert_eq!(v.general.taxi_fuel, Range::new(0.0, 0.0));
        assert!(v.general.block_fuel.is_none());
        assert_eq!(v.aircraft.structural_mtows, vec![StructuralMtow { mtow: 0.0 }]);
        assert_eq!(v.cabin.cabin_type, CabinType::Commercial);
        assert!(v.hold_configuration.holds.is_empty());
        assert_eq!(v.fuel.trimming, Some(false));
        assert_eq!(v.envelope_types.len(), 1);
        assert_eq!(v.envelope_types[0].label, STANDARD_ENVELOPE_LABEL);
        assert!(v.envelope_types[0].zfw.envelope.is_empty());
        assert_eq!(v.table.cg_to_mac, vec![Lines::default()]);
    }

    #[test]
    fn test_new_root() {
        let root = new_root("HBJOE");
        assert_eq!(root.registration, "HBJOE");
        assert!(!root.operational_use);
        assert_eq!(root.variations().len(), 1);
        assert_eq!(root.variations()[0].id, 1);
    }
}
