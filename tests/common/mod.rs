//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;

use wb_config::document::{
    make_default_variation, Bag, BagWeightPolicy, CabinSection, CombinedLimit, Configuration,
    ConfigurationGroup, DigitalSignature, Envelope, HighlightedResult, Hold, Lines, MassUnit,
    Passenger, PaxWeightPolicy, Point, Range, Records, Root, StructuralMtow, Variation,
};

/// A variation with every collection populated and every rule satisfied.
pub fn populated_variation(id: u32, name: &str) -> Variation {
    let mut v = make_default_variation(id);
    v.name = name.to_string();
    v.short_description = Some(format!("{} ops", name));

    let general = &mut v.general;
    general.weight_unit = MassUnit::Kg;
    general.fuel_unit = MassUnit::Kg;
    general.performance_mtow.min = 40_000.0;
    general.performance_mtow.max = 73_500.0;
    general.performance_mtow.require_manual_input = Some(true);
    general.performance_lw.min = 40_000.0;
    general.performance_lw.max = 64_500.0;
    general.block_fuel = Some(Range::new(500.0, 18_700.0));
    general.taxi_fuel = Range::new(0.0, 600.0);
    general.trip_fuel = Range::new(200.0, 15_000.0);
    general.landing_fuel = Range::new(800.0, 10_000.0);
    general.take_off_fuel = Range::new(1_000.0, 18_000.0);
    general.dow_correction = Range::new(-500.0, 500.0);
    general.doi_correction = Range::new(-5.5, 5.5);
    general.payload_limit = Some(Range::new(0.0, 20_000.0));
    general.draw_fuel_vector = true;

    let aircraft = &mut v.aircraft;
    aircraft.structural_mzfw = 62_500.0;
    aircraft.structural_mlw = 64_500.0;
    aircraft.structural_mrmpw = 73_900.0;
    aircraft.structural_mtows = vec![StructuralMtow { mtow: 70_000.0 }, StructuralMtow { mtow: 73_500.0 }];
    aircraft.configuration_groups = vec![ConfigurationGroup {
        label: "Crew".to_string(),
        configurations: vec![
            Configuration {
                id: 1,
                label: Some("2/4".to_string()),
                index_shift: Some(-0.52),
                weight_shift: Some(0.0),
                is_default: Some(true),
            },
            Configuration {
                id: 2,
                label: Some("2/5".to_string()),
                index_shift: Some(-0.31),
                weight_shift: Some(85.0),
                is_default: None,
            },
        ],
    }];

    v.weight_policy.passenger = Passenger {
        allow_optimum: Some(false),
        is_default: None,
        pax_weight_policies: vec![PaxWeightPolicy {
            id: 1,
            male_weight: 88.0,
            female_weight: 70.0,
            child_weight: 35.0,
            adult_weight: 84.0,
            infant_weight: 10.0,
            label: "Standard".to_string(),
            is_default: Some(true),
        }],
    };
    v.weight_policy.bag = Bag {
        is_default: None,
        bag_weight_policies: vec![BagWeightPolicy {
            id: 1,
            label: "Standard".to_string(),
            bag_weight: 13.0,
            is_default: Some(true),
        }],
    };

    v.cabin.sections = vec![
        CabinSection {
            id: 1,
            index_shift_per_weight_unit: -0.00657,
            jump_seat: None,
            label: "OA".to_string(),
            max: 36.0,
            row_from: Some(1.0),
            row_to: Some(6.0),
        },
        CabinSection {
            id: 2,
            index_shift_per_weight_unit: 0.00412,
            jump_seat: Some(false),
            label: "OB".to_string(),
            max: 54.0,
            row_from: Some(7.0),
            row_to: Some(15.0),
        },
    ];

    let holds = &mut v.hold_configuration;
    holds.use_bags = Some(true);
    holds.use_cargo = Some(true);
    holds.crew_bag_weight = Some(12.0);
    holds.holds = (1..=3)
        .map(|id| Hold {
            id,
            used: Some(true),
            label: Some(format!("C{}", id)),
            max: Some(2_000.0 + id as f64 * 500.0),
            index_shift_per_weight_unit: Some(-0.011 + id as f64 * 0.008),
        })
        .collect();
    holds.combined_limits = vec![CombinedLimit {
        max: Some(4_500.0),
        holds: vec![1, 2],
    }];

    let standard = &mut v.envelope_types[0];
    standard.is_default = Some(true);
    standard.zfw = Envelope {
        weight: Some(62_500.0),
        min_val: Some(20.0),
        max_val: Some(90.0),
        envelope: vec![
            Point::new(31.2, 35_000.0),
            Point::new(28.4, 62_500.0),
            Point::new(86.9, 62_500.0),
            Point::new(78.1, 35_000.0),
        ],
    };
    standard.tow.envelope = vec![Point::new(30.0, 40_000.0), Point::new(82.5, 73_500.0)];
    standard.lw.envelope = vec![Point::new(29.5, 40_000.0), Point::new(84.0, 64_500.0)];

    v.table.standard_fueling = vec![
        Records { y: 0.0, value: 0.0 },
        Records { y: 5_000.0, value: -1.8 },
        Records { y: 10_000.0, value: -4.1 },
    ];
    v.table.cg_to_mac = vec![
        Lines { mac: 10.0, index1: 18.5, weight1: 35_000.0, index2: 6.4, weight2: 75_000.0 },
        Lines { mac: 25.0, index1: 42.3, weight1: 35_000.0, index2: 57.6, weight2: 75_000.0 },
        Lines { mac: 40.0, index1: 66.1, weight1: 35_000.0, index2: 108.8, weight2: 75_000.0 },
    ];
    v.table.mac_to_ths = vec![
        Records { y: 10.0, value: 4.5 },
        Records { y: 40.0, value: -1.5 },
    ];
    v
}

/// A complete two-variation document that validates cleanly.
pub fn populated_root() -> Root {
    let mut summer = populated_variation(1, "Summer");
    summer.is_default = Some(true);
    let winter = populated_variation(2, "Winter");

    Root {
        registration: "HBJZA".to_string(),
        operational_use: true,
        bew: Some(41_250.0),
        bi: Some(48.31),
        digital_signature: Some(DigitalSignature::Handwritten),
        highlighted_results: Some(vec![HighlightedResult::Tow, HighlightedResult::Maczfw]),
        disclaimer: Some("For training use only".to_string()),
        variations: Some(vec![summer, winter]),
    }
}

/// Write `contents` to a fresh temporary file.
pub fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}
