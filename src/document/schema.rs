//! Document schema definitions.
//!
//! This module defines the complete shape of a weight-and-balance configuration
//! document. All types derive Serde traits; the camelCase renames are the
//! interchange key names and must not change.

use serde::{Deserialize, Deserializer, Serialize};

use crate::document::primitives::{
    CabinType, DigitalSignature, HighlightedResult, MassUnit, Point, Range,
};

/// Top-level document for one aircraft registration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    /// Aircraft registration, exactly five characters.
    pub registration: String,

    pub operational_use: bool,

    /// Basic empty weight. Integral, non-negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bew: Option<f64>,

    /// Basic index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<DigitalSignature>,

    /// Overridden per variation by `general.highlightedResults`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_results: Option<Vec<HighlightedResult>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    /// Configuration profiles. When present, at least one is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<Variation>>,
}

impl Root {
    /// Variations as a slice, empty when the field is absent.
    pub fn variations(&self) -> &[Variation] {
        self.variations.as_deref().unwrap_or(&[])
    }
}

/// A named, self-contained configuration profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: u32,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    pub general: General,
    pub aircraft: Aircraft,
    pub weight_policy: WeightPolicy,
    pub cabin: Cabin,
    pub hold_configuration: HoldConfiguration,
    pub fuel: Fuel,
    pub envelope_types: Vec<EnvelopeType>,
    pub table: Table,
}

/// Operational envelope boundaries and presentation settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct General {
    pub weight_unit: MassUnit,
    pub fuel_unit: MassUnit,

    pub performance_mtow: ManualRange,
    pub performance_lw: ManualRange,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_fuel: Option<Range>,

    pub taxi_fuel: Range,
    pub trip_fuel: Range,
    pub landing_fuel: Range,
    pub take_off_fuel: Range,
    pub dow_correction: Range,
    pub doi_correction: Range,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dow_limit: Option<Range>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi_limit: Option<Range>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_limit: Option<Range>,

    pub draw_fuel_vector: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<DigitalSignature>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_results: Option<Vec<HighlightedResult>>,
}

impl General {
    /// Every range pair with its interchange key, required ones first.
    pub fn ranges(&self) -> Vec<(&'static str, Range)> {
        let mut ranges = vec![
            ("performanceMtow", self.performance_mtow.range()),
            ("performanceLw", self.performance_lw.range()),
            ("taxiFuel", self.taxi_fuel),
            ("tripFuel", self.trip_fuel),
            ("landingFuel", self.landing_fuel),
            ("takeOffFuel", self.take_off_fuel),
            ("dowCorrection", self.dow_correction),
            ("doiCorrection", self.doi_correction),
        ];
        let optional = [
            ("blockFuel", self.block_fuel),
            ("dowLimit", self.dow_limit),
            ("doiLimit", self.doi_limit),
            ("payloadLimit", self.payload_limit),
        ];
        ranges.extend(optional.into_iter().filter_map(|(key, r)| r.map(|r| (key, r))));
        ranges
    }
}

/// Range that can force the operator to type the value in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualRange {
    pub min: f64,
    pub max: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_manual_input: Option<bool>,
}

impl ManualRange {
    pub fn range(&self) -> Range {
        Range::new(self.min, self.max)
    }
}

/// Structural limits of the airframe.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    pub structural_mzfw: f64,
    pub structural_mrmpw: f64,
    pub structural_mlw: f64,
    pub configuration_groups: Vec<ConfigurationGroup>,
    pub structural_mtows: Vec<StructuralMtow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct StructuralMtow {
    pub mtow: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ConfigurationGroup {
    pub label: String,
    pub configurations: Vec<Configuration>,
}

/// Optional equipment or crew configuration shifting DOW/DOI.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_shift: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_shift: Option<f64>,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct WeightPolicy {
    pub passenger: Passenger,
    pub bag: Bag,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_optimum: Option<bool>,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    pub pax_weight_policies: Vec<PaxWeightPolicy>,
}

/// Standard passenger masses for one policy (e.g. summer, winter).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaxWeightPolicy {
    pub id: u32,
    pub male_weight: f64,
    pub female_weight: f64,
    pub child_weight: f64,
    pub adult_weight: f64,
    pub infant_weight: f64,
    pub label: String,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl PaxWeightPolicy {
    /// Each mass with its interchange key.
    pub fn weights(&self) -> [(&'static str, f64); 5] {
        [
            ("maleWeight", self.male_weight),
            ("femaleWeight", self.female_weight),
            ("childWeight", self.child_weight),
            ("adultWeight", self.adult_weight),
            ("infantWeight", self.infant_weight),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bag {
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    pub bag_weight_policies: Vec<BagWeightPolicy>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagWeightPolicy {
    pub id: u32,
    pub label: String,
    pub bag_weight: f64,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Cabin {
    #[serde(rename = "type")]
    pub cabin_type: CabinType,
    pub sections: Vec<CabinSection>,
}

/// A block of seat rows with a shared balance arm.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinSection {
    pub id: u32,
    pub index_shift_per_weight_unit: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_seat: Option<bool>,

    pub label: String,

    /// Seat capacity.
    pub max: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_from: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_to: Option<f64>,
}

/// Cargo hold limits and what may be loaded into them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_mail: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cargo: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_bags: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daa_weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_bag_weight: Option<f64>,

    pub holds: Vec<Hold>,
    pub combined_limits: Vec<CombinedLimit>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hold {
    pub id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_shift_per_weight_unit: Option<f64>,
}

/// Shared maximum across several holds. `holds` lists hold ids.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CombinedLimit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    pub holds: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Fuel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trimming: Option<bool>,
}

/// CG envelopes for one weight regime.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct EnvelopeType {
    pub id: u32,
    pub label: String,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    pub zfw: Envelope,
    pub tow: Envelope,
    pub lw: Envelope,
}

impl EnvelopeType {
    pub fn envelopes(&self) -> [(&'static str, &Envelope); 3] {
        [("zfw", &self.zfw), ("tow", &self.tow), ("lw", &self.lw)]
    }
}

/// Boundary polygon. Point order is significant.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_val: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_val: Option<f64>,

    pub envelope: Vec<Point>,
}

/// Interpolation tables, each sorted ascending on its key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(deserialize_with = "one_or_many")]
    pub standard_fueling: Vec<Records>,

    /// Sorted ascending on `mac`.
    #[serde(deserialize_with = "one_or_many")]
    pub cg_to_mac: Vec<Lines>,

    #[serde(deserialize_with = "one_or_many")]
    pub mac_to_ths: Vec<Records>,
}

/// One `y -> value` row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Records {
    pub y: f64,
    pub value: f64,
}

/// Two index/weight points defining the iso-%MAC line for `mac`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lines {
    pub mac: f64,
    pub index1: f64,
    pub weight1: f64,
    pub index2: f64,
    pub weight2: f64,
}

/// Table fields as they appear in files: a row list, or one bare row.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(rows) => rows,
        OneOrMany::One(row) => vec![row],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_accepts_single_row_shape() {
        let table: Table = serde_json::from_value(json!({
            "standardFueling": { "y": 1.0, "value": 2.0 },
            "cgToMac": { "mac": 25.0, "index1": 1.0, "weight1": 2.0, "index2": 3.0, "weight2": 4.0 },
            "macToThs": [{ "y": 1.0, "value": 0.5 }, { "y": 2.0, "value": 0.7 }]
        }))
        .unwrap();

        assert_eq!(table.standard_fueling, vec![Records { y: 1.0, value: 2.0 }]);
        assert_eq!(table.cg_to_mac.len(), 1);
        assert_eq!(table.cg_to_mac[0].mac, 25.0);
        assert_eq!(table.mac_to_ths.len(), 2);

        let out = serde_json::to_value(&table).unwrap();
        assert!(out["standardFueling"].is_array());
        assert!(out["cgToMac"].is_array());
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let hold = Hold {
            id: 4,
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&hold).unwrap(), json!({ "id": 4 }));

        let cabin = Cabin::default();
        assert_eq!(
            serde_json::to_value(&cabin).unwrap(),
            json!({ "type": "COMMERCIAL", "sections": [] })
        );
    }

    #[test]
    fn test_general_ranges_include_present_optionals() {
        let mut general = General::default();
        assert_eq!(general.ranges().len(), 8);

        general.payload_limit = Some(Range::new(0.0, 10_000.0));
        let ranges = general.ranges();
        assert_eq!(ranges.len(), 9);
        assert_eq!(ranges.last().map(|(k, _)| *k), Some("payloadLimit"));
    }
}
