//! Leaf value types shared by every entity in the document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `{min, max}` pair. Well-formed when `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// One vertex of an envelope polygon: `x` is the index/CG axis, `y` the weight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mass unit used for weights and fuel quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum MassUnit {
    #[default]
    #[serde(rename = "KG")]
    Kg,
    #[serde(rename = "LB")]
    Lb,
}

impl MassUnit {
    pub const NAMES: &'static [&'static str] = &["KG", "LB"];
}

/// How the load sheet is signed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DigitalSignature {
    Password,
    Handwritten,
    DeviceSignature,
    None,
}

impl DigitalSignature {
    pub const NAMES: &'static [&'static str] =
        &["PASSWORD", "HANDWRITTEN", "DEVICE_SIGNATURE", "NONE"];
}

/// Result figures the downstream engine should emphasise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HighlightedResult {
    Dow,
    Payload,
    Zfw,
    To,
    Tow,
    Trip,
    Lw,
    Underload,
    Doi,
    Zfcg,
    Tocg,
    Lcg,
    Maczfw,
    Mactow,
    Maclw,
    Ths,
}

impl HighlightedResult {
    pub const NAMES: &'static [&'static str] = &[
        "DOW", "PAYLOAD", "ZFW", "TO", "TOW", "TRIP", "LW", "UNDERLOAD", "DOI", "ZFCG", "TOCG",
        "LCG", "MACZFW", "MACTOW", "MACLW", "THS",
    ];

    /// Interchange spelling of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dow => "DOW",
            Self::Payload => "PAYLOAD",
            Self::Zfw => "ZFW",
            Self::To => "TO",
            Self::Tow => "TOW",
            Self::Trip => "TRIP",
            Self::Lw => "LW",
            Self::Underload => "UNDERLOAD",
            Self::Doi => "DOI",
            Self::Zfcg => "ZFCG",
            Self::Tocg => "TOCG",
            Self::Lcg => "LCG",
            Self::Maczfw => "MACZFW",
            Self::Mactow => "MACTOW",
            Self::Maclw => "MACLW",
            Self::Ths => "THS",
        }
    }
}

impl fmt::Display for HighlightedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cabin layout family. Only commercial seating exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CabinType {
    #[default]
    Commercial,
}

impl CabinType {
    pub const NAMES: &'static [&'static str] = &["COMMERCIAL"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_spellings_match_names() {
        let tags: Vec<HighlightedResult> =
            serde_json::from_str(r#"["DOW","MACTOW","THS","UNDERLOAD"]"#).unwrap();
        assert_eq!(
            tags,
            vec![
                HighlightedResult::Dow,
                HighlightedResult::Mactow,
                HighlightedResult::Ths,
                HighlightedResult::Underload
            ]
        );
        for name in HighlightedResult::NAMES {
            let tag: HighlightedResult = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(tag.as_str(), *name);
        }

        let sig: DigitalSignature = serde_json::from_str("\"DEVICE_SIGNATURE\"").unwrap();
        assert_eq!(sig, DigitalSignature::DeviceSignature);
        assert_eq!(serde_json::to_string(&MassUnit::Lb).unwrap(), "\"LB\"");
        assert_eq!(serde_json::to_string(&CabinType::Commercial).unwrap(), "\"COMMERCIAL\"");
    }

    #[test]
    fn test_range_ordering() {
        assert!(Range::new(0.0, 0.0).is_ordered());
        assert!(Range::new(-5.0, 5.0).is_ordered());
        assert!(!Range::new(10.0, 1.0).is_ordered());
        assert!(!Range::new(f64::NAN, 1.0).is_ordered());
    }
}
