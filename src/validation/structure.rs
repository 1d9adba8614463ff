//! Structural checks over imported JSON, before the tree is typed.
//!
//! # Responsibilities
//! - Report missing required fields, JSON type mismatches and unknown enum values
//! - Repair the tree so it always decodes into [`Root`](crate::document::Root)
//!
//! # Design Decisions
//! - A missing or mistyped required value takes its baseline default
//! - A mistyped optional value is dropped
//! - Object array entries that are not objects are replaced by a default entry,
//!   so later findings keep the original indices
//! - Unknown keys are ignored

use serde_json::{Map, Value};

use crate::document::primitives::{CabinType, DigitalSignature, HighlightedResult, MassUnit};
use crate::validation::error::{ErrorKind, FieldPath, ValidationError};

type Object = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

use Presence::{Optional, Required};

/// What a key currently holds, detached from the borrow of the map.
enum Found {
    Absent,
    Object,
    Array,
    Other(&'static str),
}

fn found(value: Option<&Value>) -> Found {
    match value {
        None | Some(Value::Null) => Found::Absent,
        Some(Value::Object(_)) => Found::Object,
        Some(Value::Array(_)) => Found::Array,
        Some(other) => Found::Other(describe(other)),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Non-negative integer that fits an identifier, accepting `3.0` for `3`.
fn as_identifier(value: &Value) -> Option<u32> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_u64()
        .or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })
        .and_then(|id| u32::try_from(id).ok())
}

/// Check `value` against the document shape and repair it in place.
///
/// Returns every structural finding. After this call `value` is an object that
/// deserializes into a `Root`.
pub fn check_structure(value: &mut Value) -> Vec<ValidationError> {
    let mut shape = Shape::default();
    let path = FieldPath::root();

    if let Value::Object(map) = value {
        root(&mut shape, map, &path);
    } else {
        shape.report(
            path.clone(),
            ErrorKind::TypeMismatch,
            format!("expected an object, found {}", describe(value)),
        );
        let mut map = Object::new();
        shape.quietly(|s| root(s, &mut map, &path));
        *value = Value::Object(map);
    }

    shape.errors
}

#[derive(Default)]
struct Shape {
    errors: Vec<ValidationError>,
    quiet: bool,
}

impl Shape {
    fn report(&mut self, path: FieldPath, kind: ErrorKind, message: impl Into<String>) {
        if !self.quiet {
            self.errors.push(ValidationError::new(path, kind, message));
        }
    }

    /// Run `f` without recording findings; used to build default subtrees.
    fn quietly(&mut self, f: impl FnOnce(&mut Self)) {
        let was_quiet = std::mem::replace(&mut self.quiet, true);
        f(self);
        self.quiet = was_quiet;
    }

    fn missing(&mut self, path: FieldPath, key: &str) {
        self.report(
            path,
            ErrorKind::MissingField,
            format!("required field `{}` is missing", key),
        );
    }

    fn mismatch(&mut self, path: FieldPath, expected: &str, found: &str) {
        self.report(
            path,
            ErrorKind::TypeMismatch,
            format!("expected {}, found {}", expected, found),
        );
    }

    fn scalar(
        &mut self,
        obj: &mut Object,
        key: &'static str,
        path: &FieldPath,
        presence: Presence,
        expected: &str,
        accept: fn(&Value) -> bool,
        fallback: Value,
    ) {
        let problem = match obj.get(key) {
            None | Some(Value::Null) => {
                if presence == Required {
                    self.missing(path.key(key), key);
                }
                true
            }
            Some(value) if accept(value) => false,
            Some(value) => {
                self.mismatch(path.key(key), expected, describe(value));
                true
            }
        };
        if problem {
            match presence {
                Required => obj.insert(key.to_string(), fallback),
                Optional => obj.remove(key),
            };
        }
    }

    fn number(&mut self, obj: &mut Object, key: &'static str, path: &FieldPath, presence: Presence) {
        self.scalar(obj, key, path, presence, "a number", Value::is_number, Value::from(0.0));
    }

    fn boolean(&mut self, obj: &mut Object, key: &'static str, path: &FieldPath, presence: Presence) {
        self.scalar(obj, key, path, presence, "a boolean", Value::is_boolean, Value::Bool(false));
    }

    fn string(&mut self, obj: &mut Object, key: &'static str, path: &FieldPath, presence: Presence) {
        self.scalar(
            obj,
            key,
            path,
            presence,
            "a string",
            Value::is_string,
            Value::String(String::new()),
        );
    }

    /// The `id` field of a collection entry.
    fn identifier(&mut self, obj: &mut Object, path: &FieldPath) {
        const KEY: &str = "id";
        let id = match obj.get(KEY) {
            None | Some(Value::Null) => {
                self.missing(path.key(KEY), KEY);
                0
            }
            Some(value) => match as_identifier(value) {
                Some(id) => id,
                None => {
                    let found = match value {
                        Value::Number(n) => format!("{}", n),
                        other => describe(other).to_string(),
                    };
                    self.mismatch(path.key(KEY), "a non-negative integer identifier", &found);
                    0
                }
            },
        };
        obj.insert(KEY.to_string(), Value::from(id));
    }

    fn enumeration(
        &mut self,
        obj: &mut Object,
        key: &'static str,
        path: &FieldPath,
        presence: Presence,
        names: &'static [&'static str],
    ) {
        let problem = match obj.get(key) {
            None | Some(Value::Null) => {
                if presence == Required {
                    self.missing(path.key(key), key);
                }
                true
            }
            Some(Value::String(s)) if names.contains(&s.as_str()) => false,
            Some(Value::String(s)) => {
                self.report(
                    path.key(key),
                    ErrorKind::InvalidEnum,
                    format!("`{}` is not one of {}", s, names.join(", ")),
                );
                true
            }
            Some(value) => {
                self.mismatch(path.key(key), "a string", describe(value));
                true
            }
        };
        if problem {
            match presence {
                Required => obj.insert(key.to_string(), Value::from(names[0])),
                Optional => obj.remove(key),
            };
        }
    }

    /// Optional list of highlighted-result tags. Invalid entries are dropped.
    fn tags(&mut self, obj: &mut Object, key: &'static str, path: &FieldPath) {
        let field = path.key(key);
        match found(obj.get(key)) {
            Found::Absent => {
                obj.remove(key);
            }
            Found::Array => {
                let mut keep = Vec::new();
                if let Some(Value::Array(items)) = obj.get(key) {
                    for (i, item) in items.iter().enumerate() {
                        let ok = match item {
                            Value::String(s) if HighlightedResult::NAMES.contains(&s.as_str()) => true,
                            Value::String(s) => {
                                self.report(
                                    field.index(i),
                                    ErrorKind::InvalidEnum,
                                    format!("`{}` is not a highlighted result", s),
                                );
                                false
                            }
                            other => {
                                self.mismatch(field.index(i), "a string", describe(other));
                                false
                            }
                        };
                        keep.push(ok);
                    }
                }
                if let Some(Value::Array(items)) = obj.get_mut(key) {
                    let mut flags = keep.into_iter();
                    items.retain(|_| flags.next().unwrap_or(true));
                }
            }
            Found::Object => {
                self.mismatch(field, "an array", "an object");
                obj.remove(key);
            }
            Found::Other(what) => {
                self.mismatch(field, "an array", what);
                obj.remove(key);
            }
        }
    }

    /// Required list of identifiers referring to another collection.
    fn id_list(&mut self, obj: &mut Object, key: &'static str, path: &FieldPath) {
        let field = path.key(key);
        match found(obj.get(key)) {
            Found::Array => {
                if let Some(Value::Array(items)) = obj.get_mut(key) {
                    let mut ids = Vec::with_capacity(items.len());
                    for (i, item) in items.iter().enumerate() {
                        match as_identifier(item) {
                            Some(id) => ids.push(Value::from(id)),
                            None => {
                                let found = match item {
                                    Value::Number(n) => format!("{}", n),
                                    other => describe(other).to_string(),
                                };
                                self.mismatch(
                                    field.index(i),
                                    "a non-negative integer identifier",
                                    &found,
                                );
                            }
                        }
                    }
                    *items = ids;
                }
                return;
            }
            Found::Absent => self.missing(field, key),
            Found::Object => self.mismatch(field, "an array", "an object"),
            Found::Other(what) => self.mismatch(field, "an array", what),
        }
        obj.insert(key.to_string(), Value::Array(Vec::new()));
    }

    fn object(
        &mut self,
        obj: &mut Object,
        key: &'static str,
        path: &FieldPath,
        presence: Presence,
        check: impl FnOnce(&mut Self, &mut Object, &FieldPath),
    ) {
        let field = path.key(key);
        match found(obj.get(key)) {
            Found::Object => {
                if let Some(Value::Object(inner)) = obj.get_mut(key) {
                    check(self, inner, &field);
                }
                return;
            }
            Found::Absent if presence == Required => self.missing(field.clone(), key),
            Found::Absent => {
                obj.remove(key);
                return;
            }
            Found::Array => self.mismatch(field.clone(), "an object", "an array"),
            Found::Other(what) => self.mismatch(field.clone(), "an object", what),
        }

        if presence == Optional {
            obj.remove(key);
            return;
        }
        let mut inner = Object::new();
        self.quietly(|s| check(s, &mut inner, &field));
        obj.insert(key.to_string(), Value::Object(inner));
    }

    fn array(
        &mut self,
        obj: &mut Object,
        key: &'static str,
        path: &FieldPath,
        presence: Presence,
        mut check: impl FnMut(&mut Self, &mut Object, &FieldPath),
    ) {
        let field = path.key(key);
        match found(obj.get(key)) {
            Found::Array => {
                if let Some(Value::Array(items)) = obj.get_mut(key) {
                    for (i, item) in items.iter_mut().enumerate() {
                        let item_path = field.index(i);
                        if let Value::Object(entry) = item {
                            check(self, entry, &item_path);
                            continue;
                        }
                        self.mismatch(item_path.clone(), "an object", describe(item));
                        let mut entry = Object::new();
                        self.quietly(|s| check(s, &mut entry, &item_path));
                        *item = Value::Object(entry);
                    }
                }
                return;
            }
            Found::Absent if presence == Required => self.missing(field, key),
            Found::Absent => {
                obj.remove(key);
                return;
            }
            Found::Object => self.mismatch(field, "an array", "an object"),
            Found::Other(what) => self.mismatch(field, "an array", what),
        }

        match presence {
            Required => obj.insert(key.to_string(), Value::Array(Vec::new())),
            Optional => obj.remove(key),
        };
    }

    /// A lookup table: a row array, or a single bare row object.
    fn rows(
        &mut self,
        obj: &mut Object,
        key: &'static str,
        path: &FieldPath,
        check: impl FnMut(&mut Self, &mut Object, &FieldPath),
    ) {
        if let Some(Value::Object(_)) = obj.get(key) {
            if let Some(row) = obj.remove(key) {
                obj.insert(key.to_string(), Value::Array(vec![row]));
            }
        }
        self.array(obj, key, path, Required, check);
    }
}

fn root(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.string(m, "registration", p, Required);
    s.boolean(m, "operationalUse", p, Required);
    s.number(m, "bew", p, Optional);
    s.number(m, "bi", p, Optional);
    s.enumeration(m, "digitalSignature", p, Optional, DigitalSignature::NAMES);
    s.tags(m, "highlightedResults", p);
    s.string(m, "disclaimer", p, Optional);
    s.array(m, "variations", p, Optional, variation);
}

fn variation(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.identifier(m, p);
    s.string(m, "name", p, Required);
    s.string(m, "shortDescription", p, Optional);
    s.string(m, "info", p, Optional);
    s.boolean(m, "default", p, Optional);
    s.object(m, "general", p, Required, general);
    s.object(m, "aircraft", p, Required, aircraft);
    s.object(m, "weightPolicy", p, Required, weight_policy);
    s.object(m, "cabin", p, Required, cabin);
    s.object(m, "holdConfiguration", p, Required, hold_configuration);
    s.object(m, "fuel", p, Required, |s, m, p| s.boolean(m, "trimming", p, Optional));
    s.array(m, "envelopeTypes", p, Required, envelope_type);
    s.object(m, "table", p, Required, table);
}

fn range(s: &mut Shape, m: &mut Object, key: &'static str, p: &FieldPath, presence: Presence) {
    s.object(m, key, p, presence, |s, m, p| {
        s.number(m, "min", p, Required);
        s.number(m, "max", p, Required);
    });
}

fn manual_range(s: &mut Shape, m: &mut Object, key: &'static str, p: &FieldPath) {
    s.object(m, key, p, Required, |s, m, p| {
        s.number(m, "min", p, Required);
        s.number(m, "max", p, Required);
        s.boolean(m, "requireManualInput", p, Optional);
    });
}

fn general(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.enumeration(m, "weightUnit", p, Required, MassUnit::NAMES);
    s.enumeration(m, "fuelUnit", p, Required, MassUnit::NAMES);
    manual_range(s, m, "performanceMtow", p);
    manual_range(s, m, "performanceLw", p);
    range(s, m, "blockFuel", p, Optional);
    for key in [
        "taxiFuel",
        "tripFuel",
        "landingFuel",
        "takeOffFuel",
        "dowCorrection",
        "doiCorrection",
    ] {
        range(s, m, key, p, Required);
    }
    for key in ["dowLimit", "doiLimit", "payloadLimit"] {
        range(s, m, key, p, Optional);
    }
    s.boolean(m, "drawFuelVector", p, Required);
    s.string(m, "disclaimer", p, Optional);
    s.enumeration(m, "digitalSignature", p, Optional, DigitalSignature::NAMES);
    s.tags(m, "highlightedResults", p);
}

fn aircraft(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.number(m, "structuralMzfw", p, Required);
    s.number(m, "structuralMrmpw", p, Required);
    s.number(m, "structuralMlw", p, Required);
    s.array(m, "configurationGroups", p, Required, |s, m, p| {
        s.string(m, "label", p, Required);
        s.array(m, "configurations", p, Required, |s, m, p| {
            s.identifier(m, p);
            s.string(m, "label", p, Optional);
            s.number(m, "indexShift", p, Optional);
            s.number(m, "weightShift", p, Optional);
            s.boolean(m, "default", p, Optional);
        });
    });
    s.array(m, "structuralMtows", p, Required, |s, m, p| {
        s.number(m, "mtow", p, Required)
    });
}

fn weight_policy(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.object(m, "passenger", p, Required, |s, m, p| {
        s.boolean(m, "allowOptimum", p, Optional);
        s.boolean(m, "default", p, Optional);
        s.array(m, "paxWeightPolicies", p, Required, |s, m, p| {
            s.identifier(m, p);
            for key in [
                "maleWeight",
                "femaleWeight",
                "childWeight",
                "adultWeight",
                "infantWeight",
            ] {
                s.number(m, key, p, Required);
            }
            s.string(m, "label", p, Required);
            s.boolean(m, "default", p, Optional);
        });
    });
    s.object(m, "bag", p, Required, |s, m, p| {
        s.boolean(m, "default", p, Optional);
        s.array(m, "bagWeightPolicies", p, Required, |s, m, p| {
            s.identifier(m, p);
            s.string(m, "label", p, Required);
            s.number(m, "bagWeight", p, Required);
            s.boolean(m, "default", p, Optional);
        });
    });
}

fn cabin(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.enumeration(m, "type", p, Required, CabinType::NAMES);
    s.array(m, "sections", p, Required, |s, m, p| {
        s.identifier(m, p);
        s.number(m, "indexShiftPerWeightUnit", p, Required);
        s.boolean(m, "jumpSeat", p, Optional);
        s.string(m, "label", p, Required);
        s.number(m, "max", p, Required);
        s.number(m, "rowFrom", p, Optional);
        s.number(m, "rowTo", p, Optional);
    });
}

fn hold_configuration(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.boolean(m, "useMail", p, Optional);
    s.boolean(m, "useCargo", p, Optional);
    s.boolean(m, "useBags", p, Optional);
    s.number(m, "daaWeight", p, Optional);
    s.number(m, "crewBagWeight", p, Optional);
    s.array(m, "holds", p, Required, |s, m, p| {
        s.identifier(m, p);
        s.boolean(m, "used", p, Optional);
        s.string(m, "label", p, Optional);
        s.number(m, "max", p, Optional);
        s.number(m, "indexShiftPerWeightUnit", p, Optional);
    });
    s.array(m, "combinedLimits", p, Required, |s, m, p| {
        s.number(m, "max", p, Optional);
        s.id_list(m, "holds", p);
    });
}

fn envelope_type(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.identifier(m, p);
    s.string(m, "label", p, Required);
    s.boolean(m, "default", p, Optional);
    for key in ["zfw", "tow", "lw"] {
        s.object(m, key, p, Required, envelope);
    }
}

fn envelope(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.number(m, "weight", p, Optional);
    s.number(m, "minVal", p, Optional);
    s.number(m, "maxVal", p, Optional);
    s.array(m, "envelope", p, Required, |s, m, p| {
        s.number(m, "x", p, Required);
        s.number(m, "y", p, Required);
    });
}

fn table(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.rows(m, "standardFueling", p, record);
    s.rows(m, "cgToMac", p, |s, m, p| {
        for key in ["mac", "index1", "weight1", "index2", "weight2"] {
            s.number(m, key, p, Required);
        }
    });
    s.rows(m, "macToThs", p, record);
}

fn record(s: &mut Shape, m: &mut Object, p: &FieldPath) {
    s.number(m, "y", p, Required);
    s.number(m, "value", p, Required);
}
