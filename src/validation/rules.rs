//! Semantic rules over the typed document.
//!
//! Every rule runs; nothing short-circuits. Findings are collected in tree
//! order so the report reads top to bottom.

use std::collections::{HashMap, HashSet};

use crate::document::primitives::HighlightedResult;
use crate::document::renumber::Identified;
use crate::document::schema::{
    Aircraft, Cabin, Envelope, EnvelopeType, General, HoldConfiguration, Lines, Records, Root,
    Table, Variation, WeightPolicy,
};
use crate::validation::error::{Advisory, ErrorKind, FieldPath, ValidationError};
use crate::validation::ValidationOptions;

pub(crate) const REGISTRATION_LEN: usize = 5;

pub(crate) struct Rules<'o> {
    options: &'o ValidationOptions,
    pub(crate) errors: Vec<ValidationError>,
    pub(crate) advisories: Vec<Advisory>,
}

impl<'o> Rules<'o> {
    pub(crate) fn new(options: &'o ValidationOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
            advisories: Vec::new(),
        }
    }

    fn error(&mut self, path: FieldPath, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(ValidationError::new(path, kind, message));
    }

    fn advise(&mut self, path: FieldPath, message: impl Into<String>) {
        self.advisories.push(Advisory::new(path, message));
    }

    /// Reports non-finite values. Returns whether the value is usable.
    fn finite(&mut self, path: FieldPath, value: f64) -> bool {
        if value.is_finite() {
            return true;
        }
        self.error(
            path,
            ErrorKind::TypeMismatch,
            format!("expected a finite number, found {}", value),
        );
        false
    }

    fn non_negative(&mut self, path: FieldPath, value: f64) {
        if self.finite(path.clone(), value) && value < 0.0 {
            self.error(
                path,
                ErrorKind::OutOfRange,
                format!("must not be negative, found {}", value),
            );
        }
    }

    fn positive(&mut self, path: FieldPath, value: f64) {
        if self.finite(path.clone(), value) && value <= 0.0 {
            self.error(
                path,
                ErrorKind::OutOfRange,
                format!("must be greater than zero, found {}", value),
            );
        }
    }

    fn optional_finite(&mut self, path: FieldPath, value: Option<f64>) {
        if let Some(value) = value {
            self.finite(path, value);
        }
    }

    fn optional_non_negative(&mut self, path: FieldPath, value: Option<f64>) {
        if let Some(value) = value {
            self.non_negative(path, value);
        }
    }

    /// Every id in `items` must be unique; later duplicates are reported.
    fn unique_ids<T: Identified>(&mut self, path: &FieldPath, items: &[T]) {
        let mut first_seen: HashMap<u32, usize> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            match first_seen.get(&item.id()) {
                Some(first) => self.error(
                    path.index(i).key("id"),
                    ErrorKind::DuplicateId,
                    format!("id {} is already used by {}", item.id(), path.index(*first)),
                ),
                None => {
                    first_seen.insert(item.id(), i);
                }
            }
        }
    }

    /// At most one entry of a collection should carry `default: true`.
    fn single_default(&mut self, path: &FieldPath, flags: impl Iterator<Item = Option<bool>>) {
        let marked = flags.filter(|f| *f == Some(true)).count();
        if marked <= 1 {
            return;
        }
        let message = format!("{} entries are marked default, expected at most one", marked);
        if self.options.single_default {
            self.error(path.clone(), ErrorKind::DuplicateId, message);
        } else {
            self.advise(path.clone(), message);
        }
    }

    fn highlighted(&mut self, path: &FieldPath, tags: Option<&[HighlightedResult]>) {
        let Some(tags) = tags else {
            return;
        };
        let mut seen = HashSet::new();
        for (i, tag) in tags.iter().enumerate() {
            if !seen.insert(*tag) {
                self.error(
                    path.index(i),
                    ErrorKind::DuplicateId,
                    format!("{} is listed more than once", tag),
                );
            }
        }
    }

    /// Rows must be non-decreasing on `key`; the first row breaking order is reported.
    fn sorted<T>(&mut self, path: &FieldPath, rows: &[T], key_name: &str, key: impl Fn(&T) -> f64) {
        let position = rows
            .windows(2)
            .position(|pair| key(&pair[1]) < key(&pair[0]));
        if let Some(i) = position {
            self.error(
                path.index(i + 1),
                ErrorKind::NotSorted,
                format!(
                    "rows must be sorted ascending on `{}`: {} follows {}",
                    key_name,
                    key(&rows[i + 1]),
                    key(&rows[i])
                ),
            );
        }
    }

    pub(crate) fn root(&mut self, root: &Root) {
        let path = FieldPath::root();

        let len = root.registration.chars().count();
        if len != REGISTRATION_LEN {
            self.error(
                path.key("registration"),
                ErrorKind::OutOfRange,
                format!(
                    "registration must be exactly {} characters, found {}",
                    REGISTRATION_LEN, len
                ),
            );
        } else if !root.registration.chars().all(|c| c.is_alphabetic()) {
            self.advise(
                path.key("registration"),
                "registration is expected to contain letters only",
            );
        }

        if let Some(bew) = root.bew {
            let bew_path = path.key("bew");
            if self.finite(bew_path.clone(), bew) {
                if bew < 0.0 {
                    self.error(
                        bew_path,
                        ErrorKind::OutOfRange,
                        format!("BEW must not be negative, found {}", bew),
                    );
                } else if bew.fract() != 0.0 {
                    self.error(
                        bew_path,
                        ErrorKind::TypeMismatch,
                        format!("BEW must be an integer, found {}", bew),
                    );
                }
            }
        }
        self.optional_non_negative(path.key("bi"), root.bi);
        self.highlighted(
            &path.key("highlightedResults"),
            root.highlighted_results.as_deref(),
        );

        let Some(variations) = root.variations.as_deref() else {
            return;
        };
        let variations_path = path.key("variations");
        if variations.is_empty() {
            self.error(
                variations_path.clone(),
                ErrorKind::MissingField,
                "at least one variation must be defined",
            );
        }
        self.unique_ids(&variations_path, variations);
        self.single_default(&variations_path, variations.iter().map(|v| v.is_default));
        for (i, variation) in variations.iter().enumerate() {
            self.variation(&variations_path.index(i), variation);
        }
    }

    fn variation(&mut self, path: &FieldPath, variation: &Variation) {
        self.general(&path.key("general"), &variation.general);
        self.aircraft(&path.key("aircraft"), &variation.aircraft);
        self.weight_policy(&path.key("weightPolicy"), &variation.weight_policy);
        self.cabin(&path.key("cabin"), &variation.cabin);
        self.hold_configuration(&path.key("holdConfiguration"), &variation.hold_configuration);
        self.envelope_types(&path.key("envelopeTypes"), &variation.envelope_types);
        self.table(&path.key("table"), &variation.table);
    }

    fn general(&mut self, path: &FieldPath, general: &General) {
        for (key, range) in general.ranges() {
            let field = path.key(key);
            let min_ok = self.finite(field.key("min"), range.min);
            let max_ok = self.finite(field.key("max"), range.max);
            if min_ok && max_ok && !range.is_ordered() {
                self.error(
                    field,
                    ErrorKind::OutOfRange,
                    format!("min {} is greater than max {}", range.min, range.max),
                );
            }
        }
        self.highlighted(
            &path.key("highlightedResults"),
            general.highlighted_results.as_deref(),
        );
    }

    fn aircraft(&mut self, path: &FieldPath, aircraft: &Aircraft) {
        let limits = [
            ("structuralMzfw", aircraft.structural_mzfw),
            ("structuralMrmpw", aircraft.structural_mrmpw),
            ("structuralMlw", aircraft.structural_mlw),
        ];
        for (key, value) in limits {
            self.non_negative(path.key(key), value);
        }
        let (mzfw, mlw, mrmpw) = (
            aircraft.structural_mzfw,
            aircraft.structural_mlw,
            aircraft.structural_mrmpw,
        );
        if !(mzfw <= mlw && mlw <= mrmpw) && [mzfw, mlw, mrmpw].iter().all(|v| v.is_finite()) {
            self.advise(
                path.clone(),
                format!(
                    "expected MZFW <= MLW <= MRMPW, found {} / {} / {}",
                    mzfw, mlw, mrmpw
                ),
            );
        }

        let mtows_path = path.key("structuralMtows");
        if aircraft.structural_mtows.is_empty() && self.options.require_complete_variations {
            self.error(
                mtows_path.clone(),
                ErrorKind::MissingField,
                "at least one structural MTOW must be defined",
            );
        }
        for (i, entry) in aircraft.structural_mtows.iter().enumerate() {
            let mtow_path = mtows_path.index(i).key("mtow");
            self.non_negative(mtow_path.clone(), entry.mtow);
            if mrmpw.is_finite() && mrmpw > 0.0 && entry.mtow > mrmpw {
                self.advise(
                    mtow_path,
                    format!("MTOW {} exceeds MRMPW {}", entry.mtow, mrmpw),
                );
            }
        }

        let groups_path = path.key("configurationGroups");
        for (g, group) in aircraft.configuration_groups.iter().enumerate() {
            let configs_path = groups_path.index(g).key("configurations");
            self.unique_ids(&configs_path, &group.configurations);
            self.single_default(&configs_path, group.configurations.iter().map(|c| c.is_default));
            for (i, config) in group.configurations.iter().enumerate() {
                self.optional_finite(configs_path.index(i).key("indexShift"), config.index_shift);
                self.optional_finite(configs_path.index(i).key("weightShift"), config.weight_shift);
            }
        }
    }

    fn weight_policy(&mut self, path: &FieldPath, policy: &WeightPolicy) {
        let pax_path = path.key("passenger").key("paxWeightPolicies");
        let pax = &policy.passenger.pax_weight_policies;
        self.unique_ids(&pax_path, pax);
        self.single_default(&pax_path, pax.iter().map(|p| p.is_default));
        for (i, entry) in pax.iter().enumerate() {
            for (key, weight) in entry.weights() {
                self.positive(pax_path.index(i).key(key), weight);
            }
        }

        let bag_path = path.key("bag").key("bagWeightPolicies");
        let bags = &policy.bag.bag_weight_policies;
        self.unique_ids(&bag_path, bags);
        self.single_default(&bag_path, bags.iter().map(|b| b.is_default));
        for (i, entry) in bags.iter().enumerate() {
            self.positive(bag_path.index(i).key("bagWeight"), entry.bag_weight);
        }
    }

    fn cabin(&mut self, path: &FieldPath, cabin: &Cabin) {
        let sections_path = path.key("sections");
        self.unique_ids(&sections_path, &cabin.sections);
        for (i, section) in cabin.sections.iter().enumerate() {
            let section_path = sections_path.index(i);
            self.finite(
                section_path.key("indexShiftPerWeightUnit"),
                section.index_shift_per_weight_unit,
            );
            self.non_negative(section_path.key("max"), section.max);
            self.optional_non_negative(section_path.key("rowFrom"), section.row_from);
            self.optional_non_negative(section_path.key("rowTo"), section.row_to);
            if let (Some(from), Some(to)) = (section.row_from, section.row_to) {
                if from > to {
                    self.error(
                        section_path,
                        ErrorKind::OutOfRange,
                        format!("rowFrom {} is greater than rowTo {}", from, to),
                    );
                }
            }
        }
    }

    fn hold_configuration(&mut self, path: &FieldPath, config: &HoldConfiguration) {
        self.optional_non_negative(path.key("daaWeight"), config.daa_weight);
        self.optional_non_negative(path.key("crewBagWeight"), config.crew_bag_weight);

        let holds_path = path.key("holds");
        self.unique_ids(&holds_path, &config.holds);
        for (i, hold) in config.holds.iter().enumerate() {
            self.optional_non_negative(holds_path.index(i).key("max"), hold.max);
            self.optional_finite(
                holds_path.index(i).key("indexShiftPerWeightUnit"),
                hold.index_shift_per_weight_unit,
            );
        }

        let known: HashSet<u32> = config.holds.iter().map(|h| h.id).collect();
        let limits_path = path.key("combinedLimits");
        for (i, limit) in config.combined_limits.iter().enumerate() {
            let limit_path = limits_path.index(i);
            self.optional_non_negative(limit_path.key("max"), limit.max);
            for (j, id) in limit.holds.iter().enumerate() {
                if !known.contains(id) {
                    self.error(
                        limit_path.key("holds").index(j),
                        ErrorKind::DanglingReference,
                        format!("hold {} does not exist in {}", id, holds_path),
                    );
                }
            }
        }
    }

    fn envelope_types(&mut self, path: &FieldPath, types: &[EnvelopeType]) {
        if types.is_empty() && self.options.require_complete_variations {
            self.error(
                path.clone(),
                ErrorKind::MissingField,
                "at least one envelope type must be defined",
            );
        }
        self.unique_ids(path, types);
        self.single_default(path, types.iter().map(|t| t.is_default));
        for (i, envelope_type) in types.iter().enumerate() {
            for (key, envelope) in envelope_type.envelopes() {
                self.envelope(&path.index(i).key(key), envelope);
            }
        }
    }

    fn envelope(&mut self, path: &FieldPath, envelope: &Envelope) {
        self.optional_finite(path.key("weight"), envelope.weight);
        self.optional_finite(path.key("minVal"), envelope.min_val);
        self.optional_finite(path.key("maxVal"), envelope.max_val);
        if let (Some(min), Some(max)) = (envelope.min_val, envelope.max_val) {
            if min > max {
                self.error(
                    path.clone(),
                    ErrorKind::OutOfRange,
                    format!("minVal {} is greater than maxVal {}", min, max),
                );
            }
        }
        let points_path = path.key("envelope");
        for (i, point) in envelope.envelope.iter().enumerate() {
            self.finite(points_path.index(i).key("x"), point.x);
            self.finite(points_path.index(i).key("y"), point.y);
        }
    }

    fn table(&mut self, path: &FieldPath, table: &Table) {
        for (key, rows) in [
            ("standardFueling", &table.standard_fueling),
            ("macToThs", &table.mac_to_ths),
        ] {
            let rows_path = path.key(key);
            for (i, row) in rows.iter().enumerate() {
                self.finite(rows_path.index(i).key("y"), row.y);
                self.finite(rows_path.index(i).key("value"), row.value);
            }
            self.sorted(&rows_path, rows, "y", |r: &Records| r.y);
        }

        let lines_path = path.key("cgToMac");
        for (i, line) in table.cg_to_mac.iter().enumerate() {
            let fields = [
                ("mac", line.mac),
                ("index1", line.index1),
                ("weight1", line.weight1),
                ("index2", line.index2),
                ("weight2", line.weight2),
            ];
            for (key, value) in fields {
                self.finite(lines_path.index(i).key(key), value);
            }
        }
        self.sorted(&lines_path, &table.cg_to_mac, "mac", |l: &Lines| l.mac);
    }
}
