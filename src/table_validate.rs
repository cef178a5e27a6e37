//! Rate table validation
//!
//! Checks a [`RateTable`] against the invariants the estimator relies on
//! before it goes anywhere near production: prefix and pincode formats,
//! service coverage, and slab ordering per zone curve.

use crate::table::{RateTable, ServiceCode, ZoneRates};
use std::collections::HashMap;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A validation issue found in a rate table
#[derive(Debug, Clone)]
pub struct TableIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub context: String,
}

impl TableIssue {
    pub fn error(code: &str, message: &str, context: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.to_string(),
            context: context.to_string(),
        }
    }

    pub fn warning(code: &str, message: &str, context: &str) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.to_string(),
            context: context.to_string(),
        }
    }
}

/// Result of rate table validation
#[derive(Debug, Default)]
pub struct TableValidationResult {
    pub issues: Vec<TableIssue>,
    pub services_checked: usize,
}

impl TableValidationResult {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a rate table
pub fn validate_table(table: &RateTable) -> TableValidationResult {
    let mut result = TableValidationResult::default();

    check_prefixes(table, &mut result);
    check_districts(table, &mut result);
    check_services(table, &mut result);

    result
}

fn check_prefixes(table: &RateTable, result: &mut TableValidationResult) {
    if table.pincode_prefixes.is_empty() {
        result.issues.push(TableIssue::error(
            "E100",
            "No local-zone pincode prefixes defined",
            "pincode_prefixes",
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for prefix in &table.pincode_prefixes {
        if !is_digits(prefix, 3) {
            result.issues.push(TableIssue::error(
                "E101",
                &format!("Prefix '{}' is not exactly 3 digits", prefix),
                "pincode_prefixes",
            ));
        }
        if !seen.insert(prefix) {
            result.issues.push(TableIssue::warning(
                "W101",
                &format!("Duplicate prefix '{}'", prefix),
                "pincode_prefixes",
            ));
        }
    }
}

fn check_districts(table: &RateTable, result: &mut TableValidationResult) {
    // Pincode -> first district that claimed it
    let mut claimed: HashMap<&str, &str> = HashMap::new();

    for (name, district) in &table.districts {
        let context = format!("districts.{}", name);

        for pincode in &district.pincodes {
            if !is_digits(pincode, 6) {
                result.issues.push(TableIssue::error(
                    "E102",
                    &format!("Pincode '{}' is not exactly 6 digits", pincode),
                    &context,
                ));
                continue;
            }

            // Districts must stay inside the local zone the prefixes define
            let prefix = &pincode[..3];
            if !table.pincode_prefixes.iter().any(|p| p == prefix) {
                result.issues.push(TableIssue::error(
                    "E103",
                    &format!(
                        "Pincode '{}' has prefix '{}' outside the local zone",
                        pincode, prefix
                    ),
                    &context,
                ));
            }

            if let Some(other) = claimed.insert(pincode.as_str(), name.as_str()) {
                result.issues.push(TableIssue::error(
                    "E104",
                    &format!("Pincode '{}' already listed under '{}'", pincode, other),
                    &context,
                ));
            }
        }
    }
}

fn check_services(table: &RateTable, result: &mut TableValidationResult) {
    for code in ServiceCode::ALL {
        match table.services.get(code.as_str()) {
            Some(svc) => {
                result.services_checked += 1;
                check_zone(&svc.local, &format!("services.{}.local", code), result);
                check_zone(
                    &svc.interstate,
                    &format!("services.{}.interstate", code),
                    result,
                );
            }
            None => {
                result.issues.push(TableIssue::error(
                    "E201",
                    &format!("Service '{}' is missing from the table", code),
                    "services",
                ));
            }
        }
    }

    for key in table.services.keys() {
        if key.parse::<ServiceCode>().is_err() {
            result.issues.push(TableIssue::warning(
                "W201",
                &format!("Service '{}' is not a known code and will never be quoted", key),
                "services",
            ));
        }
    }
}

fn check_zone(rates: &ZoneRates, context: &str, result: &mut TableValidationResult) {
    if rates.weight_slabs.is_empty() {
        result.issues.push(TableIssue::error(
            "E301",
            "Zone has no weight slabs",
            context,
        ));
        return;
    }

    if rates.additional_per_kg == 0 {
        result.issues.push(TableIssue::warning(
            "W301",
            "additional_per_kg is 0; weights above the ceiling are free extra kgs",
            context,
        ));
    }

    let defaults = rates.weight_slabs.iter().filter(|s| s.default).count();
    if defaults > 1 {
        result.issues.push(TableIssue::error(
            "E304",
            &format!("{} slabs flagged default, expected at most one", defaults),
            context,
        ));
    } else if defaults == 0 {
        result.issues.push(TableIssue::warning(
            "W304",
            "No slab flagged default; positional fallback (second slab) applies",
            context,
        ));
    }

    for (i, slab) in rates.weight_slabs.iter().enumerate() {
        if slab.min_grams > slab.max_grams {
            result.issues.push(TableIssue::error(
                "E302",
                &format!(
                    "Slab {} has min_grams {} > max_grams {}",
                    i, slab.min_grams, slab.max_grams
                ),
                context,
            ));
        }
    }

    for (i, pair) in rates.weight_slabs.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.min_grams < prev.max_grams {
            result.issues.push(TableIssue::error(
                "E303",
                &format!(
                    "Slab {} overlaps slab {}: [{}, {}] then [{}, {}]",
                    i,
                    i + 1,
                    prev.min_grams,
                    prev.max_grams,
                    next.min_grams,
                    next.max_grams
                ),
                context,
            ));
        } else if next.min_grams == prev.max_grams {
            // Shared endpoint is legal; first match wins at the boundary.
            result.issues.push(TableIssue::warning(
                "W303",
                &format!(
                    "Slabs {} and {} share endpoint {}g; the earlier slab wins",
                    i,
                    i + 1,
                    prev.max_grams
                ),
                context,
            ));
        } else if next.min_grams > prev.max_grams + 1 {
            result.issues.push(TableIssue::warning(
                "W302",
                &format!(
                    "Gap between slabs {} and {}: {}g to {}g is unpriced",
                    i,
                    i + 1,
                    prev.max_grams + 1,
                    next.min_grams - 1
                ),
                context,
            ));
        }
    }
}
