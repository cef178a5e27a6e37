//! Zone classification and pincode lookups
//!
//! Zone is decided by the first 3 digits of the destination pincode
//! against the table's prefix set. District lookup is a separate, exact
//! match over partial per-district enumerations and never influences the
//! price.

use crate::table::RateTable;
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static PINCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("pincode pattern is valid"));

/// Delivery zone for a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Local,
    Outstation,
}

impl Zone {
    /// Wire value, as consumed by the storefront UI
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Local => "local",
            Zone::Outstation => "outstation",
        }
    }

    /// Display label shown next to the quote
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Local => "Within Kerala",
            Zone::Outstation => "Rest of India",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-side input gate: exactly 6 ASCII digits.
///
/// The estimator itself never requires this; a malformed pincode simply
/// fails prefix matching and is charged the interstate rate.
pub fn is_valid_pincode(pincode: &str) -> bool {
    PINCODE_RE.is_match(pincode)
}

/// True iff the pincode's 3-digit prefix is a known local-zone prefix.
///
/// Expects a non-empty string; no format validation is performed here.
pub fn is_local_zone(table: &RateTable, pincode: &str) -> bool {
    let prefix: String = pincode.chars().take(3).collect();
    table.pincode_prefixes.iter().any(|p| *p == prefix)
}

/// Zone for a pincode, local iff the prefix matches
pub fn zone_for_pincode(table: &RateTable, pincode: &str) -> Zone {
    if is_local_zone(table, pincode) {
        Zone::Local
    } else {
        Zone::Outstation
    }
}

/// District whose exact pincode list contains the given pincode.
///
/// Returns `None` when no district enumerates it, which is normal even for
/// local pincodes: the lists are partial.
pub fn district_for_pincode<'a>(table: &'a RateTable, pincode: &str) -> Option<&'a str> {
    table
        .districts
        .iter()
        .find(|(_, district)| district.pincodes.iter().any(|p| p == pincode))
        .map(|(name, _)| name.as_str())
}
