//! Rate table types — the core data model
//!
//! A `RateTable` defines the shipping tariff as data. Zone membership is
//! keyed by 3-digit PIN prefixes, prices by service tier and weight slab.
//! The numbers in the table are the product's actual prices, so the table
//! is shipped as a structured asset and loaded once, never hardcoded as
//! branching logic.
//!
//! ## Example table
//!
//! ```yaml
//! version: 1
//! pincode_prefixes: ["680", "682"]
//! districts:
//!   Thrissur:
//!     pincodes: ["680001", "680002"]
//! services:
//!   parcel:
//!     name: "Registered Parcel"
//!     description: "Standard tracked parcel service"
//!     delivery_time_local: "2-4 working days"
//!     delivery_time_interstate: "5-8 working days"
//!     local:
//!       weight_slabs:
//!         - { min_grams: 0, max_grams: 500, total: 45, label: "Up to 500g" }
//!         - { min_grams: 501, max_grams: 1000, total: 60, label: "Up to 1kg", default: true }
//!       additional_per_kg: 25
//!     interstate:
//!       weight_slabs:
//!         - { min_grams: 0, max_grams: 500, total: 65, label: "Up to 500g" }
//!         - { min_grams: 501, max_grams: 1000, total: 90, label: "Up to 1kg", default: true }
//!       additional_per_kg: 40
//! ```

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// The builtin tariff shipped with the crate (`data/rates.yaml`)
pub const BUILTIN_RATES_YAML: &str = include_str!("../data/rates.yaml");

static BUILTIN: Lazy<RateTable> = Lazy::new(|| {
    RateTable::from_yaml(BUILTIN_RATES_YAML).expect("embedded rate table must parse")
});

/// The closed set of service tiers the storefront offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCode {
    Parcel,
    SpeedPost,
    ParcelContractual,
}

impl ServiceCode {
    /// Stable enumeration order, used for option listings
    pub const ALL: [ServiceCode; 3] = [
        ServiceCode::Parcel,
        ServiceCode::SpeedPost,
        ServiceCode::ParcelContractual,
    ];

    /// Wire code, matching the `services` keys in the table
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCode::Parcel => "parcel",
            ServiceCode::SpeedPost => "speed_post",
            ServiceCode::ParcelContractual => "parcel_contractual",
        }
    }
}

/// The storefront quotes `parcel` unless the shopper picks otherwise
impl Default for ServiceCode {
    fn default() -> Self {
        ServiceCode::Parcel
    }
}

impl FromStr for ServiceCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "parcel" => Ok(ServiceCode::Parcel),
            "speed_post" => Ok(ServiceCode::SpeedPost),
            "parcel_contractual" => Ok(ServiceCode::ParcelContractual),
            other => Err(Error::UnknownService(other.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete shipping rate table
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Kaithari Rate Table", description = "Shipping tariff table")]
pub struct RateTable {
    /// Schema version for migrations
    #[serde(default)]
    pub version: u32,

    /// Table metadata
    #[serde(default, skip_serializing_if = "TableMeta::is_empty")]
    pub meta: TableMeta,

    /// 3-digit PIN prefixes that classify a destination as the local zone
    #[serde(default)]
    pub pincode_prefixes: Vec<String>,

    /// District name -> exact pincode enumeration, display-only
    #[serde(default)]
    pub districts: BTreeMap<String, District>,

    /// Service code -> tariff definition
    #[serde(default)]
    pub services: BTreeMap<String, ServiceDefinition>,
}

/// Table metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TableMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl TableMeta {
    pub fn is_empty(&self) -> bool {
        self.carrier.is_none()
            && self.effective.is_none()
            && self.updated.is_none()
            && self.tags.is_empty()
    }
}

/// A district's exact pincode membership
///
/// This is a partial enumeration used only for display ("Delivering to
/// Thrissur"). It never decides the zone; prefixes do.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct District {
    pub pincodes: Vec<String>,
}

/// One service tier's tariff
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ServiceDefinition {
    /// Display name
    pub name: String,

    /// Display description
    pub description: String,

    /// Human-readable SLA for local deliveries
    pub delivery_time_local: String,

    /// Human-readable SLA for interstate deliveries
    pub delivery_time_interstate: String,

    /// Rate curve within the local zone
    pub local: ZoneRates,

    /// Rate curve outside the local zone
    pub interstate: ZoneRates,
}

/// A zone's rate curve: ordered weight slabs plus a per-kg surcharge
/// applied beyond the last slab's ceiling
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ZoneRates {
    /// Ascending, non-overlapping weight bands
    pub weight_slabs: Vec<WeightSlab>,

    /// Linear extrapolation rate per started kg above the last slab
    #[serde(default)]
    pub additional_per_kg: u32,
}

impl ZoneRates {
    /// The slab charged when the weight is unknown (zero or negative).
    ///
    /// Prefers the slab flagged `default: true`; tables without a flag fall
    /// back to the second slab, then the first.
    pub fn default_slab(&self) -> Option<&WeightSlab> {
        self.weight_slabs
            .iter()
            .find(|s| s.default)
            .or_else(|| self.weight_slabs.get(1))
            .or_else(|| self.weight_slabs.first())
    }
}

/// One weight band of a rate curve
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WeightSlab {
    /// Inclusive lower bound in grams
    pub min_grams: i64,

    /// Inclusive upper bound in grams
    pub max_grams: i64,

    /// Price in whole currency units, before any display buffer
    pub total: u32,

    /// Human-readable band label ("Up to 1kg")
    pub label: String,

    /// Marks the band charged for unknown weight
    #[serde(default)]
    pub default: bool,
}

impl WeightSlab {
    /// Inclusive containment on both ends. At shared boundaries the first
    /// matching slab in list order wins.
    pub fn contains(&self, weight_grams: i64) -> bool {
        weight_grams >= self.min_grams && weight_grams <= self.max_grams
    }
}

impl RateTable {
    /// The tariff compiled into the binary, parsed once and shared.
    ///
    /// Panics on first use if the embedded asset is malformed; that is a
    /// build defect, not a runtime condition.
    pub fn builtin() -> &'static RateTable {
        &BUILTIN
    }

    /// Parse table from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::TableParse(e.to_string()))
    }

    /// Serialize table to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::TableParse(e.to_string()))
    }

    /// Parse table from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::TableParse(e.to_string()))
    }

    /// Serialize table to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::TableParse(e.to_string()))
    }

    /// Load a table from a `.yaml`/`.yml` or `.json` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Tariff definition for a service tier
    pub fn service(&self, code: ServiceCode) -> Result<&ServiceDefinition> {
        self.services
            .get(code.as_str())
            .ok_or_else(|| Error::UnknownService(code.as_str().to_string()))
    }

    /// Compute hash of the table for change detection
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = self.to_yaml().unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}
