// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # Kaithari — shipping rate estimation
//!
//! Deterministic shipping quotes for a handloom textile storefront:
//! (cart weight, destination pincode, service tier) in, (price, zone,
//! weight-band label, delivery SLA) out, driven entirely by a static
//! tariff table.
//!
//! ## Core Concept
//!
//! The tariff is **data, not code**. A [`RateTable`] carries:
//!
//! - the 3-digit PIN prefixes that define the local (Kerala) zone,
//! - per-district pincode enumerations, used only for display,
//! - per-service local/interstate rate curves: ordered weight slabs up to
//!   a ceiling, plus a per-kg surcharge beyond it.
//!
//! Swapping the numbers never touches the logic. A copy of the live
//! tariff is compiled in ([`RateTable::builtin`]); alternate tables load
//! from YAML or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaithari::{all_service_options, estimate, RateTable, ServiceCode};
//!
//! let table = RateTable::builtin();
//!
//! // One quote: 1.2kg parcel to Thrissur
//! let quote = estimate(table, 1200, Some("680001"), ServiceCode::Parcel)?;
//! assert_eq!(quote.zone.as_str(), "local");
//!
//! // Compare tiers, cheapest first
//! let options = all_service_options(table, 1200, Some("680001"))?;
//! assert_eq!(options.len(), 3);
//! assert!(options[0].total <= options[1].total);
//!
//! // What the checkout screen actually shows: raw total + 30% buffer,
//! // rounded up to the next multiple of 10
//! let shown = kaithari::display_price(quote.total);
//! assert_eq!(shown % 10, 0);
//! # Ok::<(), kaithari::Error>(())
//! ```
//!
//! ## Semantics worth knowing
//!
//! - `weight <= 0` is "weight unknown" and charges the table's flagged
//!   default slab (the 501–1000g band in the shipped tariff), not the
//!   smallest one.
//! - A missing pincode quotes the **local** zone on purpose: the cart
//!   shows the cheaper rate until an address is entered.
//! - Slab bounds are inclusive on both ends; at a shared boundary the
//!   first slab in list order wins.
//! - Weights above the last slab's ceiling pay the ceiling price plus the
//!   zone's `additional_per_kg` for every started kilogram.
//! - An unknown service code is a programming error and returns `Err`,
//!   never a degraded quote.
//!
//! The estimator is pure and the table immutable after load, so everything
//! here is freely shareable across threads.

// Core modules
pub mod error;
pub mod table;
pub mod table_validate;

// Operations
pub mod estimate;
pub mod pricing;
pub mod zone;

// Re-exports
pub use error::{Error, Result};
pub use estimate::{
    all_service_options, estimate, label_for_weight, rate_for_slab, ServiceOption,
    ShippingEstimate,
};
pub use pricing::{cart_weight_grams, display_price};
pub use table::{
    District, RateTable, ServiceCode, ServiceDefinition, TableMeta, WeightSlab, ZoneRates,
    BUILTIN_RATES_YAML,
};
pub use table_validate::{
    validate_table, Severity, TableIssue, TableValidationResult,
};
pub use zone::{district_for_pincode, is_local_zone, is_valid_pincode, zone_for_pincode, Zone};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
