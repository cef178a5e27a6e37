//! Shipping quote computation
//!
//! Pure functions over an immutable [`RateTable`]: no I/O, no state, no
//! runtime failure modes beyond a malformed table or an unknown service
//! code, both of which are programming errors surfaced as `Err`.
//!
//! Matching rules, preserved exactly from the storefront's tariff logic:
//!
//! - `weight <= 0` charges the table's default slab (unknown-weight
//!   convention, not a zero-weight price).
//! - Otherwise the first slab in list order with
//!   `min_grams <= weight <= max_grams` wins, including at shared
//!   boundaries.
//! - Above the last slab's ceiling, every started kg adds
//!   `additional_per_kg` on top of the last slab's total.
//! - A missing pincode quotes the local zone.

use crate::error::{Error, Result};
use crate::table::{RateTable, ServiceCode, WeightSlab, ZoneRates};
use crate::zone::{zone_for_pincode, Zone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A computed shipping quote for one service tier
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShippingEstimate {
    /// Raw price in whole currency units, before the display buffer
    pub total: u32,

    /// Weight band label ("Up to 1kg", or "7.3kg" above the ceiling)
    pub label: String,

    /// Computed zone
    pub zone: Zone,

    /// Display label for the zone
    pub zone_label: String,

    /// Service display name
    pub service_name: String,

    /// Service wire code
    pub service_code: ServiceCode,

    /// Zone-dependent SLA string
    pub delivery_time: String,
}

/// One entry of a cheapest-first service comparison
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ServiceOption {
    pub code: ServiceCode,
    pub name: String,
    pub description: String,
    pub total: u32,
    pub delivery_time: String,
}

fn zone_rates<'a>(
    table: &'a RateTable,
    code: ServiceCode,
    zone: Zone,
) -> Result<&'a ZoneRates> {
    let svc = table.service(code)?;
    Ok(match zone {
        Zone::Local => &svc.local,
        Zone::Outstation => &svc.interstate,
    })
}

fn matching_slab(rates: &ZoneRates, weight_grams: i64) -> Result<Option<&WeightSlab>> {
    if weight_grams <= 0 {
        let slab = rates
            .default_slab()
            .ok_or_else(|| Error::TableInvalid("zone has no weight slabs".into()))?;
        return Ok(Some(slab));
    }
    Ok(rates.weight_slabs.iter().find(|s| s.contains(weight_grams)))
}

fn last_slab(rates: &ZoneRates) -> Result<&WeightSlab> {
    rates
        .weight_slabs
        .last()
        .ok_or_else(|| Error::TableInvalid("zone has no weight slabs".into()))
}

/// Started kilograms above the last slab's ceiling, always >= 1
fn extra_kg_above(last: &WeightSlab, weight_grams: i64) -> Result<i64> {
    let over = weight_grams - last.max_grams;
    if over <= 0 {
        // Unreachable for a contiguous table; a gap means the table is bad.
        return Err(Error::TableInvalid(format!(
            "no weight slab matches {}g",
            weight_grams
        )));
    }
    Ok((over + 999) / 1000)
}

/// Price for a weight under a service tier and zone.
///
/// See the module docs for the exact matching rules.
pub fn rate_for_slab(
    table: &RateTable,
    code: ServiceCode,
    zone: Zone,
    weight_grams: i64,
) -> Result<u32> {
    let rates = zone_rates(table, code, zone)?;
    if let Some(slab) = matching_slab(rates, weight_grams)? {
        return Ok(slab.total);
    }
    let last = last_slab(rates)?;
    let extra_kg = extra_kg_above(last, weight_grams)?;
    Ok(last.total + extra_kg as u32 * rates.additional_per_kg)
}

/// Weight band label for a weight under a service tier and zone.
///
/// Above the tabulated ceiling the label is synthesized from the weight,
/// one decimal: 7300g becomes `"7.3kg"`.
pub fn label_for_weight(
    table: &RateTable,
    code: ServiceCode,
    zone: Zone,
    weight_grams: i64,
) -> Result<String> {
    let rates = zone_rates(table, code, zone)?;
    if let Some(slab) = matching_slab(rates, weight_grams)? {
        return Ok(slab.label.clone());
    }
    Ok(format!("{:.1}kg", weight_grams as f64 / 1000.0))
}

/// Full quote for a cart weight, optional destination pincode, and
/// service tier.
///
/// A missing pincode quotes the local zone; that is the storefront's
/// deliberate choice so the cart shows the cheaper rate before an address
/// is entered.
pub fn estimate(
    table: &RateTable,
    weight_grams: i64,
    pincode: Option<&str>,
    code: ServiceCode,
) -> Result<ShippingEstimate> {
    let zone = match pincode {
        Some(p) => zone_for_pincode(table, p),
        None => Zone::Local,
    };
    let total = rate_for_slab(table, code, zone, weight_grams)?;
    let label = label_for_weight(table, code, zone, weight_grams)?;
    let svc = table.service(code)?;
    let delivery_time = match zone {
        Zone::Local => svc.delivery_time_local.clone(),
        Zone::Outstation => svc.delivery_time_interstate.clone(),
    };
    Ok(ShippingEstimate {
        total,
        label,
        zone,
        zone_label: zone.label().to_string(),
        service_name: svc.name.clone(),
        service_code: code,
        delivery_time,
    })
}

/// All service tiers quoted for the same shipment, cheapest first.
///
/// The sort is stable, so equal totals keep the fixed enumeration order of
/// [`ServiceCode::ALL`].
pub fn all_service_options(
    table: &RateTable,
    weight_grams: i64,
    pincode: Option<&str>,
) -> Result<Vec<ServiceOption>> {
    let mut options = Vec::with_capacity(ServiceCode::ALL.len());
    for code in ServiceCode::ALL {
        let quote = estimate(table, weight_grams, pincode, code)?;
        let svc = table.service(code)?;
        options.push(ServiceOption {
            code,
            name: quote.service_name,
            description: svc.description.clone(),
            total: quote.total,
            delivery_time: quote.delivery_time,
        });
    }
    options.sort_by_key(|o| o.total);
    Ok(options)
}
