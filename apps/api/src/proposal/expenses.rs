//! Reimbursable expense arithmetic.
//!
//! Costs are grossed up by dividing by 0.9 (a 10% markup taken from the billed
//! amount). Mileage is billed at $0.70 per mile and meals at $25 each. Nothing is
//! rounded here; callers round for display.

use serde::{Deserialize, Serialize};

use crate::proposal::models::{MileageInputs, ReimbursableInputs};

pub const MARKUP_DIVISOR: f64 = 0.9;
pub const MILEAGE_RATE: f64 = 0.70;
pub const MEAL_RATE: f64 = 25.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReimbursableTotals {
    pub mileage_total: f64,
    pub meals_total: f64,
    pub hotel_total: f64,
    pub equipment_total: f64,
    pub shipping_total: f64,
    pub grand_total: f64,
    /// Human-readable working for each category.
    pub details: Vec<String>,
}

/// A multiplier of zero (or unset) means a single trip.
fn trips(multiplier: f64) -> f64 {
    if multiplier == 0.0 {
        1.0
    } else {
        multiplier
    }
}

pub fn driving_mileage_total(one_way_miles: f64) -> f64 {
    one_way_miles * 2.0 * MILEAGE_RATE / MARKUP_DIVISOR
}

/// Local miles driven in flight mode: airport↔hotel plus hotel↔project legs.
pub fn local_miles(mileage: &MileageInputs) -> f64 {
    mileage.airport_to_hotel * trips(mileage.airport_to_hotel_multiplier)
        + mileage.hotel_to_project * trips(mileage.hotel_to_project_multiplier)
}

pub fn flying_mileage_total(mileage: &MileageInputs) -> f64 {
    mileage.flight_cost / MARKUP_DIVISOR + local_miles(mileage) * MILEAGE_RATE / MARKUP_DIVISOR
}

pub fn calculate(inputs: &ReimbursableInputs) -> ReimbursableTotals {
    let mileage = &inputs.mileage;
    let mileage_total = if mileage.is_flying {
        flying_mileage_total(mileage)
    } else {
        driving_mileage_total(mileage.miles)
    };
    let meals_total = inputs.meal_count * MEAL_RATE;
    let hotel_total = inputs.hotel_cost / MARKUP_DIVISOR;
    let equipment_total = inputs.equipment_cost / MARKUP_DIVISOR;
    let shipping_total = inputs.shipping_cost / MARKUP_DIVISOR;

    let grand_total = mileage_total + meals_total + hotel_total + equipment_total + shipping_total;

    let mut details = Vec::with_capacity(8);
    if mileage.is_flying {
        let to_hotel_trips = trips(mileage.airport_to_hotel_multiplier);
        let to_project_trips = trips(mileage.hotel_to_project_multiplier);
        details.push(format!(
            "Flight: ${} ÷ 0.9 = ${:.2}",
            mileage.flight_cost,
            mileage.flight_cost / MARKUP_DIVISOR
        ));
        details.push(format!(
            "Airport to Hotel: {} × {} = {} miles",
            mileage.airport_to_hotel,
            to_hotel_trips,
            mileage.airport_to_hotel * to_hotel_trips
        ));
        details.push(format!(
            "Hotel to Project: {} × {} = {} miles",
            mileage.hotel_to_project,
            to_project_trips,
            mileage.hotel_to_project * to_project_trips
        ));
        details.push(format!(
            "Local Mileage: {} × $0.70 ÷ 0.9 = ${:.2}",
            local_miles(mileage),
            local_miles(mileage) * MILEAGE_RATE / MARKUP_DIVISOR
        ));
    } else {
        details.push(format!(
            "Mileage: {} × 2 × $0.70 ÷ 0.9 = ${mileage_total:.2}",
            mileage.miles
        ));
    }
    details.push(format!(
        "Meals: {} × $25 = ${meals_total:.2}",
        inputs.meal_count
    ));
    details.push(format!(
        "Hotel: ${} ÷ 0.9 = ${hotel_total:.2}",
        inputs.hotel_cost
    ));
    details.push(format!(
        "Equipment: ${} ÷ 0.9 = ${equipment_total:.2}",
        inputs.equipment_cost
    ));
    details.push(format!(
        "Shipping: ${} ÷ 0.9 = ${shipping_total:.2}",
        inputs.shipping_cost
    ));

    ReimbursableTotals {
        mileage_total,
        meals_total,
        hotel_total,
        equipment_total,
        shipping_total,
        grand_total,
        details,
    }
}
