// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, NaiveDate};

/// Supplier lead time in days for an order of `quantity` units.
pub fn lead_time_days(quantity: i64) -> u64 {
    match quantity {
        i64::MIN..=10 => 0,
        11..=100 => 1,
        101..=1000 => 4,
        _ => 7,
    }
}

/// Date a supplier order placed on `start` should arrive.
pub fn get_supplier_delivery_date(quantity: i64, start: NaiveDate) -> NaiveDate {
    let days = lead_time_days(quantity);
    let eta = start.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
    tracing::trace!(quantity, %start, %eta, "delivery estimate");
    eta
}
