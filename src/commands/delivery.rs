// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::delivery::{get_supplier_delivery_date, lead_time_days};
use crate::utils::{parse_date, required_arg};
use anyhow::{Result, anyhow};

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let quantity = *sub
        .get_one::<i64>("quantity")
        .ok_or_else(|| anyhow!("missing --quantity"))?;
    let start = parse_date(required_arg(sub, "date")?)?;
    let eta = get_supplier_delivery_date(quantity, start);
    println!(
        "{} units ordered {} arrive {} ({} day lead time)",
        quantity,
        start,
        eta,
        lead_time_days(quantity)
    );
    Ok(())
}
