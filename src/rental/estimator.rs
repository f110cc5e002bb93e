// Copyright 2025 LocaLLM Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::types::round_to;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Billing period selected on the rental form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalDuration {
    #[default]
    Hourly,
    Daily,
    Monthly,
}

impl RentalDuration {
    /// Hours billed per selected period.
    pub fn multiplier(&self) -> f64 {
        match self {
            RentalDuration::Hourly => 1.0,
            RentalDuration::Daily => HOURS_PER_DAY,
            RentalDuration::Monthly => HOURS_PER_MONTH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalDuration::Hourly => "hourly",
            RentalDuration::Daily => "daily",
            RentalDuration::Monthly => "monthly",
        }
    }
}

impl fmt::Display for RentalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hourly" => Ok(RentalDuration::Hourly),
            "daily" => Ok(RentalDuration::Daily),
            "monthly" => Ok(RentalDuration::Monthly),
            _ => Err(format!("unknown rental duration: {s}")),
        }
    }
}

/// Hourly rate actually charged: a positive bid wins over the listed price.
pub fn effective_rate(listed_price: f64, bid_price: Option<f64>) -> f64 {
    match bid_price {
        Some(bid) if bid > 0.0 => bid,
        _ => listed_price,
    }
}

/// Estimated total in dollars, rounded to cents. A zero quantity counts as one.
pub fn estimate_cost(
    listed_price: f64,
    duration: RentalDuration,
    quantity: u32,
    bid_price: Option<f64>,
) -> f64 {
    let quantity = quantity.max(1) as f64;
    round_to(
        effective_rate(listed_price, bid_price) * duration.multiplier() * quantity,
        2,
    )
}
