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

use crate::catalog::constants::MIN_PRICE;

/// Rental state of an offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(alias = "Verified")]
    Available,
    Occupied,
    Unverified,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Occupied => "Occupied",
            Availability::Unverified => "Unverified",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed hardware sheet shown in the specs dialog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSpecs {
    pub architecture: String,
    pub cuda_cores: u32,
    pub tensor_cores: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rt_cores: Option<u32>,
    pub base_clock: String,
    pub boost_clock: String,
    pub memory_type: String,
    pub memory_bandwidth: String,
    pub power_consumption: String, // TDP
    pub cuda_version: String,
    pub fp32_performance: String,
    pub fp16_performance: String,
}

/// A single hardware offer listed on the marketplace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub model: String,
    pub count: u32,
    pub vram: u32, // in GB
    pub tflops: f64,
    pub cpu: String,
    pub storage: String,
    pub location: String,
    pub price: f64, // per hour
    pub reliability: f64,
    pub max_duration: String,
    pub status: Availability,
    pub specs: OfferSpecs,
}

impl Offer {
    /// Only offers in the `Available` state can start a rental.
    pub fn is_rentable(&self) -> bool {
        self.status == Availability::Available
    }

    /// Short location label without the parenthesised city, e.g. "US-East".
    pub fn region(&self) -> &str {
        self.location
            .split_once(" (")
            .map(|(region, _)| region)
            .unwrap_or(&self.location)
    }
}

/// Round `value` to `places` decimal digits, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Scale a price by `factor` and round to three decimals, never below [`MIN_PRICE`].
pub fn scale_price(price: f64, factor: f64) -> f64 {
    round_to(price * factor, 3).max(MIN_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.87449, 3), 2.874);
        assert_eq!(round_to(3.2000000001, 2), 3.2);
        assert_eq!(round_to(99.86, 1), 99.9);
    }

    #[test]
    fn test_scale_price_never_reaches_zero() {
        assert_eq!(scale_price(0.0004, 0.98), MIN_PRICE);
        assert_eq!(scale_price(1.0, 1.02), 1.02);
    }

    #[test]
    fn test_availability_accepts_legacy_label() {
        let status: Availability = serde_json::from_str("\"Verified\"").unwrap();
        assert_eq!(status, Availability::Available);
        assert_eq!(
            serde_json::to_string(&Availability::Available).unwrap(),
            "\"Available\""
        );
    }
}
