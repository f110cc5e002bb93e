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

use crate::catalog::types::Offer;
use crate::error::{Error, Result};
use crate::rental::estimator::{effective_rate, estimate_cost, RentalDuration};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalOptions {
    pub duration: String,
    pub quantity: u32,
    #[serde(default)]
    pub bid_price: Option<f64>,
}

/// Payload posted by the checkout form to the rental relay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    pub gpu_id: String,
    pub gpu_model: String,
    pub user_details: UserDetails,
    pub rental_options: RentalOptions,
    pub total_cost: f64,
}

/// Payload posted by the landing-page contact form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Rental-form inputs for a cost quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub duration: RentalDuration,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub bid_price: Option<f64>,
}

fn default_quantity() -> u32 {
    1
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            duration: RentalDuration::Hourly,
            quantity: default_quantity(),
            bid_price: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub gpu_id: String,
    pub gpu_model: String,
    pub duration: RentalDuration,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_cost: f64,
}

impl QuoteRequest {
    /// Price the request against `offer`. Fails when the offer cannot be rented.
    pub fn quote(&self, offer: &Offer) -> Result<Quote> {
        if !offer.is_rentable() {
            return Err(Error::Unavailable(offer.id.clone()));
        }

        Ok(Quote {
            gpu_id: offer.id.clone(),
            gpu_model: offer.model.clone(),
            duration: self.duration,
            quantity: self.quantity.max(1),
            unit_price: effective_rate(offer.price, self.bid_price),
            total_cost: estimate_cost(offer.price, self.duration, self.quantity, self.bid_price),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::templates::base_offers;

    fn offer(id: &str) -> Offer {
        base_offers().into_iter().find(|o| o.id == id).unwrap()
    }

    #[test]
    fn test_rental_request_wire_format() {
        let body = serde_json::json!({
            "gpuId": "4090-1",
            "gpuModel": "RTX 4090",
            "userDetails": { "name": "Ada", "email": "ada@example.com" },
            "rentalOptions": { "duration": "hourly", "quantity": 8, "bidPrice": 0.4 },
            "totalCost": 3.2
        });
        let request: RentalRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.gpu_id, "4090-1");
        assert_eq!(request.rental_options.bid_price, Some(0.4));
    }

    #[test]
    fn test_bid_price_is_optional() {
        let body = serde_json::json!({ "duration": "daily", "quantity": 1 });
        let options: RentalOptions = serde_json::from_value(body).unwrap();
        assert_eq!(options.bid_price, None);
    }

    #[test]
    fn test_quote_available_offer() {
        let request = QuoteRequest {
            duration: RentalDuration::Hourly,
            quantity: 8,
            bid_price: Some(0.40),
        };
        let quote = request.quote(&offer("4090-1")).unwrap();
        assert_eq!(quote.unit_price, 0.40);
        assert!((quote.total_cost - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_quote_rejects_occupied_offer() {
        let err = QuoteRequest::default().quote(&offer("h100-8")).unwrap_err();
        assert!(matches!(err, Error::Unavailable(id) if id == "h100-8"));
    }
}
