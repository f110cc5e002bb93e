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

use rand::{rng, Rng};
use std::collections::HashSet;

use crate::catalog::constants::{
    CPUS, GENERATED_ID_PREFIX, GENERATED_ID_SUFFIX_LEN, GENERATED_PRICE_FACTOR_MAX,
    GENERATED_PRICE_FACTOR_MIN, LOCATIONS, MAX_TEMPLATE_POOL, OCCUPIED_PROBABILITY,
    RELIABILITY_MAX, RELIABILITY_MIN,
};
use crate::catalog::types::{round_to, scale_price, Availability, Offer};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate `count` synthetic offers from `templates` using the thread RNG.
pub fn generate_offers(templates: &[Offer], count: usize) -> Vec<Offer> {
    generate_offers_with(&mut rng(), templates, count)
}

/// Generate `count` synthetic offers, sampling templates from the first
/// [`MAX_TEMPLATE_POOL`] entries. Returns nothing when `templates` is empty.
pub fn generate_offers_with<R: Rng + ?Sized>(
    rng: &mut R,
    templates: &[Offer],
    count: usize,
) -> Vec<Offer> {
    let pool = &templates[..templates.len().min(MAX_TEMPLATE_POOL)];
    if pool.is_empty() {
        return Vec::new();
    }

    let mut taken: HashSet<String> = templates.iter().map(|t| t.id.clone()).collect();
    let mut offers = Vec::with_capacity(count);

    for index in 0..count {
        let template = &pool[rng.random_range(0..pool.len())];

        let id = loop {
            let candidate = synthetic_id(rng, index, &template.model);
            if taken.insert(candidate.clone()) {
                break candidate;
            }
        };

        let status = if rng.random_bool(OCCUPIED_PROBABILITY) {
            Availability::Occupied
        } else {
            Availability::Available
        };

        offers.push(Offer {
            id,
            location: LOCATIONS[rng.random_range(0..LOCATIONS.len())].to_string(),
            cpu: CPUS[rng.random_range(0..CPUS.len())].to_string(),
            price: scale_price(
                template.price,
                rng.random_range(GENERATED_PRICE_FACTOR_MIN..=GENERATED_PRICE_FACTOR_MAX),
            ),
            reliability: round_to(rng.random_range(RELIABILITY_MIN..=RELIABILITY_MAX), 1),
            status,
            ..template.clone()
        });
    }

    offers
}

/// Build an identity of the form `gen-{index}-{random}-{model}`.
fn synthetic_id<R: Rng + ?Sized>(rng: &mut R, index: usize, model: &str) -> String {
    let suffix: String = (0..GENERATED_ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    let compact_model: String = model.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{GENERATED_ID_PREFIX}{index}-{suffix}-{compact_model}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::templates::base_offers;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_templates_generate_nothing() {
        assert!(generate_offers(&[], 15).is_empty());
    }

    #[test]
    fn test_generated_count_and_id_format() {
        let templates = base_offers();
        let offers = generate_offers(&templates, 15);
        assert_eq!(offers.len(), 15);

        for (i, offer) in offers.iter().enumerate() {
            assert!(offer.id.starts_with(&format!("gen-{i}-")), "{}", offer.id);
            assert!(!offer.id.contains(' '));
        }
    }

    #[test]
    fn test_generated_fields_within_bounds() {
        let templates = base_offers();
        let mut rng = StdRng::seed_from_u64(7);
        let offers = generate_offers_with(&mut rng, &templates, 200);

        for offer in &offers {
            // Several templates share a model, so accept any of them as the source
            let from_template = templates[..MAX_TEMPLATE_POOL].iter().any(|t| {
                offer.id.ends_with(&t.model.replace(' ', ""))
                    && offer.specs == t.specs
                    && offer.price >= t.price * 0.9 - 0.0005
                    && offer.price <= t.price * 1.1 + 0.0005
            });
            assert!(from_template, "{} has no matching template", offer.id);

            assert!(offer.price > 0.0);
            assert!((98.0..=99.9).contains(&offer.reliability));
            assert!(LOCATIONS.contains(&offer.location.as_str()));
            assert!(CPUS.contains(&offer.cpu.as_str()));
            assert_ne!(offer.status, Availability::Unverified);
        }
    }

    #[test]
    fn test_generated_copies_template_fields() {
        let template = base_offers().remove(3);
        let offers = generate_offers(std::slice::from_ref(&template), 5);

        for offer in offers {
            assert_eq!(offer.model, template.model);
            assert_eq!(offer.count, template.count);
            assert_eq!(offer.vram, template.vram);
            assert_eq!(offer.tflops, template.tflops);
            assert_eq!(offer.storage, template.storage);
            assert_eq!(offer.max_duration, template.max_duration);
            assert_eq!(offer.specs, template.specs);
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let templates = base_offers();
        let offers = generate_offers(&templates, 500);
        let mut ids: HashSet<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        for offer in &offers {
            assert!(ids.insert(offer.id.as_str()), "duplicate id {}", offer.id);
        }
    }

    #[test]
    fn test_occupied_share_is_roughly_one_fifth() {
        let mut rng = StdRng::seed_from_u64(42);
        let offers = generate_offers_with(&mut rng, &base_offers(), 2000);
        let occupied = offers
            .iter()
            .filter(|o| o.status == Availability::Occupied)
            .count();
        assert!((250..=550).contains(&occupied), "occupied = {occupied}");
    }
}
