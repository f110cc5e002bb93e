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

use chrono::{DateTime, Utc};
use rand::{rng, Rng};

use crate::catalog::constants::{JITTER_FACTOR_MAX, JITTER_FACTOR_MIN};
use crate::catalog::generator::generate_offers_with;
use crate::catalog::templates::base_offers;
use crate::catalog::types::{scale_price, Offer};
use crate::catalog::view::CatalogQuery;

/// In-memory catalog for one browsing session.
///
/// Only [`CatalogStore::initialize`] and [`CatalogStore::jitter`] mutate the
/// records; everything else reads snapshots.
#[derive(Clone, Debug)]
pub struct CatalogStore {
    offers: Vec<Offer>,
    initialized: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl CatalogStore {
    /// Store seeded with the fixed base listings.
    pub fn new() -> Self {
        Self::from_offers(base_offers())
    }

    pub fn from_offers(offers: Vec<Offer>) -> Self {
        Self {
            offers,
            initialized: false,
            last_updated: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Append `synthetic` generated offers. Runs once; later calls return 0.
    pub fn initialize(&mut self, synthetic: usize) -> usize {
        self.initialize_with(&mut rng(), synthetic)
    }

    pub fn initialize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, synthetic: usize) -> usize {
        if self.initialized {
            return 0;
        }
        self.initialized = true;

        let generated = generate_offers_with(rng, &self.offers, synthetic);
        let added = generated.len();
        self.offers.extend(generated);
        self.last_updated = Some(Utc::now());
        tracing::debug!(added, total = self.offers.len(), "catalog initialized");
        added
    }

    /// Perturb every price by a factor in [0.98, 1.02]. Nothing else changes.
    pub fn jitter(&mut self) {
        self.jitter_with(&mut rng());
    }

    pub fn jitter_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for offer in &mut self.offers {
            let factor = rng.random_range(JITTER_FACTOR_MIN..=JITTER_FACTOR_MAX);
            offer.price = scale_price(offer.price, factor);
        }
        self.last_updated = Some(Utc::now());
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.id == id)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn query(&self, query: &CatalogQuery) -> Vec<Offer> {
        query.apply(&self.offers)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::constants::MIN_PRICE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_initialize_runs_once() {
        let mut store = CatalogStore::new();
        assert!(!store.is_initialized());
        assert_eq!(store.len(), 16);

        assert_eq!(store.initialize(15), 15);
        assert!(store.is_initialized());
        assert_eq!(store.len(), 31);

        assert_eq!(store.initialize(15), 0);
        assert_eq!(store.len(), 31);
    }

    #[test]
    fn test_initialize_with_no_templates() {
        let mut store = CatalogStore::from_offers(Vec::new());
        assert_eq!(store.initialize(15), 0);
        assert!(store.is_initialized());
        assert!(store.is_empty());
    }

    #[test]
    fn test_jitter_changes_price_only() {
        let mut store = CatalogStore::new();
        store.initialize(15);
        let before = store.offers().to_vec();

        store.jitter();

        for (old, new) in before.iter().zip(store.offers()) {
            assert_eq!(old.id, new.id);
            assert_eq!(
                Offer {
                    price: new.price,
                    ..old.clone()
                },
                *new
            );
            assert!(new.price > 0.0);
            assert!(new.price >= old.price * 0.98 - 0.0005);
            assert!(new.price <= old.price * 1.02 + 0.0005);
        }
        assert!(store.last_updated().is_some());
    }

    #[test]
    fn test_prices_stay_positive_over_many_ticks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut store = CatalogStore::new();
        store.initialize_with(&mut rng, 15);

        for _ in 0..1000 {
            store.jitter_with(&mut rng);
            assert!(store.offers().iter().all(|o| o.price >= MIN_PRICE));
        }
    }

    #[test]
    fn test_get_by_id() {
        let store = CatalogStore::new();
        assert_eq!(store.get("l40s-1").map(|o| o.model.as_str()), Some("L40S"));
        assert!(store.get("missing").is_none());
    }
}
