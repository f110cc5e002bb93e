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

//! Integration tests for the marketplace catalog through the public API.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use localllm::prelude::*;
use tokio::sync::RwLock;

#[test]
fn test_session_catalog_lifecycle() {
    let mut catalog = CatalogStore::new();
    assert_eq!(catalog.len(), 16);
    assert_eq!(catalog.initialize(15), 15);
    assert_eq!(catalog.initialize(15), 0);
    assert_eq!(catalog.len(), 31);

    let ids: HashSet<&str> = catalog.offers().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids.len(), 31);
    assert!(catalog.offers().iter().all(|o| o.price > 0.0));
}

#[test]
fn test_view_then_quote() {
    let catalog = CatalogStore::new();
    let query = CatalogQuery {
        gpu_type: "4090".to_string(),
        sort: Some(SortColumn::Price),
        ..CatalogQuery::default()
    };
    let view = catalog.query(&query);
    assert!(!view.is_empty());
    assert!(view.windows(2).all(|w| w[0].price <= w[1].price));

    let cheapest = &view[0];
    let quote = QuoteRequest {
        duration: RentalDuration::Daily,
        quantity: 2,
        bid_price: None,
    }
    .quote(cheapest)
    .unwrap();
    assert_eq!(
        quote.total_cost,
        estimate_cost(cheapest.price, RentalDuration::Daily, 2, None)
    );
}

#[tokio::test(start_paused = true)]
async fn test_jitter_keeps_identity_and_order() {
    let catalog = Arc::new(RwLock::new(CatalogStore::new()));
    let before: Vec<Offer> = catalog.read().await.offers().to_vec();

    let ticker = JitterTicker::start(Arc::clone(&catalog), Duration::from_secs(5));
    tokio::time::sleep(Duration::from_secs(26)).await;
    drop(ticker);

    let after = catalog.read().await;
    assert!(after.last_updated().is_some());
    for (old, new) in before.iter().zip(after.offers()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.specs, new.specs);
        assert_eq!(old.status, new.status);
        // five ticks of at most 2% each
        assert!(new.price >= old.price * 0.98_f64.powi(5) - 0.003);
        assert!(new.price <= old.price * 1.02_f64.powi(5) + 0.003);
    }
}
