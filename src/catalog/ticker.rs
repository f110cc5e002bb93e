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

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::catalog::store::CatalogStore;

/// Repeating price-jitter task bound to the lifetime of its owner.
///
/// The task is aborted by [`JitterTicker::stop`] or when the ticker is dropped.
pub struct JitterTicker {
    handle: Option<JoinHandle<()>>,
}

impl JitterTicker {
    /// Start jittering `catalog` every `period`. The first tick fires after one
    /// full period, not immediately.
    pub fn start(catalog: Arc<RwLock<CatalogStore>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() completes its first tick immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut store = catalog.write().await;
                store.jitter();
                tracing::trace!(offers = store.len(), "market prices updated");
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for JitterTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_updates_prices() {
        let catalog = Arc::new(RwLock::new(CatalogStore::new()));
        let ticker = JitterTicker::start(Arc::clone(&catalog), Duration::from_secs(5));
        assert!(catalog.read().await.last_updated().is_none());

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(catalog.read().await.last_updated().is_some());
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_leaves_catalog_alone() {
        let catalog = Arc::new(RwLock::new(CatalogStore::new()));
        let mut ticker = JitterTicker::start(Arc::clone(&catalog), Duration::from_secs(5));
        ticker.stop();
        assert!(!ticker.is_running());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(catalog.read().await.last_updated().is_none());
    }
}
