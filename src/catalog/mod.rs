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

//! Simulated GPU marketplace: base listings, synthetic offers, price jitter
//! and the filter/sort view.

pub mod constants;
pub mod generator;
pub mod store;
pub mod templates;
pub mod ticker;
pub mod types;
pub mod view;

pub use store::CatalogStore;
pub use ticker::JitterTicker;
pub use types::{Availability, Offer, OfferSpecs};
pub use view::{CatalogQuery, SortColumn, SortDirection};
