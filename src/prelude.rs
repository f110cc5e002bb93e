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

//! The localllm prelude.
//!
//! Convenient re-exports of the types most callers need:
//!
//! ```rust
//! use localllm::prelude::*;
//! ```
//!
//! # Example
//!
//! ```rust
//! use localllm::prelude::*;
//!
//! let mut catalog = CatalogStore::new();
//! catalog.initialize(0);
//!
//! let query = CatalogQuery {
//!     gpu_type: "4090".to_string(),
//!     ..CatalogQuery::default()
//! };
//! for offer in catalog.query(&query) {
//!     let monthly = estimate_cost(offer.price, RentalDuration::Monthly, 1, None);
//!     println!("{} {}: ${monthly}/month", offer.count, offer.model);
//! }
//! ```

// Error types
pub use crate::error::{Error, Result};

// Marketplace
pub use crate::catalog::{
    Availability, CatalogQuery, CatalogStore, JitterTicker, Offer, OfferSpecs, SortColumn,
    SortDirection,
};

// Rental checkout
pub use crate::rental::{estimate_cost, ContactRequest, Quote, QuoteRequest, RentalDuration, RentalRequest};

// Notifications
pub use crate::mail::{MailTransport, OutgoingMail, SmtpMailer};

// Chat demo
pub use crate::chat::{Attachment, ChatMessage, ChatSession, GenerativeClient, Role};

// Server
pub use crate::api::build_router;
pub use crate::app_state::{AppState, SharedState};
