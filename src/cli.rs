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

use clap::{Parser, Subcommand};

use crate::catalog::constants::{DEFAULT_SYNTHETIC_COUNT, FILTER_ALL, JITTER_INTERVAL_SECS};
use crate::catalog::SortColumn;
use crate::common::config::AppConfig;
use crate::rental::{QuoteRequest, RentalDuration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the marketplace API, form relays, and chat proxy.
    Serve(ServeArgs),
    /// Print the GPU marketplace table. (default)
    Market(MarketArgs),
    /// Chat with the hosted model from the terminal.
    Chat,
}

#[derive(Parser, Clone)]
pub struct ServeArgs {
    /// The port to listen on.
    #[arg(short, long, default_value_t = AppConfig::DEFAULT_PORT)]
    pub port: u16,
    /// Seconds between market price updates.
    #[arg(short, long, default_value_t = JITTER_INTERVAL_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
    /// Number of synthetic offers generated at startup.
    #[arg(long, default_value_t = DEFAULT_SYNTHETIC_COUNT)]
    pub synthetic: usize,
}

#[derive(Parser, Clone)]
pub struct MarketArgs {
    /// Keep redrawing the table as prices move.
    #[arg(short, long)]
    pub watch: bool,
    /// Seconds between price updates in watch mode.
    #[arg(short, long, default_value_t = JITTER_INTERVAL_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
    /// Case-insensitive text matched against model, CPU, and location.
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Only offers whose location contains this text.
    #[arg(short, long, default_value = FILTER_ALL)]
    pub location: String,
    /// Only offers whose model contains this text.
    #[arg(short = 't', long = "type", default_value = FILTER_ALL)]
    pub gpu_type: String,
    /// Column to sort by.
    #[arg(long)]
    pub sort: Option<SortColumn>,
    /// Sort in descending order.
    #[arg(long)]
    pub desc: bool,
    /// Number of synthetic offers generated at startup.
    #[arg(long, default_value_t = DEFAULT_SYNTHETIC_COUNT)]
    pub synthetic: usize,
    /// Show the full specs of one offer instead of the table.
    #[arg(long)]
    pub details: Option<String>,
    /// Billing period for a cost quote of the `--details` offer.
    #[arg(long, requires = "details")]
    pub duration: Option<RentalDuration>,
    /// Number of instances to quote.
    #[arg(long, requires = "details", value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: Option<u32>,
    /// Hourly bid replacing the listed price in the quote.
    #[arg(long, requires = "details")]
    pub bid: Option<f64>,
}

impl MarketArgs {
    /// Quote inputs, when any were given on the command line.
    pub fn quote_request(&self) -> Option<QuoteRequest> {
        if self.duration.is_none() && self.quantity.is_none() && self.bid.is_none() {
            return None;
        }
        Some(QuoteRequest {
            duration: self.duration.unwrap_or_default(),
            quantity: self.quantity.unwrap_or(1),
            bid_price: self.bid,
        })
    }
}

impl Default for MarketArgs {
    fn default() -> Self {
        Self {
            watch: false,
            interval: JITTER_INTERVAL_SECS,
            search: String::new(),
            location: FILTER_ALL.to_string(),
            gpu_type: FILTER_ALL.to_string(),
            sort: None,
            desc: false,
            synthetic: DEFAULT_SYNTHETIC_COUNT,
            details: None,
            duration: None,
            quantity: None,
            bid: None,
        }
    }
}
