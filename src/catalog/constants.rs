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

//! Constants used throughout the catalog

// Session configuration
pub const DEFAULT_SYNTHETIC_COUNT: usize = 15;
pub const JITTER_INTERVAL_SECS: u64 = 5;
pub const MAX_TEMPLATE_POOL: usize = 10;

// Randomisation bounds
pub const GENERATED_PRICE_FACTOR_MIN: f64 = 0.9;
pub const GENERATED_PRICE_FACTOR_MAX: f64 = 1.1;
pub const JITTER_FACTOR_MIN: f64 = 0.98;
pub const JITTER_FACTOR_MAX: f64 = 1.02;
pub const RELIABILITY_MIN: f64 = 98.0;
pub const RELIABILITY_MAX: f64 = 99.9;
pub const OCCUPIED_PROBABILITY: f64 = 0.2;

// Smallest price representable at three decimals
pub const MIN_PRICE: f64 = 0.001;

pub const GENERATED_ID_PREFIX: &str = "gen-";
pub const GENERATED_ID_SUFFIX_LEN: usize = 9;

// Filter sentinel
pub const FILTER_ALL: &str = "all";

pub const LOCATIONS: [&str; 10] = [
    "US-East (N. Virginia)",
    "US-West (Oregon)",
    "US-Central (Iowa)",
    "EU-West (Ireland)",
    "EU-Central (Frankfurt)",
    "EU-North (Stockholm)",
    "Asia-Pacific (Tokyo)",
    "Asia-Pacific (Singapore)",
    "Asia-Pacific (Sydney)",
    "South America (São Paulo)",
];

pub const CPUS: [&str; 8] = [
    "AMD EPYC 9654 96-Core",
    "AMD EPYC 7763 64-Core",
    "AMD EPYC 7543 32-Core",
    "Intel Xeon Platinum 8480+",
    "Intel Xeon Gold 6348",
    "Intel Xeon w9-3495X",
    "AMD Ryzen Threadripper PRO 5995WX",
    "AMD Ryzen 9 7950X",
];
