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

// UI-related constants

/// Column widths of the marketplace table
pub const MODEL_WIDTH: usize = 22;
pub const TFLOPS_WIDTH: usize = 8;
pub const VRAM_WIDTH: usize = 8;
pub const CPU_WIDTH: usize = 20;
pub const STORAGE_WIDTH: usize = 14;
pub const LOCATION_WIDTH: usize = 14;
pub const PRICE_WIDTH: usize = 10;
pub const ACTION_WIDTH: usize = 10;

/// Inner width of the specs dialog frame
pub const DIALOG_WIDTH: usize = 56;

/// Placeholder shown before the first price update
pub const NO_UPDATE_YET: &str = "--:--:--";
