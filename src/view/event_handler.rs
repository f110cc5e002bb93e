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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::{CatalogQuery, SortColumn};

/// Sort column bound to a key in watch mode.
pub fn sort_column_for_key(code: KeyCode) -> Option<SortColumn> {
    match code {
        KeyCode::Char('m') => Some(SortColumn::Model),
        KeyCode::Char('t') => Some(SortColumn::Tflops),
        KeyCode::Char('v') => Some(SortColumn::Vram),
        KeyCode::Char('l') => Some(SortColumn::Location),
        KeyCode::Char('p') => Some(SortColumn::Price),
        KeyCode::Char('r') => Some(SortColumn::Reliability),
        KeyCode::Char('s') => Some(SortColumn::Status),
        _ => None,
    }
}

/// Apply a key press to the query. Returns true when the view should exit.
pub fn handle_key_event(key_event: KeyEvent, query: &mut CatalogQuery) -> bool {
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        // Raw mode swallows SIGINT
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('d') => {
            query.sort = None;
            query.direction = Default::default();
            false
        }
        code => {
            if let Some(column) = sort_column_for_key(code) {
                query.toggle_sort(column);
            }
            false
        }
    }
}

pub const KEY_HELP: &str =
    "m/t/v/l/p/r/s sort (again to reverse)  d default order  q quit";
