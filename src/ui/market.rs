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

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use crossterm::{queue, style::Color, style::Print};

use crate::catalog::{CatalogQuery, Offer, SortColumn, SortDirection};
use crate::ui::constants::*;
use crate::ui::text::{cpu_summary, fit_to_width, format_price, print_colored_text, right_align};

/// One column of the marketplace table.
pub struct Column {
    pub label: &'static str,
    pub width: usize,
    /// Column the header sorts by, if sortable.
    pub sort: Option<SortColumn>,
    pub align_right: bool,
}

pub const COLUMNS: [Column; 8] = [
    Column { label: "GPU Model", width: MODEL_WIDTH, sort: Some(SortColumn::Model), align_right: false },
    Column { label: "TFLOPS", width: TFLOPS_WIDTH, sort: Some(SortColumn::Tflops), align_right: false },
    Column { label: "VRAM", width: VRAM_WIDTH, sort: Some(SortColumn::Vram), align_right: false },
    Column { label: "CPU", width: CPU_WIDTH, sort: None, align_right: false },
    Column { label: "Storage", width: STORAGE_WIDTH, sort: None, align_right: false },
    Column { label: "Location", width: LOCATION_WIDTH, sort: None, align_right: false },
    Column { label: "Price/hr", width: PRICE_WIDTH, sort: Some(SortColumn::Price), align_right: true },
    Column { label: "", width: ACTION_WIDTH, sort: None, align_right: true },
];

/// Text of each table cell for `offer`, in column order.
pub fn row_cells(offer: &Offer) -> [String; 8] {
    [
        format!("{}x {}", offer.count, offer.model),
        format!("{:.1}", offer.tflops),
        format!("{} GB", offer.vram),
        cpu_summary(&offer.cpu),
        offer.storage.clone(),
        offer.region().to_string(),
        format_price(offer.price),
        action_label(offer).to_string(),
    ]
}

pub fn action_label(offer: &Offer) -> &'static str {
    if offer.is_rentable() {
        "Rent"
    } else {
        "Occupied"
    }
}

/// Header label with an arrow on the active sort column.
pub fn header_label(column: &Column, query: &CatalogQuery) -> String {
    match (column.sort, query.sort) {
        (Some(own), Some(active)) if own == active => {
            let arrow = match query.direction {
                SortDirection::Ascending => '↑',
                SortDirection::Descending => '↓',
            };
            format!("{} {arrow}", column.label)
        }
        _ => column.label.to_string(),
    }
}

pub fn format_last_updated(last_updated: Option<DateTime<Utc>>) -> String {
    match last_updated {
        Some(ts) => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => NO_UPDATE_YET.to_string(),
    }
}

fn cell(text: &str, column: &Column) -> String {
    if column.align_right {
        right_align(text, column.width)
    } else {
        fit_to_width(text, column.width)
    }
}

fn filter_summary(query: &CatalogQuery) -> Option<String> {
    let mut parts = Vec::new();
    if !query.search.is_empty() {
        parts.push(format!("search \"{}\"", query.search));
    }
    if query.location != crate::catalog::constants::FILTER_ALL {
        parts.push(format!("location {}", query.location));
    }
    if query.gpu_type != crate::catalog::constants::FILTER_ALL {
        parts.push(format!("type {}", query.gpu_type));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Draw the marketplace table for an already filtered and sorted view.
pub fn render_market<W: Write>(
    out: &mut W,
    view: &[Offer],
    catalog_size: usize,
    query: &CatalogQuery,
    last_updated: Option<DateTime<Utc>>,
) -> io::Result<()> {
    print_colored_text(out, "● ", Color::Green, None, None)?;
    print_colored_text(out, "Live Market", Color::White, None, None)?;
    print_colored_text(
        out,
        &format!(
            "  updated {}  showing {} of {} offers",
            format_last_updated(last_updated),
            view.len(),
            catalog_size
        ),
        Color::DarkGrey,
        None,
        None,
    )?;
    queue!(out, Print("\r\n"))?;

    if let Some(summary) = filter_summary(query) {
        print_colored_text(out, &format!("Filters: {summary}"), Color::Yellow, None, None)?;
        queue!(out, Print("\r\n"))?;
    }

    for column in &COLUMNS {
        let label = header_label(column, query);
        print_colored_text(out, &cell(&label, column), Color::Cyan, None, None)?;
        queue!(out, Print(" "))?;
    }
    queue!(out, Print("\r\n"))?;

    let total_width: usize = COLUMNS.iter().map(|c| c.width + 1).sum();
    print_colored_text(out, &"─".repeat(total_width), Color::DarkGrey, None, None)?;
    queue!(out, Print("\r\n"))?;

    if view.is_empty() {
        print_colored_text(out, "No GPUs match the current filters.", Color::DarkGrey, None, None)?;
        queue!(out, Print("\r\n"))?;
        return Ok(());
    }

    for offer in view {
        let cells = row_cells(offer);
        for (index, (text, column)) in cells.iter().zip(COLUMNS.iter()).enumerate() {
            let color = match index {
                0 => Color::White,
                6 => Color::Green,
                7 if offer.is_rentable() => Color::Green,
                7 => Color::Red,
                _ => Color::Grey,
            };
            print_colored_text(out, &cell(text, column), color, None, None)?;
            queue!(out, Print(" "))?;
        }
        queue!(out, Print("\r\n"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::templates::base_offers;

    fn offer(id: &str) -> Offer {
        base_offers().into_iter().find(|o| o.id == id).unwrap()
    }

    #[test]
    fn test_row_cells_format() {
        let cells = row_cells(&offer("h100-8"));
        assert!(cells[0].starts_with("8x H100"));
        assert!(cells[2].ends_with(" GB"));
        assert!(cells[3].ends_with("..."));
        assert!(cells[6].starts_with('$'));
        assert_eq!(cells[7], "Occupied");
        assert!(!cells[5].contains(" ("));
    }

    #[test]
    fn test_header_arrow_on_active_column() {
        let mut query = CatalogQuery::default();
        assert_eq!(header_label(&COLUMNS[6], &query), "Price/hr");
        query.toggle_sort(SortColumn::Price);
        assert_eq!(header_label(&COLUMNS[6], &query), "Price/hr ↑");
        query.toggle_sort(SortColumn::Price);
        assert_eq!(header_label(&COLUMNS[6], &query), "Price/hr ↓");
        assert_eq!(header_label(&COLUMNS[0], &query), "GPU Model");
    }

    #[test]
    fn test_render_market_lists_offers() {
        let offers = base_offers();
        let query = CatalogQuery {
            gpu_type: "H100".to_string(),
            ..CatalogQuery::default()
        };
        let view = query.apply(&offers);
        let mut out = Vec::new();
        render_market(&mut out, &view, offers.len(), &query, None).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Live Market"));
        assert!(rendered.contains(NO_UPDATE_YET));
        assert!(rendered.contains("showing 2 of 16 offers"));
        assert!(rendered.contains("Filters: type H100"));
        assert!(rendered.contains("Occupied"));
    }

    #[test]
    fn test_render_market_empty_view() {
        let query = CatalogQuery {
            search: "nothing-matches".to_string(),
            ..CatalogQuery::default()
        };
        let mut out = Vec::new();
        render_market(&mut out, &[], 16, &query, None).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("No GPUs match the current filters."));
    }
}
