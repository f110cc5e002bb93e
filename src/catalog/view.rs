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

//! Filtered and sorted views over a catalog snapshot.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::catalog::constants::FILTER_ALL;
use crate::catalog::types::Offer;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Id,
    Model,
    Count,
    Vram,
    Tflops,
    Cpu,
    Storage,
    Location,
    Price,
    Reliability,
    MaxDuration,
    Status,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Value of a column used for comparison.
enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
}

impl SortColumn {
    pub const ALL: [SortColumn; 12] = [
        SortColumn::Id,
        SortColumn::Model,
        SortColumn::Count,
        SortColumn::Vram,
        SortColumn::Tflops,
        SortColumn::Cpu,
        SortColumn::Storage,
        SortColumn::Location,
        SortColumn::Price,
        SortColumn::Reliability,
        SortColumn::MaxDuration,
        SortColumn::Status,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Model => "model",
            SortColumn::Count => "count",
            SortColumn::Vram => "vram",
            SortColumn::Tflops => "tflops",
            SortColumn::Cpu => "cpu",
            SortColumn::Storage => "storage",
            SortColumn::Location => "location",
            SortColumn::Price => "price",
            SortColumn::Reliability => "reliability",
            SortColumn::MaxDuration => "maxDuration",
            SortColumn::Status => "status",
        }
    }

    fn key<'a>(&self, offer: &'a Offer) -> SortKey<'a> {
        match self {
            SortColumn::Id => SortKey::Text(&offer.id),
            SortColumn::Model => SortKey::Text(&offer.model),
            SortColumn::Count => SortKey::Number(offer.count as f64),
            SortColumn::Vram => SortKey::Number(offer.vram as f64),
            SortColumn::Tflops => SortKey::Number(offer.tflops),
            SortColumn::Cpu => SortKey::Text(&offer.cpu),
            SortColumn::Storage => SortKey::Text(&offer.storage),
            SortColumn::Location => SortKey::Text(&offer.location),
            SortColumn::Price => SortKey::Number(offer.price),
            SortColumn::Reliability => SortKey::Number(offer.reliability),
            SortColumn::MaxDuration => SortKey::Text(&offer.max_duration),
            SortColumn::Status => SortKey::Text(offer.status.as_str()),
        }
    }

    /// Ascending comparison of two offers on this column.
    pub fn compare(&self, a: &Offer, b: &Offer) -> Ordering {
        match (self.key(a), self.key(b)) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort column: {s}"))
    }
}

/// The four inputs of the marketplace view.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogQuery {
    pub search: String,
    pub location: String,
    pub gpu_type: String,
    pub sort: Option<SortColumn>,
    pub direction: SortDirection,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: FILTER_ALL.to_string(),
            gpu_type: FILTER_ALL.to_string(),
            sort: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl CatalogQuery {
    /// Header-click behaviour: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.sort = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        self.matches_search(offer)
            && (self.location == FILTER_ALL || offer.location.contains(&self.location))
            && (self.gpu_type == FILTER_ALL || offer.model.contains(&self.gpu_type))
    }

    fn matches_search(&self, offer: &Offer) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        offer.model.to_lowercase().contains(&needle)
            || offer.cpu.to_lowercase().contains(&needle)
            || offer.location.to_lowercase().contains(&needle)
    }

    /// Derive the displayed sequence from a snapshot of the catalog.
    pub fn apply(&self, offers: &[Offer]) -> Vec<Offer> {
        let mut result: Vec<Offer> = offers
            .iter()
            .filter(|offer| self.matches(offer))
            .cloned()
            .collect();

        if let Some(column) = self.sort {
            // sort_by is stable, so ties keep filter order
            result.sort_by(|a, b| match self.direction {
                SortDirection::Ascending => column.compare(a, b),
                SortDirection::Descending => column.compare(b, a),
            });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::templates::base_offers;

    #[test]
    fn test_default_query_passes_everything_in_order() {
        let offers = base_offers();
        let view = CatalogQuery::default().apply(&offers);
        assert_eq!(view, offers);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let offers = base_offers();

        let query = CatalogQuery {
            search: "frankfurt".to_string(),
            ..Default::default()
        };
        let ids: Vec<String> = query.apply(&offers).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["h100-1"]);

        let query = CatalogQuery {
            search: "EPYC 9654".to_string(),
            ..Default::default()
        };
        let view = query.apply(&offers);
        assert!(!view.is_empty());
        assert!(view.iter().all(|o| o.cpu.contains("EPYC 9654")));
    }

    #[test]
    fn test_location_filter_is_substring() {
        let query = CatalogQuery {
            location: "EU".to_string(),
            ..Default::default()
        };
        let view = query.apply(&base_offers());
        assert_eq!(view.len(), 4);
        assert!(view.iter().all(|o| o.location.contains("EU")));
    }

    #[test]
    fn test_type_filter() {
        let query = CatalogQuery {
            gpu_type: "H100".to_string(),
            ..Default::default()
        };
        let view = query.apply(&base_offers());
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|o| o.model.contains("H100")));
    }

    #[test]
    fn test_sort_price_both_directions() {
        let offers = base_offers();
        let mut query = CatalogQuery::default();

        query.toggle_sort(SortColumn::Price);
        let asc = query.apply(&offers);
        assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));

        query.toggle_sort(SortColumn::Price);
        assert_eq!(query.direction, SortDirection::Descending);
        let desc = query.apply(&offers);
        assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_sort_text_column_is_stable() {
        let offers = base_offers();
        let query = CatalogQuery {
            sort: Some(SortColumn::Model),
            ..Default::default()
        };
        let view = query.apply(&offers);
        assert!(view.windows(2).all(|w| w[0].model <= w[1].model));

        // The three RTX 5090 listings keep their catalog order
        let rtx_5090: Vec<&str> = view
            .iter()
            .filter(|o| o.model == "RTX 5090")
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(rtx_5090, vec!["5090-1", "5090-2", "5090-4"]);
    }

    #[test]
    fn test_toggle_to_new_column_resets_direction() {
        let mut query = CatalogQuery {
            sort: Some(SortColumn::Price),
            direction: SortDirection::Descending,
            ..Default::default()
        };
        query.toggle_sort(SortColumn::Vram);
        assert_eq!(query.sort, Some(SortColumn::Vram));
        assert_eq!(query.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_column_from_str() {
        assert_eq!(
            "maxDuration".parse::<SortColumn>(),
            Ok(SortColumn::MaxDuration)
        );
        assert_eq!("PRICE".parse::<SortColumn>(), Ok(SortColumn::Price));
        assert!("bogus".parse::<SortColumn>().is_err());
    }
}
