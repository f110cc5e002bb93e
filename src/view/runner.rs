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

use std::io::{stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    event::{self, Event},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use tokio::sync::RwLock;

use crate::catalog::{CatalogQuery, CatalogStore, JitterTicker, SortDirection};
use crate::cli::MarketArgs;
use crate::common::config::AppConfig;
use crate::error::{Error, Result};
use crate::ui::{render_market, render_quote, render_specs_dialog};
use crate::view::event_handler::{handle_key_event, KEY_HELP};
use crate::view::terminal_manager::TerminalManager;

pub fn query_from_args(args: &MarketArgs) -> CatalogQuery {
    CatalogQuery {
        search: args.search.clone(),
        location: args.location.clone(),
        gpu_type: args.gpu_type.clone(),
        sort: args.sort,
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    }
}

/// Print the marketplace once, or keep it live with `--watch`.
pub async fn run_market_mode(args: &MarketArgs) -> Result<()> {
    let mut store = CatalogStore::new();
    store.initialize(args.synthetic);

    let mut out = stdout();

    if let Some(id) = &args.details {
        render_details(&mut out, &store, id, args)?;
        out.flush()?;
        return Ok(());
    }

    let mut query = query_from_args(args);

    if !args.watch {
        let view = store.query(&query);
        render_market(&mut out, &view, store.len(), &query, store.last_updated())?;
        out.flush()?;
        return Ok(());
    }

    let catalog = Arc::new(RwLock::new(store));
    let _ticker = JitterTicker::start(catalog.clone(), Duration::from_secs(args.interval));
    let _terminal = TerminalManager::new()?;

    watch_loop(&mut out, &catalog, &mut query).await
}

/// Specs dialog of one offer, followed by a cost quote when one was asked for.
pub fn render_details<W: Write>(
    out: &mut W,
    store: &CatalogStore,
    id: &str,
    args: &MarketArgs,
) -> Result<()> {
    let offer = store.get(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
    render_specs_dialog(out, offer)?;

    if let Some(request) = args.quote_request() {
        let quote = request.quote(offer)?;
        queue!(out, Print("\r\n"))?;
        render_quote(out, &quote)?;
    }
    Ok(())
}

async fn watch_loop<W: Write>(
    out: &mut W,
    catalog: &RwLock<CatalogStore>,
    query: &mut CatalogQuery,
) -> Result<()> {
    let mut needs_redraw = true;
    let mut last_drawn = None;

    loop {
        {
            let store = catalog.read().await;
            if needs_redraw || store.last_updated() != last_drawn {
                let view = store.query(query);
                queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
                render_market(out, &view, store.len(), query, store.last_updated())?;
                queue!(out, Print("\r\n"), Print(KEY_HELP), Print("\r\n"))?;
                out.flush()?;
                last_drawn = store.last_updated();
                needs_redraw = false;
            }
        }

        if event::poll(Duration::from_millis(AppConfig::EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if handle_key_event(key_event, query) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortColumn;
    use crate::rental::RentalDuration;

    #[test]
    fn test_query_from_args() {
        let args = MarketArgs {
            search: "epyc".to_string(),
            gpu_type: "4090".to_string(),
            sort: Some(SortColumn::Price),
            desc: true,
            ..MarketArgs::default()
        };
        let query = query_from_args(&args);
        assert_eq!(query.search, "epyc");
        assert_eq!(query.location, "all");
        assert_eq!(query.gpu_type, "4090");
        assert_eq!(query.sort, Some(SortColumn::Price));
        assert_eq!(query.direction, SortDirection::Descending);
    }

    fn details_args(id: &str) -> MarketArgs {
        MarketArgs {
            details: Some(id.to_string()),
            synthetic: 0,
            ..MarketArgs::default()
        }
    }

    #[test]
    fn test_render_details_with_quote() {
        let mut store = CatalogStore::new();
        store.initialize(0);
        let args = MarketArgs {
            duration: Some(RentalDuration::Monthly),
            ..details_args("h100-1")
        };

        let mut out = Vec::new();
        render_details(&mut out, &store, "h100-1", &args).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("ID: h100-1"));
        assert!(rendered.contains("monthly at $2.874/hr → $2098.02"));
    }

    #[test]
    fn test_render_details_without_quote_flags() {
        let mut store = CatalogStore::new();
        store.initialize(0);

        let mut out = Vec::new();
        render_details(&mut out, &store, "h100-1", &details_args("h100-1")).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("ID: h100-1"));
        assert!(!rendered.contains("→"));
    }

    #[tokio::test]
    async fn test_quote_for_occupied_offer() {
        let args = MarketArgs {
            quantity: Some(2),
            ..details_args("h100-8")
        };
        let err = run_market_mode(&args).await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(id) if id == "h100-8"));
    }

    #[tokio::test]
    async fn test_quote_for_available_offer() {
        let args = MarketArgs {
            duration: Some(RentalDuration::Daily),
            quantity: Some(2),
            bid: Some(1.0),
            ..details_args("h100-1")
        };
        run_market_mode(&args).await.unwrap();
    }

    #[tokio::test]
    async fn test_details_for_unknown_offer() {
        let args = MarketArgs {
            details: Some("missing".to_string()),
            synthetic: 0,
            ..MarketArgs::default()
        };
        let err = run_market_mode(&args).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == "missing"));
    }
}
