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

use clap::Parser;
use tokio::signal;

use localllm::api::run_api_mode;
use localllm::cli::{Cli, Commands, MarketArgs};
use localllm::view;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The market watch view reads Ctrl+C as a key event in raw mode
    tokio::spawn(async {
        if signal::ctrl_c().await.is_ok() {
            std::process::exit(0);
        }
    });

    let result = match cli.command {
        Some(Commands::Serve(args)) => {
            run_api_mode(&args).await;
            Ok(())
        }
        Some(Commands::Market(args)) => view::run_market_mode(&args).await,
        Some(Commands::Chat) => view::run_chat_mode().await,
        None => view::run_market_mode(&MarketArgs::default()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
