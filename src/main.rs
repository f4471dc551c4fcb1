// Copyright 2025 Kirky.X
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

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use workshop_ledger::application::catalog_file::CatalogFile;
use workshop_ledger::application::use_cases::catalog_use_case::CatalogUseCase;
use workshop_ledger::config::settings::Settings;
use workshop_ledger::domain::services::aggregator::Aggregator;
use workshop_ledger::engines;
use workshop_ledger::infrastructure::steam_api::SteamApiClient;
use workshop_ledger::utils::telemetry;

/// Keeps a CSV catalog of Steam Workshop items up to date.
#[derive(Debug, Parser)]
#[command(name = "workshop-ledger", version, about)]
struct Cli {
    /// Steam API key
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Path to CSV file
    #[arg(short, long, global = true)]
    file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add the specified item to the file
    Add {
        /// Item ID to add
        item: String,
    },
    /// Add all items belonging to the specified user to the file
    Addall {
        /// User URL
        user: String,
    },
    /// Remove the specified item from the file
    Remove {
        /// Item ID to remove
        item: String,
    },
    /// List all items in the file
    List,
}

/// 主函数
///
/// 加载配置、构建聚合器并执行子命令
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    let cli = Cli::parse();

    let settings = Settings::new().context("failed to load configuration")?;
    let file = cli
        .file
        .as_deref()
        .or(settings.catalog_file())
        .ok_or_else(|| anyhow!("no catalog file configured; pass --file or set catalog.file"))?;
    let use_case = CatalogUseCase::new(CatalogFile::new(file));

    match cli.command {
        Command::Add { item } => {
            let aggregator = build_aggregator(&settings, cli.key.as_deref())?;
            use_case.add(&aggregator, &item).await?;
            info!(item = %item, "Item added");
        }
        Command::Addall { user } => {
            let aggregator = build_aggregator(&settings, cli.key.as_deref())?;
            let added = use_case.add_all(&aggregator, &user).await?;
            info!(added, "Catalog updated");
        }
        Command::Remove { item } => {
            let removed = use_case.remove(&item)?;
            info!(item = %item, removed, "Item removed");
        }
        Command::List => {
            for line in use_case.list()? {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn build_aggregator(settings: &Settings, key: Option<&str>) -> anyhow::Result<Aggregator> {
    let key = key
        .or(settings.api_key())
        .ok_or_else(|| anyhow!("no API key configured; pass --key or set api.key"))?;

    let api = SteamApiClient::new(&settings.api, key, settings.catalog.page_size)?;
    let renderer = engines::build_renderer(&settings.browser)?;

    Ok(Aggregator::new(Arc::new(api), renderer, settings.community.base_url.clone())
        .with_pagination(settings.catalog.paginate))
}
