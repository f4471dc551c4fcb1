// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::catalog_file::{CatalogFile, CatalogFileError};
use crate::application::row_builder::build_row;
use crate::domain::errors::WorkshopError;
use crate::domain::models::AccountRef;
use crate::domain::services::aggregator::Aggregator;
use futures::StreamExt;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CatalogUseCaseError {
    #[error("Aggregation failed: {0}")]
    Workshop(#[from] WorkshopError),
    #[error("Catalog file error: {0}")]
    File(#[from] CatalogFileError),
    /// 流中途失败，之前聚合的行已写入
    #[error("Aggregation failed after {written} rows were written: {source}")]
    Partial {
        written: usize,
        #[source]
        source: WorkshopError,
    },
}

/// Catalog operations behind the CLI subcommands.
pub struct CatalogUseCase {
    file: CatalogFile,
}

impl CatalogUseCase {
    pub fn new(file: CatalogFile) -> Self {
        Self { file }
    }

    /// Aggregates one item and appends its row.
    pub async fn add(
        &self,
        aggregator: &Aggregator,
        item_id: &str,
    ) -> Result<(), CatalogUseCaseError> {
        let record = aggregator.get_item(item_id).await?;
        info!(item_id, title = %record.title, "Adding item to catalog");
        self.file.append_rows(&[build_row(&record)])?;
        Ok(())
    }

    /// Aggregates every item of `user` and appends the rows in catalog
    /// order. Rows aggregated before a failure are still written.
    pub async fn add_all(
        &self,
        aggregator: &Aggregator,
        user: &str,
    ) -> Result<usize, CatalogUseCaseError> {
        let mut items = aggregator.get_items(AccountRef::parse(user));
        let mut rows = Vec::new();

        while let Some(record) = items.next().await {
            match record {
                Ok(record) => {
                    info!(
                        item_id = %record.publishedfileid,
                        title = %record.title,
                        "Adding item to catalog"
                    );
                    rows.push(build_row(&record));
                }
                Err(source) => {
                    drop(items);
                    self.file.append_rows(&rows)?;
                    return Err(CatalogUseCaseError::Partial {
                        written: rows.len(),
                        source,
                    });
                }
            }
        }

        self.file.append_rows(&rows)?;
        Ok(rows.len())
    }

    /// Removes every row of `item_id`; returns the number removed.
    pub fn remove(&self, item_id: &str) -> Result<usize, CatalogUseCaseError> {
        Ok(self.file.remove_item(item_id)?)
    }

    /// `"{id}: {title}"` lines, one per row.
    pub fn list(&self) -> Result<Vec<String>, CatalogUseCaseError> {
        Ok(self
            .file
            .list()?
            .into_iter()
            .map(|(id, title)| format!("{}: {}", id, title))
            .collect())
    }
}
