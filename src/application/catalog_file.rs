// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 目录文件错误类型
#[derive(Error, Debug)]
pub enum CatalogFileError {
    #[error("Catalog file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Catalog file CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// The user's catalog: a headerless CSV file whose rows start with the item
/// id and title. Rows may differ in width.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All rows; a missing file reads as empty.
    pub fn read_rows(&self) -> Result<Vec<Vec<String>>, CatalogFileError> {
        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
        {
            Ok(reader) => reader,
            Err(e) if is_not_found(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Replaces the file contents. Written to a sibling file first and
    /// renamed over the original.
    pub fn write_rows(&self, rows: &[Vec<String>]) -> Result<(), CatalogFileError> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&tmp)?;
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Appends `new_rows` after the existing rows.
    pub fn append_rows(&self, new_rows: &[Vec<String>]) -> Result<(), CatalogFileError> {
        let mut rows = self.read_rows()?;
        rows.extend_from_slice(new_rows);
        self.write_rows(&rows)
    }

    /// Drops every row whose first column equals `item_id` numerically.
    /// Returns how many rows were removed.
    pub fn remove_item(&self, item_id: &str) -> Result<usize, CatalogFileError> {
        let rows = self.read_rows()?;
        let before = rows.len();
        let kept: Vec<_> = rows
            .into_iter()
            .filter(|row| !row.first().is_some_and(|cell| same_number(cell, item_id)))
            .collect();
        let removed = before - kept.len();
        self.write_rows(&kept)?;
        Ok(removed)
    }

    /// `(id, title)` of every row.
    pub fn list(&self) -> Result<Vec<(String, String)>, CatalogFileError> {
        Ok(self
            .read_rows()?
            .into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                let id = cells.next().unwrap_or_default();
                let title = cells.next().unwrap_or_default();
                (id, title)
            })
            .collect())
    }
}

fn is_not_found(error: &csv::Error) -> bool {
    matches!(error.kind(), csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound)
}

fn same_number(a: &str, b: &str) -> bool {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
