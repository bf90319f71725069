// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atomic table file I/O.
//!
//! Writes go to a temporary sibling file followed by an atomic rename, so a
//! reader never observes a partially written table and a crash mid-write
//! leaves the previous version intact. A missing table file on first read is
//! initialized with the canonical header row, not treated as an error.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use casareach_core::CasareachError;

use crate::schema::{self, Table};

/// Parse delimited text into a header row and data rows.
///
/// Quoted fields may contain the delimiter and embedded newlines
/// (RFC 4180 semantics). Rows with a column count differing from the
/// header are a parse error.
pub fn parse(text: &str) -> Result<(Vec<String>, Vec<Vec<String>>), CasareachError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut headers = Vec::new();
    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(CasareachError::storage)?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if i == 0 {
            headers = fields;
        } else {
            rows.push(fields);
        }
    }
    Ok((headers, rows))
}

/// Inverse of [`parse`]: header order is authoritative.
pub fn serialize(headers: &[&str], rows: &[Vec<String>]) -> Result<String, CasareachError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers).map_err(CasareachError::storage)?;
    for row in rows {
        writer.write_record(row).map_err(CasareachError::storage)?;
    }
    let bytes = writer.into_inner().map_err(|e| CasareachError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CasareachError::Internal(e.to_string()))
}

/// Write `content` to `path` via a temporary sibling and atomic rename.
pub async fn atomic_write(path: &Path, content: String) -> Result<(), CasareachError> {
    let path: PathBuf = path.to_owned();
    tokio::task::spawn_blocking(move || {
        let dir = path
            .parent()
            .ok_or_else(|| CasareachError::Internal(format!("{} has no parent", path.display())))?;
        std::fs::create_dir_all(dir).map_err(CasareachError::storage)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(CasareachError::storage)?;
        tmp.write_all(content.as_bytes())
            .map_err(CasareachError::storage)?;
        tmp.as_file().sync_all().map_err(CasareachError::storage)?;
        tmp.persist(&path)
            .map_err(|e| CasareachError::storage(e.error))?;
        Ok(())
    })
    .await
    .map_err(|e| CasareachError::Internal(format!("atomic write task failed: {e}")))?
}

/// Read all data rows of `table` from `dir`, validating the header row.
///
/// A missing file is initialized with the canonical header and yields zero
/// rows.
pub async fn read_rows(dir: &Path, table: Table) -> Result<Vec<Vec<String>>, CasareachError> {
    let path = dir.join(table.file_name());
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(table = table.name(), path = %path.display(), "initializing missing table file");
            write_rows(dir, table, &[]).await?;
            return Ok(Vec::new());
        }
        Err(e) => return Err(CasareachError::storage(e)),
    };

    let (headers, rows) = parse(&text)?;
    schema::validate_headers(table, &headers).map_err(|e| e.into_fatal(table))?;
    Ok(rows)
}

/// Atomically replace `table` in `dir` with the canonical header and `rows`.
pub async fn write_rows(dir: &Path, table: Table, rows: &[Vec<String>]) -> Result<(), CasareachError> {
    let content = serialize(table.headers(), rows)?;
    atomic_write(&dir.join(table.file_name()), content).await
}
