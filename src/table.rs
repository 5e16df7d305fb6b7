// src/table.rs
//
// Flat header + rows tables, the on-disk shape of both the meanings and the
// learning-record files. Parsing and quoting are left to the `csv` crate;
// this module only shapes rows and finds columns.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::StoreError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Case-sensitive header lookup.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like `column`, but a missing header is an error naming the file.
    pub fn require(&self, name: &str, path: &Path) -> Result<usize, StoreError> {
        self.column(name).ok_or_else(|| StoreError::MissingColumn {
            path: path.display().to_string(),
            column: s!(name),
        })
    }

    /// Cell accessor that treats short rows as empty trailing cells.
    pub fn cell<'a>(row: &'a [String], ix: usize) -> &'a str {
        row.get(ix).map(String::as_str).unwrap_or("")
    }
}

/* ---------------- Parsing ---------------- */

/// First record is the header. Ragged rows are accepted as-is.
pub fn parse_table<R: Read>(reader: R) -> Result<Table, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.records();
    let headers = match records.next() {
        Some(rec) => rec?.iter().map(|c| c.trim().to_string()).collect(),
        None => return Ok(Table::default()),
    };

    let mut rows = Vec::new();
    for rec in records {
        let rec = rec?;
        // skip blank lines
        if rec.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(rec.iter().map(str::to_string).collect());
    }
    Ok(Table { headers, rows })
}

/// Read a table from disk. A missing file is `Ok(None)`.
pub fn read_table(path: &Path) -> Result<Option<Table>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let file = std::fs::File::open(path)?;
    let table = parse_table(std::io::BufReader::new(file))?;
    logd!("Read {} rows from {}", table.rows.len(), path.display());
    Ok(Some(table))
}

/* ---------------- Writing ---------------- */

/// Write header + rows to any writer.
pub fn write_table<W: Write>(writer: W, table: &Table) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render to a string (for `--table` dumps and tests).
pub fn to_string(table: &Table) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_table(&mut buf, table);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// Whole-file overwrite of `path` with `table`.
pub fn save_table(path: &Path, table: &Table) -> Result<(), StoreError> {
    crate::file::write_whole(path, |w| write_table(w, table))?;
    logd!("Wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}
