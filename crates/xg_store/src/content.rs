//! The two content shapes a resource manager deals in (spec §4.8):
//! tabular content (rows, for CSV-like artifacts) and raw byte content
//! (for anything else).

use crate::errors::{StoreError, StoreResult};
use crate::key::ArtifactKey;

pub type Row = Vec<String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Bytes(Vec<u8>),
    Tabular(Vec<Row>),
}

impl Content {
    pub fn rows(&self, key: &ArtifactKey) -> StoreResult<&[Row]> {
        match self {
            Content::Tabular(rows) => Ok(rows),
            Content::Bytes(_) => Err(StoreError::NotTabular(key.to_string())),
        }
    }

    /// A flat byte view of this content: raw bytes as-is, or tabular rows
    /// rendered as comma-joined, newline-separated text (cells containing a
    /// comma or quote are quoted per the usual CSV convention). Used by
    /// `head_raw`/`tail_raw`, which operate on backends and content types
    /// uniformly. Row-splitting on `\n` means a cell containing an embedded
    /// newline does not round-trip through [`crate::local::LocalStore`];
    /// experiment artifacts are not expected to carry one.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Content::Bytes(bytes) => bytes.clone(),
            Content::Tabular(rows) => {
                let mut out = String::new();
                for row in rows {
                    for (i, cell) in row.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        out.push_str(&escape_cell(cell));
                    }
                    out.push('\n');
                }
                out.into_bytes()
            }
        }
    }
}

/// Parse plain CSV-style text (the shape [`Content::as_bytes`] renders
/// tabular content as) back into rows. Shared by [`crate::local::LocalStore`]
/// and by callers (e.g. `xg_orch`) that read a CSV artifact an external
/// program produced directly, before it has ever been written through this
/// store.
pub fn parse_csv(bytes: &[u8]) -> Vec<Row> {
    String::from_utf8_lossy(bytes).lines().map(parse_csv_line).collect()
}

fn parse_csv_line(line: &str) -> Row {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }
    cells.push(current);
    cells
}

fn escape_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// One unit of streamed content (spec §4.8's `iterate_over`): a row for
/// tabular artifacts, or a fixed-size chunk for byte artifacts.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Row(Row),
    Chunk(Vec<u8>),
}
