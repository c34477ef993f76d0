//! Reading an archived tabular artifact back into a [`FunctionsDict`] (spec
//! §2's data-flow: "C9 → C7"), closing the loop with
//! `xg_curves::changers::SaveOnCsv`'s own `x,<fn1>,<fn2>,...` CSV shape —
//! the first row is a header naming the abscissa column and every function,
//! every later row is one abscissa value plus one cell per function (blank
//! cells are undefined).

use xg_curves::dict::FunctionsDict;
use xg_store::content::Row;
use xg_store::key::ArtifactKey;
use xg_store::manager::ResourceManager;

use crate::errors::{OrchestratorError, OrchestratorResult};

fn rows_to_dict(rows: &[Row]) -> FunctionsDict {
    let mut dict = FunctionsDict::new();
    let Some((header, rows)) = rows.split_first() else {
        return dict;
    };
    let names = &header[1..];
    for row in rows {
        let Some((x_cell, cells)) = row.split_first() else { continue };
        let Ok(x) = x_cell.parse::<f64>() else { continue };
        for (name, cell) in names.iter().zip(cells) {
            if cell.is_empty() {
                continue;
            }
            if let Ok(y) = cell.parse::<f64>() {
                dict.update(name, x, y);
            }
        }
    }
    dict
}

/// Parse a previously-archived tabular artifact into a [`FunctionsDict`].
/// `key` must name `Content::Tabular` content in the header+rows shape
/// described above; anything else is a [`xg_store::errors::StoreError::NotTabular`].
pub fn load_functions_dict(store: &dyn ResourceManager, key: &ArtifactKey) -> OrchestratorResult<FunctionsDict> {
    let content = store.get(key)?;
    let rows = content.rows(key).map_err(OrchestratorError::Store)?;
    Ok(rows_to_dict(rows))
}

/// Like [`load_functions_dict`], but for a CSV blob never written through a
/// [`ResourceManager`] — e.g. the external program's output file, inspected
/// before the orchestrator decides whether to archive it.
pub fn parse_functions_dict_csv(bytes: &[u8]) -> FunctionsDict {
    rows_to_dict(&xg_store::content::parse_csv(bytes))
}
