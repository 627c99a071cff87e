//! Node CSV ingestion.
//!
//! Expects a header row followed by `(id, x, y)` records. Malformed rows
//! are skipped with a warning; rows carrying a negative id or unparsable
//! coordinates are logged and excluded. Only failing to open or read the
//! file itself is an error.

use std::path::Path;

use tracing::{error, warn};

use crate::error::Error;
use crate::models::Node;

/// Expected fields per record: id, x, y.
const EXPECTED_NUM_FIELDS: usize = 3;

/// Reads nodes from a CSV file.
///
/// # Examples
///
/// ```no_run
/// use seqroute::io::read_nodes;
/// use std::path::Path;
///
/// let nodes = read_nodes(Path::new("data/nodes.csv")).expect("readable csv");
/// assert!(nodes.iter().all(|n| n.x().is_finite()));
/// ```
pub fn read_nodes(path: &Path) -> Result<Vec<Node>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut nodes = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping unreadable row");
                continue;
            }
        };
        if record.len() != EXPECTED_NUM_FIELDS {
            warn!(fields = record.len(), "skipping row with wrong field count");
            continue;
        }

        let Ok(id) = record[0].parse::<i64>() else {
            error!(raw = &record[0], "excluding row with non-integer id");
            continue;
        };
        if id < 0 {
            error!(id, "excluding row with negative id");
            continue;
        }
        let (Ok(x), Ok(y)) = (record[1].parse::<f64>(), record[2].parse::<f64>()) else {
            error!(id, "excluding row with non-numeric coordinates");
            continue;
        };

        nodes.push(Node::new(id as usize, x, y));
    }
    Ok(nodes)
}
