//! Tab-separated adjacency list
//!
//! One directed edge per line: `source\ttarget\tweight`. A line holding a
//! single field declares a vertex with no edges, so seeded (isolated)
//! vertices survive a round trip. Blank lines and `#` comments are ignored
//! when reading.

use super::{PersistenceError, PersistenceResult};
use crate::graph::{Address, Graph, GraphStore, Vertex, Weight};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

const DELIMITER: char = '\t';

/// Write a graph as an adjacency list.
///
/// Sources are sorted ascending; each source's targets by weight
/// descending, then target ascending. Isolated vertices follow the edges.
pub fn write_adjacency<V: Vertex, W: Write>(graph: &Graph<V>, writer: W) -> PersistenceResult<()> {
    let mut out = BufWriter::new(writer);

    let mut sources: Vec<&V> = graph.vertices().collect();
    sources.sort();

    let mut lines = 0usize;
    for source in sources {
        let mut targets = graph.neighbors(source)?;
        if targets.is_empty() {
            continue;
        }
        targets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let source_field = field(source)?;
        for (target, weight) in targets {
            writeln!(out, "{}{}{}{}{}", source_field, DELIMITER, field(target)?, DELIMITER, weight)?;
            lines += 1;
        }
    }

    for vertex in graph.isolated_vertices() {
        writeln!(out, "{}", field(&vertex)?)?;
        lines += 1;
    }

    out.flush()?;
    debug!("Wrote {} adjacency lines", lines);
    Ok(())
}

fn field<V: Vertex>(vertex: &V) -> PersistenceResult<String> {
    let text = vertex.to_string();
    if text.is_empty()
        || text.trim() != text
        || text.contains(DELIMITER)
        || text.contains('\n')
        || text.contains('\r')
    {
        return Err(PersistenceError::InvalidToken(text));
    }
    Ok(text)
}

/// Read an adjacency list into a fresh store.
///
/// Repeated lines for the same pair accumulate their weights.
pub fn read_adjacency<R: BufRead>(reader: R) -> PersistenceResult<GraphStore<Address>> {
    let mut store = GraphStore::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;
        let trimmed = line.trim_end_matches('\r');
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(DELIMITER).collect();
        match fields.as_slice() {
            [vertex] => {
                store.add_vertex(Address::new(vertex.trim()));
            }
            [source, target, weight] => {
                let weight = parse_weight(weight.trim(), line_no)?;
                store.add_weighted_edge(
                    Address::new(source.trim()),
                    Address::new(target.trim()),
                    weight,
                )?;
            }
            other => {
                return Err(PersistenceError::Malformed {
                    line: line_no,
                    reason: format!("expected 1 or 3 tab-separated fields, found {}", other.len()),
                });
            }
        }
    }

    Ok(store)
}

fn parse_weight(text: &str, line: usize) -> PersistenceResult<Weight> {
    let value: i64 = text.parse().map_err(|_| PersistenceError::Malformed {
        line,
        reason: format!("weight '{}' is not an integer", text),
    })?;
    if value <= 0 {
        return Err(PersistenceError::InvalidWeight { line, weight: value });
    }
    Ok(value as Weight)
}

/// Save a graph to `path`, creating or truncating the file
pub fn save_to_path<V: Vertex>(graph: &Graph<V>, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_adjacency(graph, file)?;
    info!("Saved adjacency list ({} edges) to {:?}", graph.size(), path);
    Ok(())
}

/// Load a store from the adjacency list at `path`
pub fn load_from_path(path: impl AsRef<Path>) -> PersistenceResult<GraphStore<Address>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let store = read_adjacency(BufReader::new(file))?;
    info!(
        "Loaded adjacency list from {:?}: {} vertices, {} edges",
        path,
        store.order(),
        store.size()
    );
    Ok(store)
}
