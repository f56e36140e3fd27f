//! Mail-folder ingestion
//!
//! Walks a directory tree of raw messages, one message per file, and turns
//! every `(sender, To: recipient)` pair into one unit of edge weight.

pub mod parser;

pub use parser::{extract_addresses, parse_message, MessageHeader};

use crate::config::VertexUniverse;
use crate::graph::{Address, GraphStore};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const PROGRESS_EVERY: usize = 1000;

/// Ingestion errors
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Outcome of an ingestion run
#[derive(Debug)]
pub struct IngestSummary {
    pub store: GraphStore<Address>,
    /// Messages that produced at least one address
    pub messages: usize,
    /// Files that were unreadable or carried no usable header
    pub skipped: usize,
}

/// Add one parsed message to `store`.
///
/// Returns false when the header names nobody.
pub fn record_message(
    store: &mut GraphStore<Address>,
    header: &MessageHeader,
    universe: VertexUniverse,
) -> bool {
    if header.is_empty() {
        return false;
    }
    if universe == VertexUniverse::Declared {
        for address in header.addresses() {
            store.add_vertex(address.clone());
        }
    }
    for (sender, recipient) in header.edges() {
        store.add_edge(sender, recipient);
    }
    true
}

/// Ingest every regular file below `root`.
///
/// Files are visited in file-name order so vertex numbering is stable
/// between runs. Undecodable bytes are replaced, not rejected.
pub fn ingest_dir(root: impl AsRef<Path>, universe: VertexUniverse) -> IngestResult<IngestSummary> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(IngestError::NotADirectory(root.to_path_buf()));
    }

    let mut summary = IngestSummary {
        store: GraphStore::new(),
        messages: 0,
        skipped: 0,
    };

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                summary.skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let bytes = match std::fs::read(entry.path()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping {:?}: {}", entry.path(), e);
                summary.skipped += 1;
                continue;
            }
        };

        let header = parse_message(&String::from_utf8_lossy(&bytes));
        if record_message(&mut summary.store, &header, universe) {
            summary.messages += 1;
            if summary.messages % PROGRESS_EVERY == 0 {
                info!("Ingested {} messages", summary.messages);
            }
        } else {
            debug!("No addresses in {:?}", entry.path());
            summary.skipped += 1;
        }
    }

    info!(
        "Ingestion of {:?} done: {} messages, {} skipped, {} vertices, {} edges",
        root,
        summary.messages,
        summary.skipped,
        summary.store.order(),
        summary.store.size()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn a(s: &str) -> Address {
        Address::from(s)
    }

    fn mailbox() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let inbox = dir.path().join("allen-p").join("inbox");
        fs::create_dir_all(&inbox).unwrap();
        fs::write(
            inbox.join("1."),
            "From: Alice@Example.com\nTo: bob@example.com, carol@example.com\n\nhi",
        )
        .unwrap();
        fs::write(inbox.join("2."), "From: alice@example.com\nTo: bob@example.com\n\nagain").unwrap();
        fs::write(inbox.join("3."), "From: memo@example.com\nSubject: no recipients\n\n").unwrap();
        fs::write(inbox.join("4."), b"\xff\xfe not a message").unwrap();
        dir
    }

    #[test]
    fn test_ingest_edges_universe() {
        let dir = mailbox();
        let summary = ingest_dir(dir.path(), VertexUniverse::Edges).unwrap();

        assert_eq!(summary.messages, 3);
        assert_eq!(summary.skipped, 1);
        let store = summary.store;
        assert_eq!(store.order(), 3);
        assert_eq!(store.size(), 2);
        assert_eq!(store.out_degree(&a("alice@example.com")).unwrap(), 3);
        assert_eq!(store.in_degree(&a("bob@example.com")).unwrap(), 2);
        assert!(!store.contains(&a("memo@example.com")));
    }

    #[test]
    fn test_ingest_declared_universe_keeps_isolated() {
        let dir = mailbox();
        let summary = ingest_dir(dir.path(), VertexUniverse::Declared).unwrap();

        let graph = summary.store.freeze();
        assert_eq!(graph.order(), 4);
        assert_eq!(graph.isolated_vertices(), vec![a("memo@example.com")]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = ingest_dir(dir.path().join("nope"), VertexUniverse::Edges).unwrap_err();
        assert!(matches!(err, IngestError::NotADirectory(_)));
    }

    #[test]
    fn test_record_message_ignores_empty_header() {
        let mut store = GraphStore::new();
        assert!(!record_message(&mut store, &MessageHeader::default(), VertexUniverse::Declared));
        assert!(store.is_empty());
    }
}
