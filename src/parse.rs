//! Edge-list loaders.
//!
//! Two formats:
//!
//! - **CSV**: one `source,target[,weight]` record per line. Blank lines and `#` comments are
//!   skipped; a missing weight means `1.0`. A record whose weight is not a number (a header
//!   row, typically) is skipped with a log message. Fields past the third are ignored.
//! - **JSON**: `{"edges": [{"source": .., "target": .., "weight": ..}]}` where node ids are
//!   strings or numbers and `weight` is optional.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::graph::Graph;
use crate::{Error, Result};

const DEFAULT_WEIGHT: f64 = 1.0;

/// Parse a CSV edge list.
pub fn parse_csv<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph = Graph::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let record = line.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = record.split(',').map(str::trim).collect();
        if fields.len() < 2 {
            return Err(Error::MalformedRecord {
                line: line_no,
                reason: format!("expected `source,target[,weight]`, found `{record}`"),
            });
        }
        let (source, target) = (fields[0], fields[1]);
        if source.is_empty() || target.is_empty() {
            return Err(Error::MalformedRecord {
                line: line_no,
                reason: "empty node name".to_owned(),
            });
        }

        let weight = match fields.get(2).filter(|w| !w.is_empty()) {
            None => DEFAULT_WEIGHT,
            Some(raw) => match raw.parse::<f64>() {
                Ok(w) => w,
                Err(_) if line_no == 1 => {
                    debug!(line = line_no, "skipping header row");
                    skipped += 1;
                    continue;
                }
                Err(err) => {
                    warn!(line = line_no, weight = %raw, %err, "skipping record with unparsable weight");
                    skipped += 1;
                    continue;
                }
            },
        };

        graph.add_edge(source, target, weight)?;
    }

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        skipped,
        "parsed csv edge list"
    );
    Ok(graph)
}

/// Node id in a JSON edge list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeId {
    Name(String),
    Number(serde_json::Number),
}

impl NodeId {
    fn into_name(self) -> String {
        match self {
            NodeId::Name(name) => name,
            NodeId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: NodeId,
    target: NodeId,
    #[serde(default)]
    weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EdgeList {
    edges: Vec<EdgeRecord>,
}

/// Parse a JSON edge list.
pub fn parse_json<R: Read>(reader: R) -> Result<Graph> {
    let list: EdgeList = serde_json::from_reader(reader)?;
    let graph = Graph::from_edges(list.edges.into_iter().map(|e| {
        (
            e.source.into_name(),
            e.target.into_name(),
            e.weight.unwrap_or(DEFAULT_WEIGHT),
        )
    }))?;
    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "parsed json edge list"
    );
    Ok(graph)
}

/// Load a graph, choosing the format from the file extension (`.csv` or `.json`).
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let graph = match extension.as_deref() {
        Some("csv") => parse_csv(BufReader::new(File::open(path)?))?,
        Some("json") => parse_json(BufReader::new(File::open(path)?))?,
        _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
    };
    info!(
        path = %path.display(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}
