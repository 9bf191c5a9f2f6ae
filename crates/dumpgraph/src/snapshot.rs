#![forbid(unsafe_code)]

//! The finished graph in the form handed to a serialization sink.

use crate::domain::{AllocatorDump, Entry, Guid};
use crate::process_memory_dump::ProcessMemoryDump;
use config::LevelOfDetail;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};
use std::collections::BTreeMap;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpNode {
    pub name: String,
    #[serde_as(as = "DisplayFromStr")]
    pub guid: Guid,
    pub flags: u32,
    pub attributes: BTreeMap<String, Entry>,
}

impl From<&AllocatorDump> for DumpNode {
    fn from(dump: &AllocatorDump) -> Self {
        Self {
            name: dump.name().to_owned(),
            guid: dump.guid(),
            flags: dump.flags().bits(),
            attributes: dump.entries().clone(),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    #[serde_as(as = "DisplayFromStr")]
    pub source: Guid,
    #[serde_as(as = "DisplayFromStr")]
    pub target: Guid,
    pub importance: u32,
    pub overridable: bool,
}

/// Nodes ordered by name, edges ordered by source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpSnapshot {
    pub level_of_detail: LevelOfDetail,
    pub dumps: Vec<DumpNode>,
    pub edges: Vec<EdgeRecord>,
}

impl DumpSnapshot {
    pub fn from_dump(pmd: &ProcessMemoryDump) -> Self {
        let mut dumps: Vec<DumpNode> = pmd
            .allocator_dumps()
            .chain(pmd.shared_global_dumps())
            .map(DumpNode::from)
            .collect();
        dumps.sort_by(|a, b| a.name.cmp(&b.name));

        let mut edges: Vec<EdgeRecord> = pmd
            .edges()
            .map(|(source, edge)| EdgeRecord {
                source,
                target: edge.target,
                importance: edge.importance,
                overridable: edge.overridable,
            })
            .collect();
        edges.sort_by_key(|edge| edge.source);

        Self {
            level_of_detail: pmd.args().level_of_detail,
            dumps,
            edges,
        }
    }

    pub fn dump(&self, name: &str) -> Option<&DumpNode> {
        self.dumps.iter().find(|node| node.name == name)
    }

    pub fn edge(&self, source: Guid) -> Option<&EdgeRecord> {
        self.edges.iter().find(|edge| edge.source == source)
    }
}
