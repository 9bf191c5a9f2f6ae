#![forbid(unsafe_code)]

mod dump_store;
mod edge_table;
mod global_store;

pub(crate) use dump_store::DumpId;
pub use dump_store::DumpStore;
pub use edge_table::EdgeTable;
pub use global_store::GlobalDumpStore;
