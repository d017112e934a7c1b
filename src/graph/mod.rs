// src/graph/mod.rs
//! The category hierarchy: arena storage, edge loading, traversal order.

pub mod order;
pub mod parse;
pub mod store;

pub use order::bfs_order;
pub use parse::{load_edges, load_edges_file, parse_edge, EdgeRecord, LoadStats};
pub use store::{CategoryGraph, CategoryNode, NodeId};
