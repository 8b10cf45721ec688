//! User interface components.

pub mod force_graph;
pub mod network;
pub mod panels;
