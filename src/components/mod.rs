//! UI components.

pub mod interaction_graph;
