//! Core domain models for nodeflow
//!
//! This module defines the fundamental data structures that represent
//! graphs, nodes, and their run state.

pub mod context;
pub mod document;
pub mod graph;
pub mod node;
pub mod sequence;
pub mod state;

pub use context::*;
pub use document::*;
pub use graph::*;
pub use node::*;
pub use sequence::*;
pub use state::*;
