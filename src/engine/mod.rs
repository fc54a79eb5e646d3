//! Graph execution engine

pub mod executor;
pub mod reporter;
pub mod session;

pub use executor::{ExecutionError, NodeRunner};
pub use reporter::{ExecutionEvent, StatusReporter};
pub use session::{GraphSession, RunHandle, StartError};
