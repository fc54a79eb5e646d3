//! Scenario-based tests for nodeflow


mod cancellation;
mod failure_handling;
mod preview_nodes;
mod single_run;
