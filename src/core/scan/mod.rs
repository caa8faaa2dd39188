//! CSV scan orchestration

pub mod coordinator;

pub use coordinator::{default_output_path, ScanCoordinator};
