//! Service support library: tracing bootstrap and the per-batch pipeline.

pub mod batch;
mod logging;

pub use batch::{
    BatchReport, BatchRunner, FileOutcome, OutcomeStatus, aggregate_text, process_batch,
};
pub use logging::init_tracing_with_config;
