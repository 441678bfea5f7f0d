//! Hand-off between the radio receive path and the decode worker.
mod queue;
pub use queue::*;
