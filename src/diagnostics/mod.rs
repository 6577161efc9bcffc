//! Serialisable diagnostics returned by the detector and written by the demo.
//!
//! `DetectionReport` is the main entry point: input geometry, the scale that
//! sized every smoothing window, per-stage counts and timings, and the final
//! candidate regions.

pub mod report;
pub mod timing;

pub use report::{DetectionReport, InputDescriptor};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
