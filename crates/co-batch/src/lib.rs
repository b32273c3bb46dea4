//! Batch processing of hemispherical photos.
//!
//! Each image runs its own locate, sample and aggregate pipeline. A failure
//! on one image is recorded in its [`BatchRecord`] and never aborts the rest
//! of the batch. Records come back in input order.
//!
//! Features:
//! - `rayon` *(default)* processes images in parallel. The angle tables and
//!   ring weights are built once and shared read-only by every worker.
//!
//! File names of the form `Plot.Subplot.Date.Exposure[.Focus].ext` are
//! parsed into [`PhotoMetadata`] so results can be keyed downstream.

mod batch;
mod metadata;

pub use batch::{BatchConfig, BatchItem, BatchRecord, BatchReport, run_batch};
pub use metadata::{MetadataError, PhotoMetadata};
