// ============================================================================
// deshake-core/src/processing/mod.rs
// ============================================================================
//
// PROCESSING: Batch Pipeline
//
// Module root for work-item planning and the batch runner.

pub mod video;

pub use video::{WorkItem, derive_output_path, plan_work_items, process_videos, sort_files_by_size};
