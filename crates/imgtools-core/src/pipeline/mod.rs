//! Configurable processing pipeline.
//!
//! A [`Session`] holds the step order and per-step settings. [`run_pipeline`]
//! executes the enabled steps in order on an in-memory image; the `output`
//! functions persist the results and the `workflow` functions persist the
//! step order between runs.
//!
//! # Example Flow
//!
//! ```text
//! load_workflow_or_default ─► Session ─► run_pipeline ─► PipelineOutput
//!                                                         ├─► write_preview
//!                                                         └─► write_base64_export
//! ```

mod config;
mod output;
mod runner;
mod workflow;

pub use config::{
    validate_order, CompressSettings, ConfigError, ExportSettings, RotateSettings, Session, Step,
    BUDGET_MB_RANGE, FRAME_COUNT_RANGE,
};
pub use output::{
    default_output_name, encode_preview, format_file_size, preview_extension, write_base64_export,
    write_preview, OutputError, DEFAULT_PRESETS_DIR,
};
pub use runner::{
    compress_frames, run_pipeline, PipelineError, PipelineEvent, PipelineOutput, Preview,
};
pub use workflow::{
    load_workflow, load_workflow_or_default, save_workflow, WorkflowError, DEFAULT_WORKFLOW_PATH,
};
