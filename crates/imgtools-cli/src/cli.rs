use clap::{Parser, Subcommand};
use imgtools_core::encode::ContainerFormat;
use imgtools_core::pipeline::{Step, DEFAULT_WORKFLOW_PATH};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgtools")]
#[command(author, version, about = "Rotation animations, size-targeted compression and Base64 export")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline on an image
    Run {
        /// Image to process
        #[arg(required = true)]
        input: PathBuf,

        /// Workflow file holding the step order
        #[arg(long, default_value = DEFAULT_WORKFLOW_PATH)]
        workflow: PathBuf,

        /// Enable the rotate step
        #[arg(long)]
        rotate: bool,

        /// Frames per full turn (10 to 360)
        #[arg(long, default_value_t = 36)]
        frames: u32,

        /// Crop rotated frames to their visible content
        #[arg(long)]
        crop: bool,

        /// Enable the compress step with this budget in megabytes (1 to 100)
        #[arg(long, value_name = "MB")]
        compress: Option<u32>,

        /// Enable the export step with this container (JPEG or PNG)
        #[arg(long, value_name = "FORMAT")]
        export: Option<ContainerFormat>,

        /// Directory for Base64 exports
        #[arg(long, default_value = "presets")]
        presets: PathBuf,

        /// Directory for the processed preview file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Inspect or edit the saved step order
    Workflow {
        /// Workflow file
        #[arg(long, default_value = DEFAULT_WORKFLOW_PATH)]
        file: PathBuf,

        #[command(subcommand)]
        action: WorkflowAction,
    },

    /// Print the size of a file the way the preview panel shows it
    Size {
        /// File to measure
        #[arg(required = true)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum WorkflowAction {
    /// Print the current order
    Show,

    /// Replace the order
    Save {
        /// Steps in execution order: rotate, compress, export
        #[arg(required = true)]
        steps: Vec<Step>,
    },

    /// Move the step at INDEX (0-based) one position earlier
    Up { index: usize },

    /// Move the step at INDEX (0-based) one position later
    Down { index: usize },
}
