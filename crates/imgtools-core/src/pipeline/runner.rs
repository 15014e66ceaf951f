//! Sequential execution of the configured steps.
//!
//! The runner threads a working image and a frame sequence through the steps
//! in session order:
//!
//! - **rotate** appends a full-turn animation rendered from the working image
//! - **compress** recompresses every frame, or the working image when there
//!   are no frames yet; frames that cannot meet the budget are dropped
//! - **export** encodes the working image to Base64
//!
//! Disabled steps are skipped. Nothing is written to disk here; see
//! [`super::output`] for persistence.

use thiserror::Error;

use super::config::{ConfigError, Session, Step};
use crate::compress::{budget_bytes, compress_to_bytes, compress_to_size, CompressError};
use crate::decode::{DecodeError, RasterImage};
use crate::encode::{encode_base64, Base64Export, ContainerFormat, EncodeError};
use crate::transform::rotation_frames;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid session: {0}")]
    Config(#[from] ConfigError),

    #[error("Source image is empty")]
    EmptySource,

    #[error("Invalid source image: {0}")]
    InvalidSource(#[from] DecodeError),

    #[error("Image could not be compressed below {budget_mb} MB")]
    BudgetUnreachable { budget_mb: u32 },

    #[error("Rotation is enabled but no frames were produced")]
    NoFrames,

    #[error(transparent)]
    Compress(#[from] CompressError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Notable things that happened during a run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The step is in the order but switched off.
    StepSkipped(Step),
    /// Rotation frames were rendered.
    FramesRendered { count: usize },
    /// Frames were compressed; `dropped` of them could not meet the budget.
    FramesCompressed { kept: usize, dropped: usize },
    /// The working image was compressed.
    ImageCompressed {
        width: u32,
        height: u32,
        bytes: usize,
        attempt: usize,
    },
    /// The working image was exported.
    Exported { format: ContainerFormat, chars: usize },
}

/// What the run produced for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Rotation ran: show the frame sequence as an animation.
    Animation(Vec<RasterImage>),
    /// Show the final working image.
    Still(RasterImage),
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Working image after all steps.
    pub image: RasterImage,
    /// Frame sequence, empty unless rotation ran.
    pub frames: Vec<RasterImage>,
    /// Base64 export document, if the export step ran.
    pub export: Option<Base64Export>,
    /// The format the export was encoded in.
    pub export_format: Option<ContainerFormat>,
    /// What to show the user.
    pub preview: Preview,
    pub events: Vec<PipelineEvent>,
}

/// Run every enabled step of `session` on `source`.
pub fn run_pipeline(source: &RasterImage, session: &Session) -> Result<PipelineOutput, PipelineError> {
    session.validate()?;
    if source.is_empty() {
        return Err(PipelineError::EmptySource);
    }
    source.validate()?;

    tracing::info!(
        "Running pipeline on {}x{} image: {}",
        source.width,
        source.height,
        session
            .order
            .iter()
            .map(Step::to_string)
            .collect::<Vec<_>>()
            .join(" > ")
    );

    let mut image = source.to_rgba();
    let mut frames: Vec<RasterImage> = Vec::new();
    let mut export = None;
    let mut export_format = None;
    let mut events = Vec::new();

    for &step in &session.order {
        if !session.is_enabled(step) {
            tracing::debug!("Skipping disabled step: {}", step);
            events.push(PipelineEvent::StepSkipped(step));
            continue;
        }

        match step {
            Step::Rotate => {
                let settings = session.rotate;
                let rendered = rotation_frames(&image, settings.frame_count, settings.crop);
                tracing::info!(
                    "Rendered {} rotation frames (crop: {})",
                    rendered.len(),
                    settings.crop
                );
                events.push(PipelineEvent::FramesRendered {
                    count: rendered.len(),
                });
                frames.extend(rendered);
            }
            Step::Compress => {
                let budget_mb = session.compress.budget_mb;
                if frames.is_empty() {
                    let compressed = compress_to_size(&image.to_rgb(), budget_mb)?
                        .ok_or(PipelineError::BudgetUnreachable { budget_mb })?;
                    tracing::info!(
                        "Compressed image to {} bytes ({}x{}, attempt {})",
                        compressed.jpeg.len(),
                        compressed.image.width,
                        compressed.image.height,
                        compressed.attempt
                    );
                    events.push(PipelineEvent::ImageCompressed {
                        width: compressed.image.width,
                        height: compressed.image.height,
                        bytes: compressed.jpeg.len(),
                        attempt: compressed.attempt,
                    });
                    image = compressed.image.to_rgba();
                } else {
                    let (kept, dropped) = compress_frames(&frames, budget_bytes(budget_mb))?;
                    events.push(PipelineEvent::FramesCompressed {
                        kept: kept.len(),
                        dropped,
                    });
                    frames = kept;
                }
            }
            Step::Export => {
                let format = session.export.format;
                let encoded = encode_base64(&image, format)?;
                tracing::info!("Exported image as {} Base64 ({} chars)", format, encoded.len());
                events.push(PipelineEvent::Exported {
                    format,
                    chars: encoded.len(),
                });
                export = Some(Base64Export::new(encoded));
                export_format = Some(format);
            }
        }
    }

    let preview = if session.rotate.enabled {
        if frames.is_empty() {
            return Err(PipelineError::NoFrames);
        }
        Preview::Animation(frames.clone())
    } else {
        Preview::Still(image.clone())
    };

    Ok(PipelineOutput {
        image,
        frames,
        export,
        export_format,
        preview,
        events,
    })
}

/// Compress every frame to at most `target_bytes`, dropping frames that
/// cannot get there. Kept frames come back as RGBA.
///
/// Returns the kept frames and the number dropped.
pub fn compress_frames(
    frames: &[RasterImage],
    target_bytes: u64,
) -> Result<(Vec<RasterImage>, usize), CompressError> {
    let mut kept = Vec::with_capacity(frames.len());
    for frame in frames {
        match compress_to_bytes(&frame.to_rgb(), target_bytes)? {
            Some(compressed) => kept.push(compressed.image.to_rgba()),
            None => tracing::debug!("Frame exceeds {} byte budget, dropping", target_bytes),
        }
    }

    let dropped = frames.len() - kept.len();
    if dropped > 0 {
        tracing::warn!(
            "Dropped {} of {} frames that could not be compressed",
            dropped,
            frames.len()
        );
    }
    Ok((kept, dropped))
}
