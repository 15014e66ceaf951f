//! Session configuration for a pipeline run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::ContainerFormat;

/// Smallest and largest accepted frame counts.
pub const FRAME_COUNT_RANGE: std::ops::RangeInclusive<u32> = 10..=360;
/// Smallest and largest accepted compression budgets, in megabytes.
pub const BUDGET_MB_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Errors found while validating a session or workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Frame count {0} is outside 10..=360")]
    FrameCountOutOfRange(u32),

    #[error("Compression budget {0} MB is outside 1..=100")]
    BudgetOutOfRange(u32),

    #[error("Step '{0}' appears more than once in the workflow")]
    DuplicateStep(Step),

    #[error("Unknown step '{0}' (expected rotate, compress or export)")]
    UnknownStep(String),
}

/// One stage of the processing pipeline.
///
/// Serialized in lowercase; names written by earlier versions of the
/// workflow file are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[serde(alias = "旋轉")]
    Rotate,
    #[serde(alias = "壓縮")]
    Compress,
    #[serde(alias = "匯出 Base64")]
    Export,
}

impl Step {
    /// Default execution order.
    pub const DEFAULT_ORDER: [Step; 3] = [Step::Rotate, Step::Compress, Step::Export];
}

impl FromStr for Step {
    type Err = ConfigError;

    /// Accepts the serialized names in any case, plus the legacy aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_lowercase().as_str() {
            "rotate" | "旋轉" => Ok(Step::Rotate),
            "compress" | "壓縮" => Ok(Step::Compress),
            "export" | "匯出 base64" => Ok(Step::Export),
            _ => Err(ConfigError::UnknownStep(s.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Rotate => f.write_str("rotate"),
            Step::Compress => f.write_str("compress"),
            Step::Export => f.write_str("export"),
        }
    }
}

/// Rotation step settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateSettings {
    pub enabled: bool,
    /// Frames per full turn (10 to 360)
    pub frame_count: u32,
    /// Crop each rotated frame to its visible content before centring
    pub crop: bool,
}

impl Default for RotateSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            frame_count: 36,
            crop: false,
        }
    }
}

/// Compression step settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressSettings {
    pub enabled: bool,
    /// Target size in megabytes (1 to 100)
    pub budget_mb: u32,
}

impl Default for CompressSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            budget_mb: 10,
        }
    }
}

/// Base64 export step settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub enabled: bool,
    pub format: ContainerFormat,
}

/// Everything a pipeline run needs besides the source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Execution order; steps not listed never run.
    pub order: Vec<Step>,
    pub rotate: RotateSettings,
    pub compress: CompressSettings,
    pub export: ExportSettings,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            order: Step::DEFAULT_ORDER.to_vec(),
            rotate: RotateSettings::default(),
            compress: CompressSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

impl Session {
    /// Create a session with default settings and every step disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `step` is switched on.
    pub fn is_enabled(&self, step: Step) -> bool {
        match step {
            Step::Rotate => self.rotate.enabled,
            Step::Compress => self.compress.enabled,
            Step::Export => self.export.enabled,
        }
    }

    /// Check ranges and step uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_order(&self.order)?;

        if !FRAME_COUNT_RANGE.contains(&self.rotate.frame_count) {
            return Err(ConfigError::FrameCountOutOfRange(self.rotate.frame_count));
        }
        if !BUDGET_MB_RANGE.contains(&self.compress.budget_mb) {
            return Err(ConfigError::BudgetOutOfRange(self.compress.budget_mb));
        }

        Ok(())
    }

    /// Move the step at `index` one position earlier. Returns its new index.
    pub fn move_step_up(&mut self, index: usize) -> usize {
        if index > 0 && index < self.order.len() {
            self.order.swap(index, index - 1);
            index - 1
        } else {
            index
        }
    }

    /// Move the step at `index` one position later. Returns its new index.
    pub fn move_step_down(&mut self, index: usize) -> usize {
        if index < self.order.len().saturating_sub(1) {
            self.order.swap(index, index + 1);
            index + 1
        } else {
            index
        }
    }
}

/// Reject workflows that list a step twice.
pub fn validate_order(order: &[Step]) -> Result<(), ConfigError> {
    for (i, step) in order.iter().enumerate() {
        if order[..i].contains(step) {
            return Err(ConfigError::DuplicateStep(*step));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let session = Session::new();
        assert_eq!(session.order, vec![Step::Rotate, Step::Compress, Step::Export]);
        assert_eq!(session.rotate.frame_count, 36);
        assert_eq!(session.compress.budget_mb, 10);
        assert_eq!(session.export.format, ContainerFormat::Jpeg);
        assert!(!session.is_enabled(Step::Rotate));
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        let mut session = Session::new();
        session.rotate.frame_count = 9;
        assert_eq!(session.validate(), Err(ConfigError::FrameCountOutOfRange(9)));

        session.rotate.frame_count = 360;
        session.compress.budget_mb = 0;
        assert_eq!(session.validate(), Err(ConfigError::BudgetOutOfRange(0)));

        session.compress.budget_mb = 101;
        assert_eq!(session.validate(), Err(ConfigError::BudgetOutOfRange(101)));
    }

    #[test]
    fn test_validate_duplicate_step() {
        let mut session = Session::new();
        session.order = vec![Step::Compress, Step::Rotate, Step::Compress];
        assert_eq!(
            session.validate(),
            Err(ConfigError::DuplicateStep(Step::Compress))
        );
    }

    #[test]
    fn test_move_step_up_and_down() {
        let mut session = Session::new();

        assert_eq!(session.move_step_up(2), 1);
        assert_eq!(session.order, vec![Step::Rotate, Step::Export, Step::Compress]);

        // First row cannot move up, last row cannot move down
        assert_eq!(session.move_step_up(0), 0);
        assert_eq!(session.move_step_down(2), 2);

        assert_eq!(session.move_step_down(0), 1);
        assert_eq!(session.order, vec![Step::Export, Step::Rotate, Step::Compress]);
    }

    #[test]
    fn test_move_step_out_of_range_is_noop() {
        let mut session = Session::new();

        assert_eq!(session.move_step_down(usize::MAX), usize::MAX);
        assert_eq!(session.move_step_up(usize::MAX), usize::MAX);
        assert_eq!(session.move_step_down(3), 3);
        assert_eq!(session.order, Step::DEFAULT_ORDER.to_vec());

        session.order.clear();
        assert_eq!(session.move_step_down(0), 0);
        assert!(session.order.is_empty());
    }

    #[test]
    fn test_step_from_str() {
        assert_eq!("rotate".parse(), Ok(Step::Rotate));
        assert_eq!(" Export ".parse(), Ok(Step::Export));
        assert_eq!("COMPRESS".parse(), Ok(Step::Compress));
        assert_eq!("壓縮".parse(), Ok(Step::Compress));
        assert_eq!("匯出 Base64".parse(), Ok(Step::Export));
        assert_eq!(
            "blur".parse::<Step>(),
            Err(ConfigError::UnknownStep("blur".to_string()))
        );
    }

    #[test]
    fn test_step_from_str_matches_display() {
        for step in Step::DEFAULT_ORDER {
            assert_eq!(step.to_string().parse(), Ok(step));
        }
    }

    #[test]
    fn test_step_serde_names() {
        assert_eq!(serde_json::to_string(&Step::Export).unwrap(), "\"export\"");
        let steps: Vec<Step> = serde_json::from_str(r#"["壓縮", "旋轉", "匯出 Base64"]"#).unwrap();
        assert_eq!(steps, vec![Step::Compress, Step::Rotate, Step::Export]);
    }

    #[test]
    fn test_session_partial_json_uses_defaults() {
        let session: Session =
            serde_json::from_str(r#"{"rotate": {"enabled": true, "crop": true}}"#).unwrap();
        assert!(session.rotate.enabled);
        assert!(session.rotate.crop);
        assert_eq!(session.rotate.frame_count, 36);
        assert_eq!(session.order, Step::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn test_session_json_round_trip() {
        let mut session = Session::new();
        session.export.enabled = true;
        session.export.format = ContainerFormat::Png;
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"PNG\""));
        assert_eq!(serde_json::from_str::<Session>(&json).unwrap(), session);
    }
}
