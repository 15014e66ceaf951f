//! Pipeline session and execution WASM bindings.
//!
//! A [`JsSession`] mirrors the core session: the step order plus per-step
//! settings. It can be edited field by field or round-tripped through plain
//! JavaScript objects for storage.

use crate::types::{js_error, JsRasterImage};
use imgtools_core::encode::ContainerFormat;
use imgtools_core::pipeline::{self, Session, Step};
use wasm_bindgen::prelude::*;

/// Pipeline session wrapper for JavaScript
#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

#[wasm_bindgen]
impl JsSession {
    /// Create a session with default settings and every step disabled
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Session::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn rotate_enabled(&self) -> bool {
        self.inner.rotate.enabled
    }

    #[wasm_bindgen(setter)]
    pub fn set_rotate_enabled(&mut self, value: bool) {
        self.inner.rotate.enabled = value;
    }

    /// Frames per full turn (10 to 360)
    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> u32 {
        self.inner.rotate.frame_count
    }

    #[wasm_bindgen(setter)]
    pub fn set_frame_count(&mut self, value: u32) {
        self.inner.rotate.frame_count = value;
    }

    #[wasm_bindgen(getter)]
    pub fn crop(&self) -> bool {
        self.inner.rotate.crop
    }

    #[wasm_bindgen(setter)]
    pub fn set_crop(&mut self, value: bool) {
        self.inner.rotate.crop = value;
    }

    #[wasm_bindgen(getter)]
    pub fn compress_enabled(&self) -> bool {
        self.inner.compress.enabled
    }

    #[wasm_bindgen(setter)]
    pub fn set_compress_enabled(&mut self, value: bool) {
        self.inner.compress.enabled = value;
    }

    /// Compression budget in megabytes (1 to 100)
    #[wasm_bindgen(getter)]
    pub fn budget_mb(&self) -> u32 {
        self.inner.compress.budget_mb
    }

    #[wasm_bindgen(setter)]
    pub fn set_budget_mb(&mut self, value: u32) {
        self.inner.compress.budget_mb = value;
    }

    #[wasm_bindgen(getter)]
    pub fn export_enabled(&self) -> bool {
        self.inner.export.enabled
    }

    #[wasm_bindgen(setter)]
    pub fn set_export_enabled(&mut self, value: bool) {
        self.inner.export.enabled = value;
    }

    /// Export container: "JPEG" or "PNG"
    #[wasm_bindgen(getter)]
    pub fn export_format(&self) -> String {
        self.inner.export.format.to_string()
    }

    /// Set the export container. Fails for anything but JPEG or PNG.
    pub fn set_export_format(&mut self, value: &str) -> Result<(), JsValue> {
        self.inner.export.format = value.parse::<ContainerFormat>().map_err(js_error)?;
        Ok(())
    }

    /// Step order as lowercase names, e.g. `["rotate", "compress", "export"]`
    pub fn order(&self) -> Vec<String> {
        self.inner.order.iter().map(Step::to_string).collect()
    }

    /// Move the step at `index` one row up. Returns its new index.
    pub fn move_step_up(&mut self, index: usize) -> usize {
        self.inner.move_step_up(index)
    }

    /// Move the step at `index` one row down. Returns its new index.
    pub fn move_step_down(&mut self, index: usize) -> usize {
        self.inner.move_step_down(index)
    }

    /// Serialize to a plain object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(js_error)
    }

    /// Deserialize from a plain object; missing fields take defaults
    pub fn from_json(value: JsValue) -> Result<JsSession, JsValue> {
        let inner: Session = serde_wasm_bindgen::from_value(value).map_err(js_error)?;
        inner.validate().map_err(js_error)?;
        Ok(Self { inner })
    }
}

impl Default for JsSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run.
#[wasm_bindgen]
pub struct JsPipelineResult {
    image: JsRasterImage,
    frame_count: usize,
    preview: Vec<u8>,
    animated: bool,
    export: Option<String>,
}

#[wasm_bindgen]
impl JsPipelineResult {
    /// Working image after all steps
    pub fn image(&self) -> JsRasterImage {
        self.image.clone()
    }

    /// Number of frames in the preview animation
    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Whether `preview` holds a GIF (rotation ran) rather than a JPEG
    #[wasm_bindgen(getter)]
    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Encoded preview file bytes
    pub fn preview(&self) -> Vec<u8> {
        self.preview.clone()
    }

    /// Base64 export text, if the export step ran
    pub fn export(&self) -> Option<String> {
        self.export.clone()
    }
}

/// Run every enabled step of `session` on `image`.
///
/// # Errors
///
/// Returns an error for an invalid session, an unreachable compression
/// budget, or an encoding failure.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const session = new JsSession();
/// session.rotate_enabled = true;
/// session.frame_count = 36;
/// const result = run_pipeline(image, session);
/// const blob = new Blob([result.preview()], { type: result.animated ? 'image/gif' : 'image/jpeg' });
/// ```
#[wasm_bindgen]
pub fn run_pipeline(image: &JsRasterImage, session: &JsSession) -> Result<JsPipelineResult, JsValue> {
    let output = pipeline::run_pipeline(&image.to_raster(), &session.inner).map_err(js_error)?;
    let preview = pipeline::encode_preview(&output.preview).map_err(js_error)?;

    Ok(JsPipelineResult {
        animated: matches!(output.preview, pipeline::Preview::Animation(_)),
        frame_count: output.frames.len(),
        image: JsRasterImage::from_raster(output.image),
        preview,
        export: output.export.map(|e| e.key),
    })
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_json_round_trip() {
        let mut session = JsSession::new();
        session.set_compress_enabled(true);
        session.set_budget_mb(5);

        let value = session.to_json().unwrap();
        let restored = JsSession::from_json(value).unwrap();
        assert!(restored.compress_enabled());
        assert_eq!(restored.budget_mb(), 5);
    }

    #[wasm_bindgen_test]
    fn test_set_export_format() {
        let mut session = JsSession::new();
        assert!(session.set_export_format("png").is_ok());
        assert_eq!(session.export_format(), "PNG");
        assert!(session.set_export_format("webp").is_err());
    }

    #[wasm_bindgen_test]
    fn test_run_pipeline_invalid_session() {
        let mut session = JsSession::new();
        session.set_frame_count(3);
        assert!(run_pipeline(&JsRasterImage::new(4, 4, vec![0u8; 48], false), &session).is_err());
    }
}
