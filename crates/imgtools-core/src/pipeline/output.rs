//! Writing pipeline results to disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use thiserror::Error;

use super::runner::Preview;
use crate::encode::{
    encode_gif_animation, encode_jpeg, Base64Export, EncodeError, DEFAULT_FRAME_DELAY_MS,
    DEFAULT_JPEG_QUALITY,
};

/// Default directory for Base64 exports and the saved workflow.
pub const DEFAULT_PRESETS_DIR: &str = "presets";

/// Errors writing pipeline output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, bytes).map_err(io_err)
}

/// Write `export` as `<dir>/<stem>_base64.json`. Returns the written path.
pub fn write_base64_export(
    dir: &Path,
    stem: &str,
    export: &Base64Export,
) -> Result<PathBuf, OutputError> {
    let path = dir.join(format!("{stem}_base64.json"));
    let json = serde_json::to_string(export)?;
    write_file(&path, json.as_bytes())?;

    tracing::info!("Base64 export saved to {}", path.display());
    Ok(path)
}

/// Encode a preview: an animation becomes a looping GIF, a still becomes a JPEG.
pub fn encode_preview(preview: &Preview) -> Result<Vec<u8>, EncodeError> {
    match preview {
        Preview::Animation(frames) => encode_gif_animation(frames, DEFAULT_FRAME_DELAY_MS),
        Preview::Still(image) => encode_jpeg(image, DEFAULT_JPEG_QUALITY),
    }
}

/// Encode `preview` and write it to `path`.
pub fn write_preview(path: &Path, preview: &Preview) -> Result<(), OutputError> {
    let bytes = encode_preview(preview)?;
    write_file(path, &bytes)?;

    tracing::info!(
        "Saved {} to {} ({})",
        match preview {
            Preview::Animation(_) => "animation",
            Preview::Still(_) => "image",
        },
        path.display(),
        format_file_size(bytes.len() as u64)
    );
    Ok(())
}

/// File extension matching how [`write_preview`] encodes `preview`.
pub fn preview_extension(preview: &Preview) -> &'static str {
    match preview {
        Preview::Animation(_) => "gif",
        Preview::Still(_) => "jpg",
    }
}

/// Timestamped output file name, e.g. `processed_20240131_093005.gif`.
pub fn default_output_name<Tz>(preview: &Preview, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "processed_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        preview_extension(preview)
    )
}

/// Human-readable size: megabytes above 1 MiB, kilobytes otherwise.
pub fn format_file_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes > MIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_image, PixelFormat, RasterImage};
    use chrono::Utc;

    fn image(width: u32, height: u32) -> RasterImage {
        RasterImage::new(
            width,
            height,
            PixelFormat::Rgba,
            vec![200u8; width as usize * height as usize * 4],
        )
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1024.0 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 / 2), "1.50 MB");
    }

    #[test]
    fn test_default_output_name() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 9, 30, 5).unwrap();
        let still = Preview::Still(image(2, 2));
        let anim = Preview::Animation(vec![image(2, 2)]);

        assert_eq!(default_output_name(&still, &now), "processed_20240131_093005.jpg");
        assert_eq!(default_output_name(&anim, &now), "processed_20240131_093005.gif");
    }

    #[test]
    fn test_write_base64_export() {
        let dir = tempfile::tempdir().unwrap();
        let export = Base64Export::new("aGVsbG8=".to_string());

        let path = write_base64_export(&dir.path().join("presets"), "photo", &export).unwrap();
        assert_eq!(path.file_name().unwrap(), "photo_base64.json");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, r#"{"key":"aGVsbG8="}"#);
    }

    #[test]
    fn test_write_still_preview_is_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        write_preview(&path, &Preview::Still(image(8, 6))).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(decode_image(&bytes).unwrap().dimensions(), (8, 6));
    }

    #[test]
    fn test_write_animation_preview_is_gif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.gif");
        let frames = vec![image(5, 5), RasterImage::transparent(5, 5)];
        write_preview(&path, &Preview::Animation(frames)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], b"GIF");
    }

    #[test]
    fn test_empty_animation_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gif");
        assert!(matches!(
            write_preview(&path, &Preview::Animation(vec![])),
            Err(OutputError::Encode(EncodeError::EmptyAnimation))
        ));
        assert!(!path.exists());
    }
}
