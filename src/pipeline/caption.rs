//! Caption generation over a directory of downloaded images.
//!
//! The captioning model is an opaque collaborator: given an image path and a
//! text prompt it produces a caption, or nothing when it declines. This
//! module owns the batch loop and the newline-delimited JSON output format.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::{PipelineError, list_input_files};

/// Opaque captioning collaborator.
///
/// `None` means the model declined to caption the image; a per-image model
/// failure is reported as an error string so the loop can contain it.
#[async_trait]
pub trait CaptionModel: Send + Sync {
    /// Produces a caption for one image, or `None` when the model declines.
    ///
    /// # Errors
    ///
    /// Returns a description of the model failure; the batch loop logs it
    /// and moves on to the next image.
    async fn caption(&self, image_path: &Path, prompt: &str) -> Result<Option<String>, String>;
}

/// One caption result, serialized as a single NDJSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRecord {
    /// Path of the captioned image.
    pub image_path: String,
    /// The generated caption.
    pub caption: String,
}

/// Captions every file in `input_dir` and appends one JSON record per
/// captioned image to `output_path` (newline-delimited JSON).
///
/// Images the model declines or fails on are logged and skipped; the loop
/// never aborts on a per-image failure. Returns the number of records
/// written.
///
/// # Errors
///
/// Returns [`PipelineError`] only for the loop's own I/O: listing the input
/// directory, opening the output file, or writing a record.
pub async fn caption_directory(
    model: &dyn CaptionModel,
    input_dir: &Path,
    prompt: &str,
    output_path: &Path,
) -> Result<usize, PipelineError> {
    let image_paths = list_input_files(input_dir).await?;
    info!(
        images = image_paths.len(),
        prompt = %prompt,
        "starting caption generation"
    );

    let mut output = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_path)
        .await
        .map_err(|e| PipelineError::io(output_path, e))?;

    let mut written = 0usize;
    for image_path in &image_paths {
        let caption = match model.caption(image_path, prompt).await {
            Ok(Some(caption)) => caption,
            Ok(None) => {
                info!(image = %image_path.display(), "model declined to caption image");
                continue;
            }
            Err(e) => {
                warn!(image = %image_path.display(), error = %e, "caption generation failed");
                continue;
            }
        };

        let record = CaptionRecord {
            image_path: image_path.display().to_string(),
            caption,
        };
        let mut line =
            serde_json::to_string(&record).map_err(|e| PipelineError::Serialize { source: e })?;
        line.push('\n');
        output
            .write_all(line.as_bytes())
            .await
            .map_err(|e| PipelineError::io(output_path, e))?;
        written += 1;
    }

    output
        .flush()
        .await
        .map_err(|e| PipelineError::io(output_path, e))?;

    info!(written, total = image_paths.len(), "caption generation complete");
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Deterministic stand-in model: captions every image by filename,
    /// declines files named "decline", fails on files named "broken".
    struct StubModel;

    #[async_trait]
    impl CaptionModel for StubModel {
        async fn caption(
            &self,
            image_path: &Path,
            prompt: &str,
        ) -> Result<Option<String>, String> {
            let stem = image_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            match stem {
                "decline" => Ok(None),
                "broken" => Err("model exploded".to_string()),
                other => Ok(Some(format!("{prompt}: {other}"))),
            }
        }
    }

    #[tokio::test]
    async fn test_caption_directory_writes_one_record_per_image() {
        let input_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output_path = out_dir.path().join("captions.ndjson");

        std::fs::write(input_dir.path().join("a.jpg"), b"img").unwrap();
        std::fs::write(input_dir.path().join("b.jpg"), b"img").unwrap();

        let written = caption_directory(&StubModel, input_dir.path(), "describe", &output_path)
            .await
            .unwrap();

        assert_eq!(written, 2);
        let contents = std::fs::read_to_string(&output_path).unwrap();
        let records: Vec<CaptionRecord> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert!(records[0].caption.starts_with("describe:"));
        assert!(records[0].image_path.ends_with("a.jpg"));
    }

    #[tokio::test]
    async fn test_caption_directory_contains_per_image_failures() {
        let input_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output_path = out_dir.path().join("captions.ndjson");

        std::fs::write(input_dir.path().join("a.jpg"), b"img").unwrap();
        std::fs::write(input_dir.path().join("broken.jpg"), b"img").unwrap();
        std::fs::write(input_dir.path().join("decline.jpg"), b"img").unwrap();

        let written = caption_directory(&StubModel, input_dir.path(), "describe", &output_path)
            .await
            .unwrap();

        // One good image; the failing and declining ones are skipped.
        assert_eq!(written, 1);
    }

    #[tokio::test]
    async fn test_caption_directory_empty_input_writes_nothing() {
        let input_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output_path = out_dir.path().join("captions.ndjson");

        let written = caption_directory(&StubModel, input_dir.path(), "describe", &output_path)
            .await
            .unwrap();

        assert_eq!(written, 0);
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_caption_directory_missing_input_dir_is_error() {
        let out_dir = TempDir::new().unwrap();
        let output_path = out_dir.path().join("captions.ndjson");

        let result = caption_directory(
            &StubModel,
            Path::new("/definitely/not/here"),
            "describe",
            &output_path,
        )
        .await;

        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }

    #[test]
    fn test_caption_record_round_trips_through_json() {
        let record = CaptionRecord {
            image_path: "data/images/abc.jpg".to_string(),
            caption: "a cat on a mat".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"image_path\""));
        assert!(json.contains("\"caption\""));
        let back: CaptionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
