//! Instruction-based image editing over a directory of downloaded images.
//!
//! The editing model is an opaque collaborator: given an image path and an
//! instruction prompt it produces edited image bytes, or nothing when it
//! declines. This module owns the batch loop and the `{stem}_edited{ext}`
//! output naming.

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{PipelineError, list_input_files};

/// Opaque image-editing collaborator.
#[async_trait]
pub trait ImageEditModel: Send + Sync {
    /// Edits one image according to the prompt, or returns `None` when the
    /// model declines.
    ///
    /// # Errors
    ///
    /// Returns a description of the model failure; the batch loop logs it
    /// and moves on to the next image.
    async fn edit(&self, image_path: &Path, prompt: &str) -> Result<Option<Vec<u8>>, String>;
}

/// Derives the output name for an edited image: `{stem}_edited{ext}`.
///
/// A file without an extension gets the `_edited` suffix appended directly.
#[must_use]
pub fn edited_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_edited.{ext}"),
        None => format!("{file_name}_edited"),
    }
}

/// Edits every file in `input_dir` and writes the results into `output_dir`
/// under `{stem}_edited{ext}` names.
///
/// Per-image model failures are logged and skipped; the loop never aborts on
/// one image. Returns the number of edited images written.
///
/// # Errors
///
/// Returns [`PipelineError`] for the loop's own I/O: listing the input
/// directory, creating the output directory, or writing an edited image.
pub async fn edit_directory(
    model: &dyn ImageEditModel,
    input_dir: &Path,
    prompt: &str,
    output_dir: &Path,
) -> Result<usize, PipelineError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| PipelineError::io(output_dir, e))?;

    let image_paths = list_input_files(input_dir).await?;
    info!(
        images = image_paths.len(),
        prompt = %prompt,
        "starting image editing"
    );

    let mut written = 0usize;
    for image_path in &image_paths {
        let edited = match model.edit(image_path, prompt).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!(image = %image_path.display(), "model declined to edit image");
                continue;
            }
            Err(e) => {
                warn!(image = %image_path.display(), error = %e, "image editing failed");
                continue;
            }
        };

        let file_name = image_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image");
        let target = output_dir.join(edited_file_name(file_name));
        tokio::fs::write(&target, &edited)
            .await
            .map_err(|e| PipelineError::io(target.clone(), e))?;
        info!(path = %target.display(), "saved edited image");
        written += 1;
    }

    info!(written, total = image_paths.len(), "image editing complete");
    Ok(written)
}
