//! Human-readable outcome of a freeze.

use std::fmt;

use freezeframe_core::{CapturedFrame, FreezeError};

/// An image reference left out of a frozen camera.
#[derive(Debug)]
pub struct SkippedImageReference {
    /// Name of the source image plane.
    pub name: String,
    pub error: FreezeError,
}

impl SkippedImageReference {
    /// Builds an entry from an image-reference error, falling back to
    /// `fallback` when the error does not name the plane.
    pub fn from_error(error: FreezeError, fallback: &str) -> Self {
        let error = error.into_image_reference(fallback);
        let name = match &error {
            FreezeError::ImageReference { name, .. } => name.clone(),
            _ => fallback.to_string(),
        };
        Self { name, error }
    }
}

/// Aggregated result of one freeze: the camera freeze succeeded, and each
/// image reference either froze or was skipped.
#[derive(Debug)]
pub struct FreezeReport {
    /// Name of the live camera.
    pub source: String,
    /// Name of the frozen duplicate.
    pub camera: String,
    pub frame: CapturedFrame,
    /// Names of the frozen image planes.
    pub frozen: Vec<String>,
    pub skipped: Vec<SkippedImageReference>,
}

impl FreezeReport {
    /// Returns whether every image reference was frozen.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for FreezeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "froze '{}' as '{}' at frame {}: {} image reference(s) frozen",
            self.source,
            self.camera,
            self.frame,
            self.frozen.len()
        )?;
        if self.skipped.is_empty() {
            return Ok(());
        }
        write!(f, ", {} skipped (", self.skipped.len())?;
        for (i, skipped) in self.skipped.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", skipped.error)?;
        }
        f.write_str(")")
    }
}
