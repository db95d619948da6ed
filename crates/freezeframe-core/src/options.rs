//! Configuration options for freezeframe.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for a freeze invocation.
///
/// Missing fields take their defaults when deserializing, so a configuration
/// file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreezeOptions {
    /// Optical camera attributes captured in addition to the required core
    /// (transform, focal length, film aperture, clip planes, camera scale).
    /// Attributes the camera does not expose are skipped.
    pub camera_attributes: Vec<String>,

    /// Image-plane attributes copied onto each frozen image plane.
    pub image_plane_attributes: Vec<String>,

    /// Image-plane attributes locked after the copy.
    pub image_plane_lock_attributes: Vec<String>,

    /// Prefix of the duplicate camera's name.
    pub camera_prefix: String,

    /// Prefix of each frozen image plane's name.
    pub image_plane_prefix: String,

    /// Prefix of the floating window's name.
    pub view_prefix: String,

    /// Floating window size in pixels.
    pub window_size: (u32, u32),
}

impl Default for FreezeOptions {
    fn default() -> Self {
        Self {
            camera_attributes: strings(&[
                "lensSqueezeRatio",
                "filmFit",
                "filmFitOffset",
                "fStop",
                "focusDistance",
            ]),
            image_plane_attributes: strings(&[
                "displayMode",
                "imageName",
                "alphaGain",
                "depth",
                "offsetX",
                "offsetY",
                "sizeX",
                "sizeY",
                "fit",
                "useFrameExtension",
                "frameOffset",
            ]),
            image_plane_lock_attributes: strings(&[
                "frameExtension",
                "imageNumber",
                "useFrameExtension",
                "depth",
                "offsetX",
                "offsetY",
                "sizeX",
                "sizeY",
                "alphaGain",
                "fit",
                "displayMode",
            ]),
            camera_prefix: "frozenCam".to_string(),
            image_plane_prefix: "frozen".to_string(),
            view_prefix: "frozenView".to_string(),
            window_size: (800, 450),
        }
    }
}

impl FreezeOptions {
    /// Parses options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}
