//! Deterministic names for frozen nodes and views.

use freezeframe_core::{CapturedFrame, FreezeOptions};

/// Reduces a node path to a name fragment: the last `|` component with
/// namespace separators replaced.
#[must_use]
pub fn short_name(path: &str) -> String {
    path.rsplit('|').next().unwrap_or(path).replace(':', "_")
}

/// Name of the duplicate camera, e.g. `frozenCam_camA_24`.
#[must_use]
pub fn frozen_camera_name(options: &FreezeOptions, camera: &str, frame: CapturedFrame) -> String {
    format!("{}_{}_{}", options.camera_prefix, short_name(camera), frame.whole())
}

/// Name of a frozen image plane, e.g. `frozen_imagePlane1`.
#[must_use]
pub fn frozen_image_plane_name(options: &FreezeOptions, plane: &str) -> String {
    format!("{}_{}", options.image_plane_prefix, short_name(plane))
}

/// Name of the floating window, e.g. `frozenView_camA_24_win`.
#[must_use]
pub fn view_name(options: &FreezeOptions, camera: &str, frame: CapturedFrame) -> String {
    format!("{}_{}_{}_win", options.view_prefix, short_name(camera), frame.whole())
}

/// Window title: the view name without its `_win` suffix.
#[must_use]
pub fn view_title(view_name: &str) -> &str {
    view_name.strip_suffix("_win").unwrap_or(view_name)
}
