//! Display-surface port.
//!
//! A display surface is an independently addressable 2D window onto the scene,
//! bound to one camera and carrying its own rendering-mode toggles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scene::NodeId;

/// Opaque handle to a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// The type of a display surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// A 3D viewport looking through a camera.
    ModelView,
    /// Any other panel (outliner, graph editor, ...).
    Other(String),
}

/// Shading mode of a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayAppearance {
    Wireframe,
    Points,
    BoundingBox,
    #[default]
    SmoothShaded,
    FlatShaded,
}

/// Per-viewport rendering toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    /// Shading mode.
    pub appearance: DisplayAppearance,
    /// Whether wireframe is drawn over shaded geometry.
    pub wireframe_on_shaded: bool,
    /// Whether textures are displayed.
    pub textures: bool,
    /// Whether the default material replaces assigned materials.
    pub use_default_material: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            appearance: DisplayAppearance::SmoothShaded,
            wireframe_on_shaded: false,
            textures: false,
            use_default_material: false,
        }
    }
}

/// Description of a floating window to open.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingSurfaceDesc {
    /// Unique window name.
    pub name: String,
    /// Window title.
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Camera the new viewport looks through.
    pub camera: NodeId,
    /// Rendering toggles of the new viewport.
    pub flags: DisplayFlags,
}

/// Window system of the host application.
pub trait DisplaySystem {
    /// Returns the surface under the operator's input focus, if any.
    fn focused_surface(&self) -> Option<SurfaceId>;

    fn surface_kind(&self, surface: SurfaceId) -> Result<SurfaceKind>;

    /// Returns the camera a model view looks through.
    fn surface_camera(&self, surface: SurfaceId) -> Result<Option<NodeId>>;

    fn display_flags(&self, surface: SurfaceId) -> Result<DisplayFlags>;

    fn find_surface(&self, name: &str) -> Option<SurfaceId>;

    fn close_surface(&mut self, surface: SurfaceId) -> Result<()>;

    /// Opens a floating window containing a model view.
    fn open_floating_surface(&mut self, desc: FloatingSurfaceDesc) -> Result<SurfaceId>;
}
