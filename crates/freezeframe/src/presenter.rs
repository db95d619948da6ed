//! Viewport presenter.
//!
//! Finds the camera behind the operator's focused viewport and opens a
//! floating viewport looking through a frozen camera.

use freezeframe_core::{
    DisplayFlags, DisplaySystem, FloatingSurfaceDesc, FreezeError, FreezeOptions, NodeId, Result,
    SurfaceId, SurfaceKind,
};

use crate::engine::FrozenCamera;
use crate::naming::{view_name, view_title};

/// The viewport an invocation was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveView {
    pub surface: SurfaceId,
    pub camera: NodeId,
}

/// Associates a frozen camera with the floating viewport showing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportBinding {
    pub frozen_camera: NodeId,
    pub surface: SurfaceId,
    pub surface_name: String,
    /// Display toggles copied from the source viewport.
    pub inherited_flags: DisplayFlags,
}

/// Returns the camera viewport under the operator's focus.
///
/// Fails with [`FreezeError::Focus`] when nothing is focused, when the focused
/// surface is not a model view, or when it has no camera.
pub fn active_camera<D>(display: &D) -> Result<ActiveView>
where
    D: DisplaySystem + ?Sized,
{
    let surface = display
        .focused_surface()
        .ok_or_else(|| FreezeError::Focus("no display surface has input focus".into()))?;

    match display.surface_kind(surface)? {
        SurfaceKind::ModelView => {}
        SurfaceKind::Other(kind) => {
            return Err(FreezeError::Focus(format!(
                "{surface} is a {kind} panel, not a camera viewport"
            )));
        }
    }

    let camera = display
        .surface_camera(surface)?
        .ok_or_else(|| FreezeError::Focus(format!("{surface} is not looking through a camera")))?;

    Ok(ActiveView { surface, camera })
}

/// Opens a floating viewport on `frozen`, styled like `source`.
///
/// A surface left over from an earlier freeze of the same camera at the same
/// frame is replaced.
pub fn present<D>(
    display: &mut D,
    source: SurfaceId,
    frozen: &FrozenCamera,
    options: &FreezeOptions,
) -> Result<ViewportBinding>
where
    D: DisplaySystem + ?Sized,
{
    let name = view_name(options, &frozen.source_name, frozen.frame);

    if let Some(existing) = display.find_surface(&name) {
        log::debug!("replacing existing view '{name}'");
        display.close_surface(existing)?;
    }

    let flags = display.display_flags(source).unwrap_or_else(|err| {
        log::warn!("could not read display settings of {source}, using defaults: {err}");
        DisplayFlags::default()
    });

    let (width, height) = options.window_size;
    let surface = display.open_floating_surface(FloatingSurfaceDesc {
        name: name.clone(),
        title: view_title(&name).to_string(),
        width,
        height,
        camera: frozen.node,
        flags,
    })?;

    Ok(ViewportBinding {
        frozen_camera: frozen.node,
        surface,
        surface_name: name,
        inherited_flags: flags,
    })
}
