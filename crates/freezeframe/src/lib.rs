//! freezeframe: freeze a live scene camera into a static reference view.
//!
//! Invoked on the viewport the operator is looking through, freezeframe
//! duplicates that viewport's camera at the current frame, locks the copy,
//! re-creates every image plane attached to it with sequences pinned to the
//! captured frame, and opens a floating window looking through the copy. The
//! live camera, its image planes and the timeline keep working as before.
//!
//! # Quick Start
//!
//! ```no_run
//! use freezeframe::*;
//!
//! fn main() -> Result<()> {
//!     init()?;
//!
//!     let mut host = MemoryHost::new();
//!     let cam = host.camera("camA");
//!     host.image_sequence(cam, "plates/plate.####.png")?;
//!     let view = host.model_view("modelPanel4", cam);
//!     host.set_focus(Some(view));
//!     host.set_current_frame(24.0);
//!
//!     let frozen = freeze_active_view(&mut host)?;
//!     println!("{}", frozen.report);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The host application is reached only through the ports in
//! [`freezeframe_core`]: a [`SceneGraph`], a [`Timeline`] and a
//! [`DisplaySystem`]. One invocation runs these steps in order:
//!
//! - [`active_camera`] finds the focused camera viewport
//! - [`CapturedFrame::capture`] reads the timeline exactly once
//! - [`freeze_camera`] snapshots, duplicates, locks and re-creates image planes
//! - [`present`] opens the floating viewport

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod init;

pub mod engine;
pub mod naming;
pub mod presenter;
pub mod report;
pub mod resolver;
pub mod snapshot;

pub use freezeframe_core::{
    current_options, AttrValue, CapturedFrame, Connection, DisplayAppearance, DisplayFlags,
    DisplaySystem, ErrorKind, FloatingSurfaceDesc, FreezeError, FreezeOptions, Host, MemoryHost,
    NodeId, NodeKind, Plug, Result, SceneGraph, SurfaceId, SurfaceKind, SurfaceRecord, Timeline,
    Vec3,
};

pub use engine::{freeze_camera, FreezeOutcome, FrozenCamera, FrozenImageReference};
pub use init::{init, init_with_options, is_initialized, shutdown};
pub use presenter::{active_camera, present, ActiveView, ViewportBinding};
pub use report::{FreezeReport, SkippedImageReference};
pub use resolver::{resolve_image_references, ImageReference};
pub use snapshot::CameraState;

/// Everything one invocation produced.
#[derive(Debug)]
pub struct FrozenView {
    pub camera: FrozenCamera,
    pub binding: ViewportBinding,
    pub report: FreezeReport,
}

/// Freezes the focused viewport's camera using the session options.
///
/// Uses the options installed by [`init_with_options`], or the defaults when
/// freezeframe was never initialized.
pub fn freeze_active_view<H>(host: &mut H) -> Result<FrozenView>
where
    H: Host + ?Sized,
{
    freeze_active_view_with(host, &current_options())
}

/// Freezes the focused viewport's camera using `options`.
///
/// Fails without touching the scene when no camera viewport is focused or the
/// camera cannot be read. Image references that cannot be frozen are listed in
/// the returned report instead of failing the call.
pub fn freeze_active_view_with<H>(host: &mut H, options: &FreezeOptions) -> Result<FrozenView>
where
    H: Host + ?Sized,
{
    let view = active_camera(&*host)?;
    let frame = CapturedFrame::capture(&*host);
    log::debug!("freezing {} through {} at frame {frame}", view.camera, view.surface);

    let FreezeOutcome { camera, report } = freeze_camera(host, view.camera, frame, options)?;
    let binding = present(host, view.surface, &camera, options)?;

    if report.is_complete() {
        log::info!("{report}");
    } else {
        log::warn!("{report}");
    }
    freezeframe_core::try_with_context_mut(|ctx| ctx.freeze_count += 1);

    Ok(FrozenView {
        camera,
        binding,
        report,
    })
}
