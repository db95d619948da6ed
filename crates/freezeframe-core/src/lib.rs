//! Core abstractions for freezeframe.
//!
//! This crate provides the host model the freeze logic runs against:
//! - [`SceneGraph`] port for nodes, typed lockable attributes and connections
//! - [`Timeline`] port and the [`CapturedFrame`] threaded through a freeze
//! - [`DisplaySystem`] port for viewports and floating windows
//! - [`MemoryHost`], a complete in-memory host
//! - Configuration options and global state management

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod display;
pub mod error;
pub mod memory;
pub mod options;
pub mod scene;
pub mod state;
pub mod timeline;
pub mod value;

pub use display::{
    DisplayAppearance, DisplayFlags, DisplaySystem, FloatingSurfaceDesc, SurfaceId, SurfaceKind,
};
pub use error::{ErrorKind, FreezeError, Result};
pub use memory::{MemoryHost, SurfaceRecord, TIME_NODE, TIME_OUTPUT};
pub use options::FreezeOptions;
pub use scene::{Connection, NodeId, NodeKind, Plug, SceneGraph};
pub use state::{current_options, try_with_context, try_with_context_mut, Context};
pub use timeline::{CapturedFrame, Timeline};
pub use value::AttrValue;

/// Everything a host application provides to freezeframe.
pub trait Host: SceneGraph + Timeline + DisplaySystem {}

impl<T: SceneGraph + Timeline + DisplaySystem> Host for T {}

// Re-export glam types for convenience
pub use glam::Vec3;
