//! Initialization and lifecycle management for freezeframe.
//!
//! Initializing is optional: an uninitialized freezeframe freezes with
//! [`FreezeOptions::default`]. Calling [`init_with_options`] installs
//! studio-wide options once and hooks up logging.

use crate::{FreezeOptions, Result};

/// Initializes freezeframe with default options.
///
/// # Errors
///
/// Returns an error if freezeframe has already been initialized.
///
/// # Example
///
/// ```no_run
/// use freezeframe::*;
///
/// fn main() -> Result<()> {
///     init()?;
///     let mut host = MemoryHost::new();
///     // ... build or attach to a scene, then:
///     // freeze_active_view(&mut host)?;
///     shutdown();
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    init_with_options(FreezeOptions::default())
}

/// Initializes freezeframe with the given options.
///
/// Also installs an `env_logger` backend unless the host already set a logger.
pub fn init_with_options(options: FreezeOptions) -> Result<()> {
    let _ = env_logger::try_init();
    freezeframe_core::state::init_context(options)?;
    log::info!("freezeframe initialized");
    Ok(())
}

/// Returns whether freezeframe has been initialized.
#[must_use]
pub fn is_initialized() -> bool {
    freezeframe_core::state::is_initialized()
}

/// Drops the installed options and resets the freeze counter.
///
/// After calling this, [`init()`] may be called again.
pub fn shutdown() {
    freezeframe_core::state::shutdown_context();
    log::info!("freezeframe shut down");
}
