//! Global state management for freezeframe.

use std::sync::{OnceLock, RwLock};

use crate::error::{FreezeError, Result};
use crate::options::FreezeOptions;

/// Global context singleton.
static CONTEXT: OnceLock<RwLock<Context>> = OnceLock::new();

/// The global context holding session-wide configuration.
#[derive(Debug, Default)]
pub struct Context {
    /// Whether freezeframe has been initialized.
    pub initialized: bool,

    /// Options used by invocations that do not pass their own.
    pub options: FreezeOptions,

    /// Number of successful freezes in this session.
    pub freeze_count: u64,
}

/// Initializes the global context with `options`.
///
/// This should be called once at the start of the program.
pub fn init_context(options: FreezeOptions) -> Result<()> {
    let context = RwLock::new(Context {
        initialized: true,
        options,
        freeze_count: 0,
    });

    let Err(rejected) = CONTEXT.set(context) else {
        return Ok(());
    };

    // The cell outlives shutdown; reinitialize it in place.
    let lock = CONTEXT.get().ok_or(FreezeError::NotInitialized)?;
    let mut guard = lock.write().map_err(|_| FreezeError::NotInitialized)?;
    if guard.initialized {
        return Err(FreezeError::AlreadyInitialized);
    }
    *guard = rejected
        .into_inner()
        .map_err(|_| FreezeError::NotInitialized)?;
    Ok(())
}

/// Returns whether the context has been initialized.
pub fn is_initialized() -> bool {
    CONTEXT
        .get()
        .and_then(|lock| lock.read().ok())
        .is_some_and(|ctx| ctx.initialized)
}

/// Try to access the global context for reading.
///
/// Returns `None` if freezeframe has not been initialized.
pub fn try_with_context<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Context) -> R,
{
    let lock = CONTEXT.get()?;
    let guard = lock.read().ok()?;
    guard.initialized.then(|| f(&guard))
}

/// Try to access the global context for writing.
///
/// Returns `None` if freezeframe has not been initialized.
pub fn try_with_context_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Context) -> R,
{
    let lock = CONTEXT.get()?;
    let mut guard = lock.write().ok()?;
    if guard.initialized {
        Some(f(&mut guard))
    } else {
        None
    }
}

/// Returns the session options, or the defaults when uninitialized.
pub fn current_options() -> FreezeOptions {
    try_with_context(|ctx| ctx.options.clone()).unwrap_or_default()
}

/// Shuts down the global context.
pub fn shutdown_context() {
    if let Some(lock) = CONTEXT.get() {
        if let Ok(mut ctx) = lock.write() {
            ctx.initialized = false;
            ctx.freeze_count = 0;
        }
    }
}
