//! Lifecycle integration tests for freezeframe.
//!
//! Note: freezeframe keeps its session options in global state backed by a
//! OnceLock, so everything touching init/shutdown runs in a single test
//! function.

use freezeframe::*;

/// Main integration test that runs all lifecycle checks in sequence.
#[test]
fn test_basics() {
    // Uninitialized sessions freeze with the defaults.
    assert!(!is_initialized());
    assert_eq!(current_options(), FreezeOptions::default());

    init().expect("init failed");
    assert!(is_initialized());

    // Test 1: double init is rejected
    {
        let err = init().unwrap_err();
        assert!(matches!(err, FreezeError::AlreadyInitialized));
    }

    // Test 2: successful freezes are counted
    {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        let view = host.model_view("modelPanel4", cam);
        host.set_focus(Some(view));

        freeze_active_view(&mut host).expect("freeze failed");
        host.set_current_frame(2.0);
        freeze_active_view(&mut host).expect("freeze failed");

        let count = freezeframe_core::try_with_context(|ctx| ctx.freeze_count);
        assert_eq!(count, Some(2));
    }

    // Test 3: failed freezes are not counted
    {
        let mut host = MemoryHost::new();
        assert!(freeze_active_view(&mut host).is_err());
        let count = freezeframe_core::try_with_context(|ctx| ctx.freeze_count);
        assert_eq!(count, Some(2));
    }

    shutdown();
    assert!(!is_initialized());
    assert!(freezeframe_core::try_with_context(|ctx| ctx.freeze_count).is_none());

    // Test 4: reinitializing installs new session options
    {
        let options = FreezeOptions {
            camera_prefix: "still".into(),
            ..FreezeOptions::default()
        };
        init_with_options(options).expect("reinit failed");
        assert!(is_initialized());

        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        let view = host.model_view("modelPanel4", cam);
        host.set_focus(Some(view));
        host.set_current_frame(9.0);

        let frozen = freeze_active_view(&mut host).expect("freeze failed");
        assert_eq!(frozen.camera.name, "still_camA_9");
    }

    shutdown();
    assert!(!is_initialized());
}
