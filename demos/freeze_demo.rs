//! Demo freezing a shot camera with a plate sequence and a static lineup image.
//!
//! Builds a small scene in the in-memory host, freezes the focused view at
//! frame 24, then scrubs the timeline to show that the frozen view stays put.
//!
//! Run with `RUST_LOG=debug` to see every step the freeze takes.

use freezeframe::*;

fn main() -> Result<()> {
    init()?;

    let mut host = MemoryHost::new();
    let cam = host.camera("shotCam");
    host.set_attribute(cam, "translate", Vec3::new(0.0, 1.6, 12.0).into())?;
    host.set_attribute(cam, "focalLength", AttrValue::Float(50.0))?;
    host.image_sequence(cam, "plates/sh010_bg.####.exr")?;
    host.image_plane(cam, "ref/lineup.jpg")?;

    let view = host.model_view("modelPanel4", cam);
    host.set_focus(Some(view));
    host.set_current_frame(24.0);

    let frozen = freeze_active_view(&mut host)?;
    println!("{}", frozen.report);
    println!(
        "opened '{}' looking through '{}'",
        frozen.binding.surface_name, frozen.camera.name
    );

    for frame in [36.0, 48.0] {
        host.set_current_frame(frame);
        let live = describe(&host, cam)?;
        let pinned = describe(&host, frozen.camera.node)?;
        println!("frame {frame}: live plate shows {live}, frozen plate shows {pinned}");
    }

    if let Err(err) = host.set_attribute(frozen.camera.node, "focalLength", AttrValue::Float(85.0))
    {
        println!("frozen camera rejected an edit: {err}");
    }

    shutdown();
    Ok(())
}

/// Returns the file the first image plane of `camera` displays right now.
fn describe(host: &MemoryHost, camera: NodeId) -> Result<String> {
    let mut references = resolve_image_references(host, camera)?.into_iter();
    match references.next() {
        Some(reference) => Ok(reference?.displayed_resource()),
        None => Ok("nothing".to_string()),
    }
}
