//! Freeze engine.
//!
//! Duplicates a live camera into a locked, static copy and re-creates each of
//! its image planes detached from the global timeline. The timeline position is
//! captured once by the caller and passed in as a [`CapturedFrame`]; every image
//! plane of one freeze is pinned to that same value.
//!
//! Camera attributes and image references are independent units of work. A
//! failure while freezing the camera's own attributes removes the duplicate and
//! aborts; a failure on one image reference removes only that image plane and
//! is recorded in the [`FreezeReport`].

use freezeframe_core::{
    AttrValue, CapturedFrame, FreezeOptions, NodeId, Plug, Result, SceneGraph,
};

use crate::naming::{frozen_camera_name, frozen_image_plane_name};
use crate::report::{FreezeReport, SkippedImageReference};
use crate::resolver::{resolve_image_references, ImageReference, IMAGE_PLANE_SLOT};
use crate::snapshot::{CameraState, TRANSFORM_ATTRIBUTES};

/// Attribute selecting the displayed frame of an image sequence.
pub const FRAME_EXTENSION: &str = "frameExtension";

/// A static duplicate of a camera.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenCamera {
    pub node: NodeId,
    pub name: String,
    /// The live camera this was frozen from.
    pub source: NodeId,
    pub source_name: String,
    /// The instant every attribute and image plane was frozen at.
    pub frame: CapturedFrame,
    pub image_references: Vec<FrozenImageReference>,
}

/// A detached copy of one image plane, bound to a [`FrozenCamera`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenImageReference {
    pub node: NodeId,
    pub name: String,
    /// The live image plane this was copied from.
    pub source: NodeId,
    /// The frame a sequence was pinned to; `None` for static images.
    pub pinned_frame: Option<f64>,
}

/// Output of [`freeze_camera`].
#[derive(Debug)]
pub struct FreezeOutcome {
    pub camera: FrozenCamera,
    pub report: FreezeReport,
}

/// Freezes `camera` at `frame`.
///
/// Nothing is written to the graph until the snapshot and image references have
/// been read, so resolution failures leave the scene untouched.
pub fn freeze_camera<G>(
    graph: &mut G,
    camera: NodeId,
    frame: CapturedFrame,
    options: &FreezeOptions,
) -> Result<FreezeOutcome>
where
    G: SceneGraph + ?Sized,
{
    let state = CameraState::capture(&*graph, camera, options)?;
    let references = resolve_image_references(&*graph, camera)?;
    let source_name = graph.node_name(camera)?;

    let duplicate =
        graph.duplicate_node(camera, &frozen_camera_name(options, &source_name, frame))?;
    if let Err(err) = lock_camera(graph, duplicate, &state) {
        log::warn!("freezing attributes of '{source_name}' failed, removing duplicate: {err}");
        if let Err(cleanup) = graph.delete_node(duplicate) {
            log::warn!("could not remove incomplete duplicate: {cleanup}");
        }
        return Err(err);
    }
    let name = graph.node_name(duplicate)?;

    let mut image_references = Vec::new();
    let mut skipped = Vec::new();
    for reference in references {
        let reference = match reference {
            Ok(reference) => reference,
            Err(err) => {
                let entry = SkippedImageReference::from_error(err, "image plane");
                log::warn!("skipping image reference: {}", entry.error);
                skipped.push(entry);
                continue;
            }
        };
        let slot = image_references.len();
        match freeze_image_reference(graph, duplicate, slot, &reference, frame, options) {
            Ok(frozen) => image_references.push(frozen),
            Err(err) => {
                let entry = SkippedImageReference::from_error(err, &reference.name);
                log::warn!("skipping image reference: {}", entry.error);
                skipped.push(entry);
            }
        }
    }

    let report = FreezeReport {
        source: source_name.clone(),
        camera: name.clone(),
        frame,
        frozen: image_references.iter().map(|r| r.name.clone()).collect(),
        skipped,
    };

    Ok(FreezeOutcome {
        camera: FrozenCamera {
            node: duplicate,
            name,
            source: camera,
            source_name,
            frame,
            image_references,
        },
        report,
    })
}

/// Severs every input of `node`, keeping the value each input delivered.
///
/// Returns the attributes whose evaluated value was written back. Message and
/// array element links carry no value and are only disconnected.
fn sever_inputs<G>(graph: &mut G, node: NodeId) -> Result<Vec<String>>
where
    G: SceneGraph + ?Sized,
{
    let mut restored = Vec::new();
    for connection in graph.connections_into(node)? {
        let destination = &connection.destination;
        let value = graph.get_attribute(node, &destination.attribute)?;
        log::debug!(
            "disconnecting {} -> {}",
            graph.plug_label(&connection.source),
            graph.plug_label(destination)
        );
        graph.disconnect(&connection.source, destination)?;
        if value != AttrValue::Message && destination.array_index().is_none() {
            graph.set_attribute(node, &destination.attribute, value)?;
            restored.push(destination.attribute.clone());
        }
    }
    Ok(restored)
}

fn lock_if_unlocked<G>(graph: &mut G, node: NodeId, attribute: &str) -> Result<()>
where
    G: SceneGraph + ?Sized,
{
    if !graph.is_locked(node, attribute)? {
        graph.lock_attribute(node, attribute)?;
    }
    Ok(())
}

fn set_and_lock<G>(graph: &mut G, node: NodeId, attribute: &str, value: AttrValue) -> Result<()>
where
    G: SceneGraph + ?Sized,
{
    graph.set_attribute(node, attribute, value)?;
    graph.lock_attribute(node, attribute)
}

/// Cuts the duplicate loose from everything upstream, writes the snapshot and
/// locks every written attribute, including values that were driven.
fn lock_camera<G>(graph: &mut G, camera: NodeId, state: &CameraState) -> Result<()>
where
    G: SceneGraph + ?Sized,
{
    let restored = sever_inputs(graph, camera)?;
    for (attribute, value) in state.attributes() {
        set_and_lock(graph, camera, attribute, value)?;
    }
    for attribute in &restored {
        lock_if_unlocked(graph, camera, attribute)?;
    }
    Ok(())
}

fn freeze_image_reference<G>(
    graph: &mut G,
    camera: NodeId,
    slot: usize,
    reference: &ImageReference,
    frame: CapturedFrame,
    options: &FreezeOptions,
) -> Result<FrozenImageReference>
where
    G: SceneGraph + ?Sized,
{
    // Read the evaluated source values before anything is written.
    let mut values = Vec::new();
    for attribute in &options.image_plane_attributes {
        if graph.has_attribute(reference.node, attribute) {
            values.push((attribute.as_str(), graph.get_attribute(reference.node, attribute)?));
        }
    }

    let plane = graph.duplicate_node(
        reference.node,
        &frozen_image_plane_name(options, &reference.name),
    )?;
    match pin_image_plane(graph, camera, slot, plane, reference, &values, frame, options) {
        Ok(pinned_frame) => Ok(FrozenImageReference {
            node: plane,
            name: graph.node_name(plane)?,
            source: reference.node,
            pinned_frame,
        }),
        Err(err) => {
            if let Err(cleanup) = graph.delete_node(plane) {
                log::warn!("could not remove partial copy of '{}': {cleanup}", reference.name);
            }
            Err(err)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn pin_image_plane<G>(
    graph: &mut G,
    camera: NodeId,
    slot: usize,
    plane: NodeId,
    reference: &ImageReference,
    values: &[(&str, AttrValue)],
    frame: CapturedFrame,
    options: &FreezeOptions,
) -> Result<Option<f64>>
where
    G: SceneGraph + ?Sized,
{
    let frame_plug = Plug::new(plane, FRAME_EXTENSION);
    match graph.source_of(&frame_plug)? {
        Some(driver) if reference.is_sequence => log::debug!(
            "detaching '{}' from {}",
            reference.name,
            graph.plug_label(&driver)
        ),
        None if reference.is_sequence => {
            log::info!("'{}' is not driven by the timeline, pinning as is", reference.name);
        }
        _ => {}
    }
    let restored = sever_inputs(graph, plane)?;

    for (attribute, value) in values {
        graph.set_attribute(plane, attribute, value.clone())?;
    }

    let pinned_frame = if reference.is_sequence {
        set_and_lock(graph, plane, FRAME_EXTENSION, AttrValue::Float(frame.value()))?;
        Some(frame.value())
    } else {
        None
    };

    graph.connect(
        &Plug::new(plane, "message"),
        &Plug::element(camera, IMAGE_PLANE_SLOT, slot),
    )?;

    let written = values.iter().map(|(attribute, _)| *attribute);
    let lockable = TRANSFORM_ATTRIBUTES
        .iter()
        .copied()
        .chain(written)
        .chain(restored.iter().map(String::as_str))
        .chain(options.image_plane_lock_attributes.iter().map(String::as_str));
    for attribute in lockable {
        if graph.has_attribute(plane, attribute) {
            lock_if_unlocked(graph, plane, attribute)?;
        }
    }

    Ok(pinned_frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use freezeframe_core::{ErrorKind, FreezeError, MemoryHost, Timeline, Vec3};

    fn freeze(host: &mut MemoryHost, camera: NodeId) -> FreezeOutcome {
        let frame = CapturedFrame::capture(&*host);
        freeze_camera(host, camera, frame, &FreezeOptions::default()).unwrap()
    }

    #[test]
    fn test_duplicate_is_locked() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.set_attribute(cam, "translate", Vec3::new(0.0, 5.0, 10.0).into())
            .unwrap();
        host.set_current_frame(24.0);

        let outcome = freeze(&mut host, cam);
        let frozen = outcome.camera;
        assert_eq!(frozen.name, "frozenCam_camA_24");
        assert_eq!(
            host.get_attribute(frozen.node, "translate").unwrap(),
            AttrValue::Vec3(Vec3::new(0.0, 5.0, 10.0))
        );
        for attribute in ["translate", "rotate", "scale", "focalLength", "fStop"] {
            assert!(host.is_locked(frozen.node, attribute).unwrap(), "{attribute}");
        }

        let err = host
            .set_attribute(frozen.node, "focalLength", AttrValue::Float(85.0))
            .unwrap_err();
        assert!(matches!(err, FreezeError::AttributeLocked { .. }));
    }

    #[test]
    fn test_drivers_are_severed() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.connect(
            &Plug::new(host.time_node(), "outTime"),
            &Plug::new(cam, "focalLength"),
        )
        .unwrap();
        host.set_current_frame(30.0);

        let frozen = freeze(&mut host, cam).camera;
        host.set_current_frame(90.0);

        assert_eq!(host.get_attribute(cam, "focalLength").unwrap(), AttrValue::Float(90.0));
        assert_eq!(
            host.get_attribute(frozen.node, "focalLength").unwrap(),
            AttrValue::Float(30.0)
        );
        assert!(host.connections_into(frozen.node).unwrap().iter().all(|c| {
            c.destination.array_index().is_some_and(|(base, _)| base == IMAGE_PLANE_SLOT)
        }));
    }

    #[test]
    fn test_sequence_is_pinned() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        let seq = host.image_sequence(cam, "plate.0001.png").unwrap();
        host.set_current_frame(24.0);

        let outcome = freeze(&mut host, cam);
        let frozen = &outcome.camera.image_references[0];
        assert_eq!(frozen.source, seq);
        assert_eq!(frozen.pinned_frame, Some(24.0));
        assert_eq!(frozen.name, "frozen_imagePlane");

        host.set_current_frame(50.0);
        assert_eq!(
            host.get_attribute(frozen.node, FRAME_EXTENSION).unwrap(),
            AttrValue::Float(24.0)
        );
        assert_eq!(
            host.get_attribute(seq, FRAME_EXTENSION).unwrap(),
            AttrValue::Float(50.0)
        );
        assert!(host.is_locked(frozen.node, FRAME_EXTENSION).unwrap());
        assert!(host.is_locked(frozen.node, "translate").unwrap());
    }

    #[test]
    fn test_frozen_plane_is_rebound() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        let live = host.image_plane(cam, "bg.png").unwrap();

        let frozen = freeze(&mut host, cam).camera;
        let plane = frozen.image_references[0].node;

        let targets: Vec<Plug> = host
            .connections_from(plane)
            .unwrap()
            .into_iter()
            .map(|c| c.destination)
            .collect();
        assert_eq!(targets, vec![Plug::element(frozen.node, IMAGE_PLANE_SLOT, 0)]);

        // The live plane stays bound to the live camera only.
        let live_targets: Vec<Plug> = host
            .connections_from(live)
            .unwrap()
            .into_iter()
            .map(|c| c.destination)
            .collect();
        assert_eq!(live_targets, vec![Plug::element(cam, IMAGE_PLANE_SLOT, 0)]);
    }

    #[test]
    fn test_resolution_failure_leaves_scene_untouched() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.remove_attribute(cam, "focalLength").unwrap();
        let count = host.node_count();

        let err = freeze_camera(&mut host, cam, CapturedFrame::new(1.0), &FreezeOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert_eq!(host.node_count(), count);
    }

    #[test]
    fn test_unreadable_plane_is_skipped() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camB");
        host.image_plane(cam, "good.png").unwrap();
        let bad = host.image_sequence(cam, "bad.####.png").unwrap();
        host.remove_attribute(bad, FRAME_EXTENSION).unwrap();

        let outcome = freeze(&mut host, cam);
        assert_eq!(outcome.camera.image_references.len(), 1);
        assert_eq!(outcome.report.skipped.len(), 1);
        assert_eq!(outcome.report.skipped[0].name, host.node_name(bad).unwrap());
        assert_eq!(outcome.report.skipped[0].error.kind(), ErrorKind::ImageReference);
    }

    #[test]
    fn test_copied_plane_attributes_are_locked() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.image_sequence(cam, "plate.####.png").unwrap();
        host.set_current_frame(24.0);

        let plane = freeze(&mut host, cam).camera.image_references[0].node;
        for (attribute, value) in [
            ("imageName", AttrValue::from("other.####.png")),
            ("frameOffset", AttrValue::Int(26)),
        ] {
            let err = host.set_attribute(plane, attribute, value).unwrap_err();
            assert!(matches!(err, FreezeError::AttributeLocked { .. }), "{attribute}");
        }
        assert_eq!(
            host.get_attribute(plane, "imageName").unwrap(),
            AttrValue::from("plate.####.png")
        );
    }

    #[test]
    fn test_pinned_frame_locked_without_lock_list() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.image_sequence(cam, "plate.####.png").unwrap();
        host.set_current_frame(24.0);
        let options =
            FreezeOptions::from_json_str(r#"{ "image_plane_lock_attributes": ["depth"] }"#).unwrap();

        let outcome = freeze_camera(&mut host, cam, CapturedFrame::new(24.0), &options).unwrap();
        let plane = outcome.camera.image_references[0].node;
        let err = host
            .set_attribute(plane, FRAME_EXTENSION, AttrValue::Float(50.0))
            .unwrap_err();
        assert!(matches!(err, FreezeError::AttributeLocked { .. }));
        assert_eq!(
            host.get_attribute(plane, FRAME_EXTENSION).unwrap(),
            AttrValue::Float(24.0)
        );
    }

    #[test]
    fn test_driven_values_outside_snapshot_are_kept() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.add_attribute(cam, "horizontalFilmOffset", AttrValue::Float(0.0))
            .unwrap();
        host.connect(
            &Plug::new(host.time_node(), "outTime"),
            &Plug::new(cam, "horizontalFilmOffset"),
        )
        .unwrap();
        host.set_current_frame(24.0);

        let frozen = freeze(&mut host, cam).camera;
        host.set_current_frame(60.0);

        assert_eq!(
            host.get_attribute(frozen.node, "horizontalFilmOffset").unwrap(),
            AttrValue::Float(24.0)
        );
        assert!(host.is_locked(frozen.node, "horizontalFilmOffset").unwrap());
        assert_eq!(
            host.get_attribute(cam, "horizontalFilmOffset").unwrap(),
            AttrValue::Float(60.0)
        );
    }
}
