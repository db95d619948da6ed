//! Image reference discovery and classification.
//!
//! An image plane is attached to a camera by wiring its `message` plug into one
//! of the camera's `imagePlane[i]` slots. A plane is *sequence-driven* when its
//! `useFrameExtension` toggle is on: its `frameExtension` (normally fed by the
//! global timeline) then selects which file of the sequence is displayed.

use freezeframe_core::{FreezeError, NodeId, NodeKind, Plug, Result, SceneGraph};

/// Camera array attribute holding image-plane links.
pub const IMAGE_PLANE_SLOT: &str = "imagePlane";

/// One background-image binding of a camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReference {
    pub node: NodeId,
    pub name: String,
    /// Camera slot the plane is wired into.
    pub slot: usize,
    /// Resource path as authored, possibly a sequence pattern.
    pub source_path: String,
    /// Whether the displayed resource depends on the frame extension.
    pub is_sequence: bool,
    pub frame_offset: f64,
    /// Evaluated frame extension, for sequences.
    pub current_resolved_frame: Option<f64>,
    /// Plug currently driving the frame extension, usually the timeline.
    pub time_driver: Option<Plug>,
}

impl ImageReference {
    /// Returns the resource this reference displays right now.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn displayed_resource(&self) -> String {
        match self.current_resolved_frame {
            Some(frame) if self.is_sequence => {
                substitute_frame(&self.source_path, (frame + self.frame_offset).trunc() as i64)
            }
            _ => self.source_path.clone(),
        }
    }

    /// Returns whether the displayed frame follows another plug.
    #[must_use]
    pub fn is_time_driven(&self) -> bool {
        self.is_sequence && self.time_driver.is_some()
    }
}

/// Enumerates the image planes attached to `camera`, in slot order.
///
/// Never mutates the graph. A camera without image planes yields an empty list.
/// Each entry is resolved independently so that one malformed plane does not
/// hide the others; per-entry failures are [`FreezeError::ImageReference`].
pub fn resolve_image_references<G>(graph: &G, camera: NodeId) -> Result<Vec<Result<ImageReference>>>
where
    G: SceneGraph + ?Sized,
{
    let mut links: Vec<(usize, Plug)> = graph
        .connections_into(camera)?
        .into_iter()
        .filter_map(|c| {
            let (base, index) = c.destination.array_index()?;
            (base == IMAGE_PLANE_SLOT && c.source.attribute == "message").then_some((index, c.source))
        })
        .collect();
    links.sort_by_key(|(index, _)| *index);

    log::debug!(
        "camera '{}' has {} image plane link(s)",
        graph.plug_label(&Plug::new(camera, IMAGE_PLANE_SLOT)),
        links.len()
    );

    Ok(links
        .into_iter()
        .map(|(slot, source)| {
            resolve_one(graph, source.node, slot).map_err(|err| {
                let label = graph
                    .node_name(source.node)
                    .unwrap_or_else(|_| source.node.to_string());
                err.into_image_reference(&label)
            })
        })
        .collect())
}

fn resolve_one<G>(graph: &G, node: NodeId, slot: usize) -> Result<ImageReference>
where
    G: SceneGraph + ?Sized,
{
    let name = graph.node_name(node)?;
    let fail = |reason: String| FreezeError::ImageReference {
        name: name.clone(),
        reason,
    };

    let kind = graph.node_kind(node)?;
    if kind != NodeKind::ImagePlane {
        return Err(fail(format!("linked node is a {kind}, not an image plane")));
    }

    let source_path = graph
        .get_attribute(node, "imageName")
        .map_err(|err| fail(err.to_string()))?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| fail("'imageName' is not a string".to_string()))?;

    let is_sequence = if graph.has_attribute(node, "useFrameExtension") {
        graph
            .get_attribute(node, "useFrameExtension")?
            .as_bool()
            .unwrap_or(false)
    } else {
        false
    };

    let frame_offset = if graph.has_attribute(node, "frameOffset") {
        graph
            .get_attribute(node, "frameOffset")?
            .as_float()
            .unwrap_or_default()
    } else {
        0.0
    };

    let (current_resolved_frame, time_driver) = if is_sequence {
        let frame = graph
            .get_attribute(node, "frameExtension")
            .map_err(|err| fail(err.to_string()))?
            .as_float()
            .ok_or_else(|| fail("'frameExtension' is not numeric".to_string()))?;
        let driver = graph.source_of(&Plug::new(node, "frameExtension"))?;
        (Some(frame), driver)
    } else {
        (None, None)
    };

    Ok(ImageReference {
        node,
        name,
        slot,
        source_path,
        is_sequence,
        frame_offset,
        current_resolved_frame,
        time_driver,
    })
}

/// Writes `frame` into the frame-number field of a sequence path.
///
/// The field is the last run of `#` in the file stem, or failing that its last
/// run of digits; the run's width sets the zero padding. A stem without either
/// gets `.<frame>` appended.
#[must_use]
pub fn substitute_frame(path: &str, frame: i64) -> String {
    let file_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let stem_end = path[file_start..]
        .rfind('.')
        .filter(|&i| i > 0)
        .map_or(path.len(), |i| file_start + i);
    let stem = &path[file_start..stem_end];

    let field = last_run(stem, |c| c == '#').or_else(|| last_run(stem, |c| c.is_ascii_digit()));
    match field {
        Some((start, end)) => {
            let width = end - start;
            format!(
                "{}{frame:0width$}{}",
                &path[..file_start + start],
                &path[file_start + end..]
            )
        }
        None => format!("{}.{frame}{}", &path[..stem_end], &path[stem_end..]),
    }
}

/// Byte range of the last run of characters matching `pred`.
fn last_run(s: &str, pred: impl Fn(char) -> bool) -> Option<(usize, usize)> {
    let end = s.char_indices().rev().find(|(_, c)| pred(*c)).map(|(i, c)| i + c.len_utf8())?;
    let start = s[..end]
        .char_indices()
        .rev()
        .take_while(|(_, c)| pred(*c))
        .last()
        .map_or(end, |(i, _)| i);
    Some((start, end))
}
