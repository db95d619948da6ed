//! In-memory host.
//!
//! [`MemoryHost`] implements every host port without an external application:
//! a node table with typed, lockable attributes, a connection list evaluated on
//! read, a global timeline node and a set of display surfaces. It mirrors the
//! default attribute sets of a typical DCC camera and image plane so that the
//! freeze logic can run headless in tests and demos.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::display::{DisplayFlags, DisplaySystem, FloatingSurfaceDesc, SurfaceId, SurfaceKind};
use crate::error::{FreezeError, Result};
use crate::scene::{Connection, NodeId, NodeKind, Plug, SceneGraph};
use crate::timeline::Timeline;
use crate::value::AttrValue;

/// Name of the timeline node every host starts with.
pub const TIME_NODE: &str = "time1";

/// Output attribute of the timeline node.
pub const TIME_OUTPUT: &str = "outTime";

/// Connections are followed at most this many hops when evaluating.
const MAX_EVAL_DEPTH: usize = 64;

#[derive(Debug, Clone)]
struct Attribute {
    value: AttrValue,
    locked: bool,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: String,
    attributes: BTreeMap<String, Attribute>,
}

/// A display surface known to a [`MemoryHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub name: String,
    pub title: String,
    pub kind: SurfaceKind,
    pub camera: Option<NodeId>,
    pub flags: DisplayFlags,
    /// Window size, for floating surfaces.
    pub size: Option<(u32, u32)>,
}

impl SurfaceRecord {
    /// Returns whether this surface lives in its own floating window.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.size.is_some()
    }
}

/// A complete host living in memory.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    nodes: BTreeMap<NodeId, Node>,
    connections: Vec<Connection>,
    next_node: u64,
    time_node: NodeId,
    surfaces: BTreeMap<SurfaceId, SurfaceRecord>,
    next_surface: u64,
    focus: Option<SurfaceId>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Creates a host containing only the timeline node, at frame 1.
    pub fn new() -> Self {
        let mut host = Self {
            nodes: BTreeMap::new(),
            connections: Vec::new(),
            next_node: 0,
            time_node: NodeId(0),
            surfaces: BTreeMap::new(),
            next_surface: 0,
            focus: None,
        };
        host.time_node = host.insert_node(NodeKind::Time, TIME_NODE);
        host.set_current_frame(1.0);
        host
    }

    /// Returns the timeline node.
    #[must_use]
    pub fn time_node(&self) -> NodeId {
        self.time_node
    }

    /// Returns the number of live nodes, including the timeline node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns every connection in the scene.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Creates a camera with default attributes.
    pub fn camera(&mut self, name: &str) -> NodeId {
        self.insert_node(NodeKind::Camera, name)
    }

    /// Creates a static image plane showing `image_name` and attaches it to
    /// `camera` at the next free slot.
    pub fn image_plane(&mut self, camera: NodeId, image_name: &str) -> Result<NodeId> {
        let plane = self.insert_node(NodeKind::ImagePlane, "imagePlane");
        self.set_attribute(plane, "imageName", image_name.into())?;
        let slot = self.next_free_slot(camera, "imagePlane")?;
        self.connect(
            &Plug::new(plane, "message"),
            &Plug::element(camera, "imagePlane", slot),
        )?;
        Ok(plane)
    }

    /// Creates an image plane whose frame is driven by the global timeline and
    /// attaches it to `camera`.
    pub fn image_sequence(&mut self, camera: NodeId, image_name: &str) -> Result<NodeId> {
        let plane = self.image_plane(camera, image_name)?;
        self.set_attribute(plane, "useFrameExtension", true.into())?;
        self.connect(
            &Plug::new(self.time_node, TIME_OUTPUT),
            &Plug::new(plane, "frameExtension"),
        )?;
        Ok(plane)
    }

    /// Adds (or replaces) an attribute on `node`.
    pub fn add_attribute(&mut self, node: NodeId, attribute: &str, value: AttrValue) -> Result<()> {
        let entry = self.node_mut(node)?;
        entry
            .attributes
            .insert(attribute.to_string(), Attribute { value, locked: false });
        Ok(())
    }

    /// Removes an attribute from `node` along with its connections.
    pub fn remove_attribute(&mut self, node: NodeId, attribute: &str) -> Result<()> {
        let entry = self.node_mut(node)?;
        if entry.attributes.remove(attribute).is_none() {
            return Err(self.missing_attribute(node, attribute));
        }
        self.connections.retain(|c| {
            let touches_source = c.source.node == node && base_name(&c.source.attribute) == attribute;
            let touches_destination =
                c.destination.node == node && base_name(&c.destination.attribute) == attribute;
            !(touches_source || touches_destination)
        });
        Ok(())
    }

    /// Adds a model view looking through `camera`.
    pub fn model_view(&mut self, name: &str, camera: NodeId) -> SurfaceId {
        self.insert_surface(SurfaceRecord {
            name: name.to_string(),
            title: name.to_string(),
            kind: SurfaceKind::ModelView,
            camera: Some(camera),
            flags: DisplayFlags::default(),
            size: None,
        })
    }

    /// Adds a panel that is not a camera view.
    pub fn panel(&mut self, name: &str, kind: &str) -> SurfaceId {
        self.insert_surface(SurfaceRecord {
            name: name.to_string(),
            title: name.to_string(),
            kind: SurfaceKind::Other(kind.to_string()),
            camera: None,
            flags: DisplayFlags::default(),
            size: None,
        })
    }

    /// Moves the operator's input focus.
    pub fn set_focus(&mut self, surface: Option<SurfaceId>) {
        self.focus = surface;
    }

    pub fn set_display_flags(&mut self, surface: SurfaceId, flags: DisplayFlags) -> Result<()> {
        self.surface_mut(surface)?.flags = flags;
        Ok(())
    }

    #[must_use]
    pub fn surface(&self, surface: SurfaceId) -> Option<&SurfaceRecord> {
        self.surfaces.get(&surface)
    }

    /// Returns every open surface.
    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceId, &SurfaceRecord)> {
        self.surfaces.iter().map(|(id, s)| (*id, s))
    }

    fn insert_node(&mut self, kind: NodeKind, name: &str) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        let name = self.unique_name(if name.is_empty() {
            default_name(&kind)
        } else {
            name
        });
        let attributes = default_attributes(&kind)
            .into_iter()
            .map(|(attr, value)| (attr.to_string(), Attribute { value, locked: false }))
            .collect();
        self.nodes.insert(
            id,
            Node {
                kind,
                name,
                attributes,
            },
        );
        id
    }

    fn insert_surface(&mut self, record: SurfaceRecord) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(id, record);
        id
    }

    /// Returns `name`, or `name` followed by the smallest free number.
    fn unique_name(&self, name: &str) -> String {
        if self.find_node(name).is_none() {
            return name.to_string();
        }
        (1u64..)
            .map(|n| format!("{name}{n}"))
            .find(|candidate| self.find_node(candidate).is_none())
            .unwrap_or_else(|| name.to_string())
    }

    fn next_free_slot(&self, node: NodeId, array: &str) -> Result<usize> {
        Ok(self
            .connections_into(node)?
            .iter()
            .filter_map(|c| c.destination.array_index())
            .filter(|(base, _)| *base == array)
            .map(|(_, index)| index + 1)
            .max()
            .unwrap_or(0))
    }

    fn node(&self, node: NodeId) -> Result<&Node> {
        self.nodes
            .get(&node)
            .ok_or_else(|| FreezeError::NodeNotFound(node.to_string()))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&node)
            .ok_or_else(|| FreezeError::NodeNotFound(node.to_string()))
    }

    fn surface_mut(&mut self, surface: SurfaceId) -> Result<&mut SurfaceRecord> {
        self.surfaces
            .get_mut(&surface)
            .ok_or_else(|| FreezeError::SurfaceNotFound(surface.to_string()))
    }

    fn surface_ref(&self, surface: SurfaceId) -> Result<&SurfaceRecord> {
        self.surfaces
            .get(&surface)
            .ok_or_else(|| FreezeError::SurfaceNotFound(surface.to_string()))
    }

    /// Looks up an attribute, accepting `name[i]` for array attributes.
    fn attribute(&self, node: NodeId, attribute: &str) -> Result<&Attribute> {
        let entry = self.node(node)?;
        entry
            .attributes
            .get(attribute)
            .or_else(|| entry.attributes.get(base_name(attribute)))
            .ok_or_else(|| self.missing_attribute(node, attribute))
    }

    fn missing_attribute(&self, node: NodeId, attribute: &str) -> FreezeError {
        FreezeError::AttributeNotFound {
            node: self.display_name(node),
            attribute: attribute.to_string(),
        }
    }

    fn display_name(&self, node: NodeId) -> String {
        self.nodes
            .get(&node)
            .map_or_else(|| node.to_string(), |n| n.name.clone())
    }

    fn evaluate(&self, node: NodeId, attribute: &str, depth: usize) -> Result<AttrValue> {
        let stored = &self.attribute(node, attribute)?.value;
        if depth >= MAX_EVAL_DEPTH {
            return Ok(stored.clone());
        }
        let destination = Plug::new(node, attribute);
        let Some(source) = self
            .connections
            .iter()
            .find(|c| c.destination == destination)
            .map(|c| c.source.clone())
        else {
            return Ok(stored.clone());
        };
        let upstream = self.evaluate(source.node, &source.attribute, depth + 1)?;
        Ok(stored.coerce(upstream.clone()).unwrap_or(upstream))
    }
}

impl SceneGraph for MemoryHost {
    fn duplicate_node(&mut self, node: NodeId, name: &str) -> Result<NodeId> {
        let original = self.node(node)?.clone();
        let id = NodeId(self.next_node);
        self.next_node += 1;
        let name = self.unique_name(if name.is_empty() { &original.name } else { name });
        let attributes = original
            .attributes
            .into_iter()
            .map(|(attr, a)| {
                (
                    attr,
                    Attribute {
                        value: a.value,
                        locked: false,
                    },
                )
            })
            .collect();
        self.nodes.insert(
            id,
            Node {
                kind: original.kind,
                name,
                attributes,
            },
        );

        let inputs: Vec<Connection> = self
            .connections
            .iter()
            .filter(|c| c.destination.node == node)
            .map(|c| Connection::new(c.source.clone(), Plug::new(id, c.destination.attribute.clone())))
            .collect();
        self.connections.extend(inputs);

        log::debug!(
            "duplicated '{}' as '{}'",
            self.display_name(node),
            self.display_name(id)
        );
        Ok(id)
    }

    fn delete_node(&mut self, node: NodeId) -> Result<()> {
        let removed = self
            .nodes
            .remove(&node)
            .ok_or_else(|| FreezeError::NodeNotFound(node.to_string()))?;
        self.connections
            .retain(|c| c.source.node != node && c.destination.node != node);
        for surface in self.surfaces.values_mut() {
            if surface.camera == Some(node) {
                surface.camera = None;
            }
        }
        log::debug!("deleted node '{}'", removed.name);
        Ok(())
    }

    fn node_kind(&self, node: NodeId) -> Result<NodeKind> {
        Ok(self.node(node)?.kind.clone())
    }

    fn node_name(&self, node: NodeId) -> Result<String> {
        Ok(self.node(node)?.name.clone())
    }

    fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name == name)
            .map(|(id, _)| *id)
    }

    fn has_attribute(&self, node: NodeId, attribute: &str) -> bool {
        self.attribute(node, attribute).is_ok()
    }

    fn get_attribute(&self, node: NodeId, attribute: &str) -> Result<AttrValue> {
        self.evaluate(node, attribute, 0)
    }

    fn set_attribute(&mut self, node: NodeId, attribute: &str, value: AttrValue) -> Result<()> {
        let destination = Plug::new(node, attribute);
        if let Some(source) = self.source_of(&destination)? {
            return Err(FreezeError::AttributeConnected {
                node: self.display_name(node),
                attribute: attribute.to_string(),
                source_plug: self.plug_label(&source),
            });
        }

        let node_name = self.display_name(node);
        let missing = self.missing_attribute(node, attribute);
        let entry = self
            .node_mut(node)?
            .attributes
            .get_mut(attribute)
            .ok_or(missing)?;
        if entry.locked {
            return Err(FreezeError::AttributeLocked {
                node: node_name,
                attribute: attribute.to_string(),
            });
        }
        let expected = entry.value.type_name();
        let actual = value.type_name();
        let coerced = match entry.value {
            AttrValue::Message => None,
            ref current => current.coerce(value),
        };
        match coerced {
            Some(value) => {
                entry.value = value;
                Ok(())
            }
            None => Err(FreezeError::TypeMismatch {
                node: node_name,
                attribute: attribute.to_string(),
                expected,
                actual,
            }),
        }
    }

    fn lock_attribute(&mut self, node: NodeId, attribute: &str) -> Result<()> {
        let missing = self.missing_attribute(node, attribute);
        self.node_mut(node)?
            .attributes
            .get_mut(attribute)
            .ok_or(missing)?
            .locked = true;
        Ok(())
    }

    fn is_locked(&self, node: NodeId, attribute: &str) -> Result<bool> {
        Ok(self.attribute(node, attribute)?.locked)
    }

    fn connect(&mut self, source: &Plug, destination: &Plug) -> Result<()> {
        self.attribute(source.node, &source.attribute)?;
        if self.attribute(destination.node, &destination.attribute)?.locked {
            return Err(FreezeError::AttributeLocked {
                node: self.display_name(destination.node),
                attribute: destination.attribute.clone(),
            });
        }
        if let Some(existing) = self.source_of(destination)? {
            return Err(FreezeError::ConnectionExists {
                source_plug: self.plug_label(&existing),
                destination: self.plug_label(destination),
            });
        }
        self.connections
            .push(Connection::new(source.clone(), destination.clone()));
        Ok(())
    }

    fn disconnect(&mut self, source: &Plug, destination: &Plug) -> Result<()> {
        let position = self
            .connections
            .iter()
            .position(|c| c.source == *source && c.destination == *destination)
            .ok_or_else(|| FreezeError::ConnectionNotFound {
                source_plug: self.plug_label(source),
                destination: self.plug_label(destination),
            })?;
        self.connections.remove(position);
        Ok(())
    }

    fn connections_into(&self, node: NodeId) -> Result<Vec<Connection>> {
        self.node(node)?;
        Ok(self
            .connections
            .iter()
            .filter(|c| c.destination.node == node)
            .cloned()
            .collect())
    }

    fn connections_from(&self, node: NodeId) -> Result<Vec<Connection>> {
        self.node(node)?;
        Ok(self
            .connections
            .iter()
            .filter(|c| c.source.node == node)
            .cloned()
            .collect())
    }
}

impl Timeline for MemoryHost {
    fn current_frame(&self) -> f64 {
        self.nodes
            .get(&self.time_node)
            .and_then(|n| n.attributes.get(TIME_OUTPUT))
            .and_then(|a| a.value.as_float())
            .unwrap_or_default()
    }

    fn set_current_frame(&mut self, frame: f64) {
        let time_node = self.time_node;
        if let Some(node) = self.nodes.get_mut(&time_node) {
            node.attributes.insert(
                TIME_OUTPUT.to_string(),
                Attribute {
                    value: AttrValue::Float(frame),
                    locked: false,
                },
            );
        }
    }
}

impl DisplaySystem for MemoryHost {
    fn focused_surface(&self) -> Option<SurfaceId> {
        self.focus.filter(|id| self.surfaces.contains_key(id))
    }

    fn surface_kind(&self, surface: SurfaceId) -> Result<SurfaceKind> {
        Ok(self.surface_ref(surface)?.kind.clone())
    }

    fn surface_camera(&self, surface: SurfaceId) -> Result<Option<NodeId>> {
        Ok(self.surface_ref(surface)?.camera)
    }

    fn display_flags(&self, surface: SurfaceId) -> Result<DisplayFlags> {
        Ok(self.surface_ref(surface)?.flags)
    }

    fn find_surface(&self, name: &str) -> Option<SurfaceId> {
        self.surfaces
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(id, _)| *id)
    }

    fn close_surface(&mut self, surface: SurfaceId) -> Result<()> {
        self.surfaces
            .remove(&surface)
            .ok_or_else(|| FreezeError::SurfaceNotFound(surface.to_string()))?;
        if self.focus == Some(surface) {
            self.focus = None;
        }
        Ok(())
    }

    fn open_floating_surface(&mut self, desc: FloatingSurfaceDesc) -> Result<SurfaceId> {
        self.node(desc.camera)?;
        Ok(self.insert_surface(SurfaceRecord {
            name: desc.name,
            title: desc.title,
            kind: SurfaceKind::ModelView,
            camera: Some(desc.camera),
            flags: desc.flags,
            size: Some((desc.width, desc.height)),
        }))
    }
}

/// Strips an array index: `imagePlane[2]` becomes `imagePlane`.
fn base_name(attribute: &str) -> &str {
    attribute.split_once('[').map_or(attribute, |(base, _)| base)
}

fn default_name(kind: &NodeKind) -> &str {
    match kind {
        NodeKind::Camera => "camera",
        NodeKind::ImagePlane => "imagePlane",
        NodeKind::Time => TIME_NODE,
        NodeKind::Other(name) => name,
    }
}

fn transform_attributes() -> Vec<(&'static str, AttrValue)> {
    vec![
        ("translate", Vec3::ZERO.into()),
        ("rotate", Vec3::ZERO.into()),
        ("scale", Vec3::ONE.into()),
    ]
}

fn default_attributes(kind: &NodeKind) -> Vec<(&'static str, AttrValue)> {
    match kind {
        NodeKind::Camera => {
            let mut attrs = transform_attributes();
            attrs.extend([
                ("focalLength", AttrValue::Float(35.0)),
                ("horizontalFilmAperture", AttrValue::Float(1.417)),
                ("verticalFilmAperture", AttrValue::Float(0.945)),
                ("lensSqueezeRatio", AttrValue::Float(1.0)),
                ("cameraScale", AttrValue::Float(1.0)),
                ("filmFit", AttrValue::Int(1)),
                ("filmFitOffset", AttrValue::Float(0.0)),
                ("nearClipPlane", AttrValue::Float(0.1)),
                ("farClipPlane", AttrValue::Float(10000.0)),
                ("fStop", AttrValue::Float(5.6)),
                ("focusDistance", AttrValue::Float(5.0)),
                ("imagePlane", AttrValue::Message),
            ]);
            attrs
        }
        NodeKind::ImagePlane => {
            let mut attrs = transform_attributes();
            attrs.extend([
                ("message", AttrValue::Message),
                ("displayMode", AttrValue::Int(3)),
                ("imageName", AttrValue::String(String::new())),
                ("alphaGain", AttrValue::Float(1.0)),
                ("depth", AttrValue::Float(100.0)),
                ("offsetX", AttrValue::Float(0.0)),
                ("offsetY", AttrValue::Float(0.0)),
                ("sizeX", AttrValue::Float(1.417)),
                ("sizeY", AttrValue::Float(0.945)),
                ("fit", AttrValue::Int(1)),
                ("useFrameExtension", AttrValue::Bool(false)),
                ("frameExtension", AttrValue::Float(1.0)),
                ("frameOffset", AttrValue::Int(0)),
                ("imageNumber", AttrValue::Int(0)),
            ]);
            attrs
        }
        NodeKind::Time => vec![(TIME_OUTPUT, AttrValue::Float(1.0))],
        NodeKind::Other(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names() {
        let mut host = MemoryHost::new();
        let a = host.camera("cam");
        let b = host.camera("cam");
        let c = host.camera("cam");
        assert_eq!(host.node_name(a).unwrap(), "cam");
        assert_eq!(host.node_name(b).unwrap(), "cam1");
        assert_eq!(host.node_name(c).unwrap(), "cam2");
    }

    #[test]
    fn test_sequence_follows_timeline() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let plane = host.image_sequence(cam, "plate.0001.png").unwrap();

        host.set_current_frame(12.0);
        assert_eq!(
            host.get_attribute(plane, "frameExtension").unwrap(),
            AttrValue::Float(12.0)
        );
        host.set_current_frame(40.0);
        assert_eq!(
            host.get_attribute(plane, "frameExtension").unwrap(),
            AttrValue::Float(40.0)
        );
    }

    #[test]
    fn test_image_planes_take_successive_slots() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let first = host.image_plane(cam, "a.png").unwrap();
        let second = host.image_plane(cam, "b.png").unwrap();

        let inputs = host.connections_into(cam).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].source, Plug::new(first, "message"));
        assert_eq!(inputs[0].destination.attribute, "imagePlane[0]");
        assert_eq!(inputs[1].source, Plug::new(second, "message"));
        assert_eq!(inputs[1].destination.attribute, "imagePlane[1]");
    }

    #[test]
    fn test_locked_attribute_rejects_edits() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        host.lock_attribute(cam, "focalLength").unwrap();

        let err = host
            .set_attribute(cam, "focalLength", AttrValue::Float(50.0))
            .unwrap_err();
        assert!(matches!(err, FreezeError::AttributeLocked { .. }));
        assert!(host.is_locked(cam, "focalLength").unwrap());
    }

    #[test]
    fn test_connected_attribute_rejects_edits() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let plane = host.image_sequence(cam, "plate.0001.png").unwrap();

        let err = host
            .set_attribute(plane, "frameExtension", AttrValue::Float(3.0))
            .unwrap_err();
        assert!(matches!(err, FreezeError::AttributeConnected { .. }));
    }

    #[test]
    fn test_type_mismatch() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let err = host
            .set_attribute(cam, "focalLength", "long".into())
            .unwrap_err();
        assert!(matches!(
            err,
            FreezeError::TypeMismatch {
                expected: "float",
                actual: "string",
                ..
            }
        ));
        host.set_attribute(cam, "focalLength", AttrValue::Int(50))
            .unwrap();
        assert_eq!(
            host.get_attribute(cam, "focalLength").unwrap(),
            AttrValue::Float(50.0)
        );
    }

    #[test]
    fn test_duplicate_copies_inputs_not_locks() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let plane = host.image_plane(cam, "a.png").unwrap();
        host.set_attribute(cam, "focalLength", AttrValue::Float(85.0))
            .unwrap();
        host.lock_attribute(cam, "focalLength").unwrap();

        let copy = host.duplicate_node(cam, "copy").unwrap();
        assert_eq!(host.node_kind(copy).unwrap(), NodeKind::Camera);
        assert_eq!(
            host.get_attribute(copy, "focalLength").unwrap(),
            AttrValue::Float(85.0)
        );
        assert!(!host.is_locked(copy, "focalLength").unwrap());
        assert_eq!(
            host.source_of(&Plug::new(copy, "imagePlane[0]")).unwrap(),
            Some(Plug::new(plane, "message"))
        );
    }

    #[test]
    fn test_connect_rejects_second_driver() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let plane = host.image_sequence(cam, "plate.0001.png").unwrap();
        let other = host.camera("other");

        let err = host
            .connect(
                &Plug::new(other, "focalLength"),
                &Plug::new(plane, "frameExtension"),
            )
            .unwrap_err();
        assert!(matches!(err, FreezeError::ConnectionExists { .. }));
    }

    #[test]
    fn test_disconnect_missing() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let err = host
            .disconnect(
                &Plug::new(host.time_node(), TIME_OUTPUT),
                &Plug::new(cam, "focalLength"),
            )
            .unwrap_err();
        assert!(matches!(err, FreezeError::ConnectionNotFound { .. }));
    }

    #[test]
    fn test_delete_drops_connections_and_unbinds_views() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let view = host.model_view("modelPanel4", cam);
        host.image_plane(cam, "a.png").unwrap();

        host.delete_node(cam).unwrap();
        assert!(host.connections().is_empty());
        assert_eq!(host.surface_camera(view).unwrap(), None);
        assert!(matches!(
            host.node_name(cam),
            Err(FreezeError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_floating_surface() {
        let mut host = MemoryHost::new();
        let cam = host.camera("cam");
        let id = host
            .open_floating_surface(FloatingSurfaceDesc {
                name: "win".into(),
                title: "title".into(),
                width: 320,
                height: 200,
                camera: cam,
                flags: DisplayFlags::default(),
            })
            .unwrap();
        assert_eq!(host.find_surface("win"), Some(id));
        assert!(host.surface(id).unwrap().is_floating());

        host.close_surface(id).unwrap();
        assert_eq!(host.find_surface("win"), None);
    }
}
