//! Scene-graph port.
//!
//! The [`SceneGraph`] trait is the contract freezeframe expects from the host
//! application's node system: node creation and duplication, typed attribute
//! access with locking, and an explicit directed connection relation between
//! attribute plugs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::AttrValue;

/// Opaque handle to a scene-graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The type of a scene-graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A viewable projection with transform and optical attributes.
    Camera,
    /// A background picture or picture sequence attached to a camera.
    ImagePlane,
    /// The global timeline node.
    Time,
    /// Any other host node type.
    Other(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::ImagePlane => f.write_str("imagePlane"),
            Self::Time => f.write_str("time"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// One attribute of one node, the endpoint of a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plug {
    pub node: NodeId,
    pub attribute: String,
}

impl Plug {
    pub fn new(node: NodeId, attribute: impl Into<String>) -> Self {
        Self {
            node,
            attribute: attribute.into(),
        }
    }

    /// Returns the plug for element `index` of array attribute `attribute`.
    pub fn element(node: NodeId, attribute: &str, index: usize) -> Self {
        Self::new(node, format!("{attribute}[{index}]"))
    }

    /// Splits an array element plug into its base attribute and index.
    #[must_use]
    pub fn array_index(&self) -> Option<(&str, usize)> {
        let (base, rest) = self.attribute.split_once('[')?;
        let index = rest.strip_suffix(']')?.parse().ok()?;
        Some((base, index))
    }
}

impl fmt::Display for Plug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.attribute)
    }
}

/// A directed attribute-to-attribute link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub source: Plug,
    pub destination: Plug,
}

impl Connection {
    pub fn new(source: Plug, destination: Plug) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Node system of the host application.
///
/// Every destination plug has at most one incoming connection; reading a
/// connected attribute yields the evaluated value of its source.
pub trait SceneGraph {
    /// Creates a structural copy of `node`: same kind, same attribute values,
    /// same incoming connections. Locks are not copied.
    fn duplicate_node(&mut self, node: NodeId, name: &str) -> Result<NodeId>;

    /// Deletes `node` and every connection touching it.
    fn delete_node(&mut self, node: NodeId) -> Result<()>;

    fn node_kind(&self, node: NodeId) -> Result<NodeKind>;

    fn node_name(&self, node: NodeId) -> Result<String>;

    fn find_node(&self, name: &str) -> Option<NodeId>;

    fn has_attribute(&self, node: NodeId, attribute: &str) -> bool;

    /// Reads the evaluated value of an attribute.
    fn get_attribute(&self, node: NodeId, attribute: &str) -> Result<AttrValue>;

    /// Writes an attribute value.
    ///
    /// Fails when the attribute is locked, driven by a connection, or of a
    /// different type.
    fn set_attribute(&mut self, node: NodeId, attribute: &str, value: AttrValue) -> Result<()>;

    fn lock_attribute(&mut self, node: NodeId, attribute: &str) -> Result<()>;

    fn is_locked(&self, node: NodeId, attribute: &str) -> Result<bool>;

    fn connect(&mut self, source: &Plug, destination: &Plug) -> Result<()>;

    fn disconnect(&mut self, source: &Plug, destination: &Plug) -> Result<()>;

    /// Returns the connections whose destination is on `node`.
    fn connections_into(&self, node: NodeId) -> Result<Vec<Connection>>;

    /// Returns the connections whose source is on `node`.
    fn connections_from(&self, node: NodeId) -> Result<Vec<Connection>>;

    /// Returns the plug driving `destination`, if any.
    fn source_of(&self, destination: &Plug) -> Result<Option<Plug>> {
        Ok(self
            .connections_into(destination.node)?
            .into_iter()
            .find(|c| c.destination == *destination)
            .map(|c| c.source))
    }

    /// Returns a readable `name.attribute` label for a plug.
    fn plug_label(&self, plug: &Plug) -> String {
        match self.node_name(plug.node) {
            Ok(name) => format!("{name}.{}", plug.attribute),
            Err(_) => plug.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_index() {
        let plug = Plug::element(NodeId(3), "imagePlane", 2);
        assert_eq!(plug.attribute, "imagePlane[2]");
        assert_eq!(plug.array_index(), Some(("imagePlane", 2)));
        assert_eq!(Plug::new(NodeId(3), "focalLength").array_index(), None);
        assert_eq!(Plug::new(NodeId(3), "broken[x]").array_index(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Plug::new(NodeId(7), "outTime").to_string(), "#7.outTime");
        assert_eq!(NodeKind::ImagePlane.to_string(), "imagePlane");
    }
}
