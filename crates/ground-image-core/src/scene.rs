//! Scene-graph capability exposed by the host to displays.

use std::fmt;

use glam::{Quat, Vec3};

use crate::error::Result;
use crate::geometry::ManualGeometry;
use crate::material::Material;

/// Handle to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Handle to a manual (hand-built geometry) object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// A retained scene graph of posed nodes carrying manual objects.
///
/// Node poses are relative to the parent node. A node is drawn only if it and
/// all of its ancestors are visible.
///
/// Setters on stale handles are ignored; creation and attachment report them.
pub trait SceneManager {
    /// The root node. Always exists.
    fn root_node(&self) -> NodeId;

    /// Creates a visible child of `parent` with identity pose.
    fn create_child_node(&mut self, parent: NodeId) -> Result<NodeId>;

    /// Removes `node` and its whole subtree. Attached objects are detached, not destroyed.
    fn destroy_node(&mut self, node: NodeId);

    fn set_node_position(&mut self, node: NodeId, position: Vec3);

    fn set_node_orientation(&mut self, node: NodeId, orientation: Quat);

    fn set_node_visible(&mut self, node: NodeId, visible: bool);

    /// Creates a manual object rendered with `material` and the given initial geometry.
    fn create_manual_object(
        &mut self,
        name: &str,
        material: Material,
        geometry: ManualGeometry,
    ) -> Result<ObjectId>;

    /// Replaces the geometry of `object`, keeping its material.
    fn update_manual_object(&mut self, object: ObjectId, geometry: ManualGeometry) -> Result<()>;

    /// Attaches `object` to `node`, detaching it from any previous node.
    fn attach_object(&mut self, node: NodeId, object: ObjectId) -> Result<()>;

    fn destroy_manual_object(&mut self, object: ObjectId);
}
