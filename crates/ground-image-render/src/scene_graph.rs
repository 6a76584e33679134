//! In-memory retained scene graph.
//!
//! Holds node poses, visibility and manual objects exactly as a renderer would
//! consume them. Drawing walks [`SceneGraph::visible_objects`].

use std::collections::HashMap;

use glam::{Quat, Vec3};
use ground_image_core::error::{GroundImageError, Result};
use ground_image_core::geometry::ManualGeometry;
use ground_image_core::material::Material;
use ground_image_core::scene::{NodeId, ObjectId, SceneManager};
use ground_image_core::transform::Pose;

/// A posed node in the scene tree.
#[derive(Debug, Clone)]
pub struct SceneNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Vec3,
    orientation: Quat,
    visible: bool,
    objects: Vec<ObjectId>,
}

impl SceneNode {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            visible: true,
            objects: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Position relative to the parent.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Orientation relative to the parent.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// The node's own visibility flag, ignoring ancestors.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    fn local_pose(&self) -> Pose {
        Pose::new(self.position, self.orientation)
    }
}

/// Hand-built geometry with its material.
#[derive(Debug, Clone)]
pub struct ManualObject {
    name: String,
    material: Material,
    geometry: ManualGeometry,
    attached_to: Option<NodeId>,
    revision: u64,
}

impl ManualObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn geometry(&self) -> &ManualGeometry {
        &self.geometry
    }

    pub fn attached_to(&self) -> Option<NodeId> {
        self.attached_to
    }

    /// Number of geometry replacements since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// A retained scene graph implementing [`SceneManager`].
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, SceneNode>,
    objects: HashMap<ObjectId, ManualObject>,
    root: NodeId,
    next_node: u32,
    next_object: u32,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates a scene containing only the root node.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, SceneNode::new(None));
        Self {
            nodes,
            objects: HashMap::new(),
            root,
            next_node: 1,
            next_object: 0,
        }
    }

    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&node)
    }

    pub fn object(&self, object: ObjectId) -> Option<&ManualObject> {
        self.objects.get(&object)
    }

    /// Looks up a manual object by name.
    pub fn object_by_name(&self, name: &str) -> Option<(ObjectId, &ManualObject)> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, o)| (*id, o))
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// True if `node` and all its ancestors are visible.
    pub fn is_effectively_visible(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            match self.nodes.get(&id) {
                Some(n) if n.visible => current = n.parent,
                _ => return false,
            }
        }
        true
    }

    /// Pose of `node` relative to the root.
    pub fn world_pose(&self, node: NodeId) -> Option<Pose> {
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.nodes.get(&id)?;
            chain.push(n.local_pose());
            current = n.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Pose::identity(), |acc, local| acc.compose(local)),
        )
    }

    /// Objects that would be drawn this frame, with their world poses.
    pub fn visible_objects(&self) -> Vec<(ObjectId, Pose)> {
        let mut out: Vec<(ObjectId, Pose)> = self
            .objects
            .iter()
            .filter_map(|(id, object)| {
                let node = object.attached_to?;
                if !self.is_effectively_visible(node) {
                    return None;
                }
                Some((*id, self.world_pose(node)?))
            })
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut SceneNode> {
        let found = self.nodes.get_mut(&node);
        if found.is_none() {
            log::warn!("ignoring update of missing scene {node}");
        }
        found
    }

    fn detach(&mut self, object: ObjectId) {
        let previous = self
            .objects
            .get_mut(&object)
            .and_then(|o| o.attached_to.take());
        if let Some(node) = previous.and_then(|n| self.nodes.get_mut(&n)) {
            node.objects.retain(|o| *o != object);
        }
    }
}

impl SceneManager for SceneGraph {
    fn root_node(&self) -> NodeId {
        self.root
    }

    fn create_child_node(&mut self, parent: NodeId) -> Result<NodeId> {
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(GroundImageError::NodeNotFound(parent.0))?;
        let id = NodeId(self.next_node);
        self.next_node += 1;
        parent_node.children.push(id);
        self.nodes.insert(id, SceneNode::new(Some(parent)));
        Ok(id)
    }

    fn destroy_node(&mut self, node: NodeId) {
        if node == self.root {
            log::warn!("refusing to destroy the scene root");
            return;
        }
        let Some(removed) = self.nodes.remove(&node) else {
            return;
        };
        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        for object in &removed.objects {
            if let Some(o) = self.objects.get_mut(object) {
                o.attached_to = None;
            }
        }
        for child in removed.children {
            self.destroy_node(child);
        }
    }

    fn set_node_position(&mut self, node: NodeId, position: Vec3) {
        if let Some(n) = self.node_mut(node) {
            n.position = position;
        }
    }

    fn set_node_orientation(&mut self, node: NodeId, orientation: Quat) {
        if let Some(n) = self.node_mut(node) {
            n.orientation = orientation;
        }
    }

    fn set_node_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.node_mut(node) {
            n.visible = visible;
        }
    }

    fn create_manual_object(
        &mut self,
        name: &str,
        material: Material,
        geometry: ManualGeometry,
    ) -> Result<ObjectId> {
        if self.object_by_name(name).is_some() {
            return Err(GroundImageError::ObjectNameExists(name.to_string()));
        }
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        self.objects.insert(
            id,
            ManualObject {
                name: name.to_string(),
                material,
                geometry,
                attached_to: None,
                revision: 0,
            },
        );
        Ok(id)
    }

    fn update_manual_object(&mut self, object: ObjectId, geometry: ManualGeometry) -> Result<()> {
        let o = self
            .objects
            .get_mut(&object)
            .ok_or(GroundImageError::ObjectNotFound(object.0))?;
        o.geometry = geometry;
        o.revision += 1;
        Ok(())
    }

    fn attach_object(&mut self, node: NodeId, object: ObjectId) -> Result<()> {
        if !self.nodes.contains_key(&node) {
            return Err(GroundImageError::NodeNotFound(node.0));
        }
        if !self.objects.contains_key(&object) {
            return Err(GroundImageError::ObjectNotFound(object.0));
        }
        self.detach(object);
        if let Some(o) = self.objects.get_mut(&object) {
            o.attached_to = Some(node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.objects.push(object);
        }
        Ok(())
    }

    fn destroy_manual_object(&mut self, object: ObjectId) {
        self.detach(object);
        self.objects.remove(&object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_object(scene: &mut SceneGraph, name: &str) -> ObjectId {
        scene
            .create_manual_object(
                name,
                Material::ground_image(name, "tex"),
                ManualGeometry::ground_quad(1.0, 1.0),
            )
            .unwrap()
    }

    #[test]
    fn test_visibility_follows_ancestors() {
        let mut scene = SceneGraph::new();
        let anchor = scene.create_child_node(scene.root_node()).unwrap();
        let child = scene.create_child_node(anchor).unwrap();
        let object = quad_object(&mut scene, "quad");
        scene.attach_object(child, object).unwrap();

        assert!(scene.is_effectively_visible(child));
        assert_eq!(scene.visible_objects().len(), 1);

        scene.set_node_visible(anchor, false);
        assert!(!scene.is_effectively_visible(child));
        assert!(scene.node(child).unwrap().is_visible());
        assert!(scene.visible_objects().is_empty());
    }

    #[test]
    fn test_world_pose_composes_parents() {
        let mut scene = SceneGraph::new();
        let anchor = scene.create_child_node(scene.root_node()).unwrap();
        let child = scene.create_child_node(anchor).unwrap();

        scene.set_node_position(anchor, Vec3::new(1.0, 0.0, 0.0));
        scene.set_node_orientation(anchor, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        scene.set_node_position(child, Vec3::new(1.0, 0.0, 0.0));

        let pose = scene.world_pose(child).unwrap();
        assert!((pose.position - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_destroy_node_removes_subtree_and_detaches() {
        let mut scene = SceneGraph::new();
        let anchor = scene.create_child_node(scene.root_node()).unwrap();
        let child = scene.create_child_node(anchor).unwrap();
        let object = quad_object(&mut scene, "quad");
        scene.attach_object(child, object).unwrap();

        scene.destroy_node(anchor);
        assert_eq!(scene.node_count(), 1);
        assert!(scene.node(child).is_none());
        assert_eq!(scene.object(object).unwrap().attached_to(), None);

        scene.destroy_manual_object(object);
        assert_eq!(scene.object_count(), 0);

        // Root is never destroyed.
        scene.destroy_node(scene.root_node());
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_object_names_are_unique() {
        let mut scene = SceneGraph::new();
        quad_object(&mut scene, "quad");
        let err = scene
            .create_manual_object("quad", Material::new("m"), ManualGeometry::default())
            .unwrap_err();
        assert!(matches!(err, GroundImageError::ObjectNameExists(_)));
    }

    #[test]
    fn test_update_manual_object_keeps_material() {
        let mut scene = SceneGraph::new();
        let object = quad_object(&mut scene, "quad");
        scene
            .update_manual_object(object, ManualGeometry::ground_quad(2.0, 3.0))
            .unwrap();

        let o = scene.object(object).unwrap();
        assert_eq!(o.revision(), 1);
        assert_eq!(o.material().texture_units[0].texture_name, "tex");
        assert_eq!(o.geometry().positions()[2], Vec3::new(2.0, -3.0, 0.0));

        assert!(scene
            .update_manual_object(ObjectId(99), ManualGeometry::default())
            .is_err());
    }

    #[test]
    fn test_reattach_moves_object() {
        let mut scene = SceneGraph::new();
        let a = scene.create_child_node(scene.root_node()).unwrap();
        let b = scene.create_child_node(scene.root_node()).unwrap();
        let object = quad_object(&mut scene, "quad");

        scene.attach_object(a, object).unwrap();
        scene.attach_object(b, object).unwrap();
        assert!(scene.node(a).unwrap().objects().is_empty());
        assert_eq!(scene.node(b).unwrap().objects(), &[object]);
        assert!(scene.attach_object(NodeId(42), object).is_err());
    }
}
