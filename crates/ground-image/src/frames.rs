//! Static frame table.
//!
//! Frames form a forest: each frame may have a parent and a pose within that
//! parent. Any two frames in the same tree can be related; frames in
//! different trees cannot. Transforms here do not change over time, so every
//! timestamp resolves the same way.

use std::collections::HashMap;

use ground_image_core::error::{GroundImageError, Result};
use ground_image_core::transform::{Pose, Timestamp, TransformResolver};

#[derive(Debug, Clone)]
struct FrameLink {
    parent: String,
    pose: Pose,
}

/// A [`TransformResolver`] over a set of static parent/child transforms.
#[derive(Debug, Clone)]
pub struct FrameTable {
    fixed_frame: String,
    links: HashMap<String, FrameLink>,
}

impl FrameTable {
    /// Creates a table with no transforms, expressing poses in `fixed_frame`.
    pub fn new(fixed_frame: impl Into<String>) -> Self {
        Self {
            fixed_frame: fixed_frame.into(),
            links: HashMap::new(),
        }
    }

    /// Changes the frame every pose is expressed in.
    pub fn set_fixed_frame(&mut self, fixed_frame: impl Into<String>) {
        self.fixed_frame = fixed_frame.into();
    }

    /// Sets the pose of `child` within `parent`, replacing any previous link.
    pub fn set_transform(&mut self, child: impl Into<String>, parent: impl Into<String>, pose: Pose) {
        let child = child.into();
        let parent = parent.into();
        log::debug!("frame '{child}' -> '{parent}': {pose:?}");
        self.links.insert(child, FrameLink { parent, pose });
    }

    /// Removes the link from `child` to its parent.
    pub fn remove_transform(&mut self, child: &str) -> Result<()> {
        self.links
            .remove(child)
            .map(|_| ())
            .ok_or_else(|| GroundImageError::FrameNotFound(child.to_string()))
    }

    /// Returns true if `frame` appears as a child or a parent.
    pub fn contains(&self, frame: &str) -> bool {
        frame == self.fixed_frame
            || self.links.contains_key(frame)
            || self.links.values().any(|l| l.parent == frame)
    }

    /// All known frame names, sorted.
    pub fn frame_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .links
            .iter()
            .flat_map(|(child, link)| [child.clone(), link.parent.clone()])
            .chain(std::iter::once(self.fixed_frame.clone()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Walks parent links up to the tree root. Returns the root name and the
    /// pose of `frame` in it, or `None` if the links form a cycle.
    fn to_root<'a>(&'a self, frame: &'a str) -> Option<(&'a str, Pose)> {
        let mut current = frame;
        let mut pose = Pose::identity();
        for _ in 0..=self.links.len() {
            match self.links.get(current) {
                Some(link) => {
                    pose = link.pose.compose(&pose);
                    current = &link.parent;
                }
                None => return Some((current, pose)),
            }
        }
        log::warn!("cycle in frame links starting at '{frame}'");
        None
    }
}

impl TransformResolver for FrameTable {
    fn fixed_frame(&self) -> &str {
        &self.fixed_frame
    }

    fn resolve(&self, frame: &str, _time: Timestamp) -> Option<Pose> {
        let (frame_root, frame_pose) = self.to_root(frame)?;
        let (fixed_root, fixed_pose) = self.to_root(&self.fixed_frame)?;
        if frame_root != fixed_root {
            return None;
        }
        Some(fixed_pose.inverse().compose(&frame_pose))
    }
}
