//! Hand-built geometry for manual scene objects.
//!
//! Geometry is assembled vertex by vertex: [`ManualGeometry::begin`] starts a
//! stream, each `position` call opens a new vertex, and the following
//! `texture_coord` / `normal` calls fill in that vertex's attributes.
//!
//! Streams are assembled as a triangle fan: every vertex after the second
//! forms a triangle with the first and the previous one.

use glam::{Vec2, Vec3};

/// GPU vertex layout: position, texture coordinate, normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

/// A finished triangle-fan vertex stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ManualGeometry {
    vertices: Vec<Vertex>,
}

impl ManualGeometry {
    /// Starts a new vertex stream.
    pub fn begin() -> ManualGeometryBuilder {
        ManualGeometryBuilder {
            vertices: Vec::new(),
        }
    }

    /// The ground image rectangle: top-left corner at the origin, extending
    /// `width` along +X and `height` along -Y, facing +Z.
    ///
    /// Texture row 0 maps to the edge at `y = 0`.
    pub fn ground_quad(width: f32, height: f32) -> Self {
        Self::begin()
            .position(0.0, 0.0, 0.0)
            .texture_coord(0.0, 0.0)
            .normal(0.0, 0.0, 1.0)
            .position(width, 0.0, 0.0)
            .texture_coord(1.0, 0.0)
            .normal(0.0, 0.0, 1.0)
            .position(width, -height, 0.0)
            .texture_coord(1.0, 1.0)
            .normal(0.0, 0.0, 1.0)
            .position(0.0, -height, 0.0)
            .texture_coord(0.0, 1.0)
            .normal(0.0, 0.0, 1.0)
            .end()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex positions in stream order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(Vertex::position).collect()
    }

    /// Texture coordinates in stream order.
    pub fn uvs(&self) -> Vec<Vec2> {
        self.vertices.iter().map(Vertex::uv).collect()
    }

    /// Raw bytes of the vertex stream, ready for a vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of triangles the stream assembles into.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// In-progress vertex stream.
#[derive(Debug, Clone)]
pub struct ManualGeometryBuilder {
    vertices: Vec<Vertex>,
}

impl ManualGeometryBuilder {
    /// Opens a new vertex at the given position.
    #[must_use]
    pub fn position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.vertices.push(Vertex {
            position: [x, y, z],
            ..Vertex::default()
        });
        self
    }

    /// Sets the texture coordinate of the current vertex.
    #[must_use]
    pub fn texture_coord(mut self, u: f32, v: f32) -> Self {
        if let Some(vertex) = self.vertices.last_mut() {
            vertex.uv = [u, v];
        }
        self
    }

    /// Sets the normal of the current vertex.
    #[must_use]
    pub fn normal(mut self, x: f32, y: f32, z: f32) -> Self {
        if let Some(vertex) = self.vertices.last_mut() {
            vertex.normal = [x, y, z];
        }
        self
    }

    /// Finishes the stream.
    pub fn end(self) -> ManualGeometry {
        ManualGeometry {
            vertices: self.vertices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ground_quad_layout() {
        let quad = ManualGeometry::ground_quad(2.0, 3.0);
        assert_eq!(
            quad.positions(),
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, -3.0, 0.0),
                Vec3::new(0.0, -3.0, 0.0),
            ]
        );
        assert_eq!(
            quad.uvs(),
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ]
        );
        assert_eq!(quad.triangle_count(), 2);
        assert!(quad.vertices().iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_attributes_before_position_are_ignored() {
        let geometry = ManualGeometry::begin()
            .texture_coord(0.5, 0.5)
            .position(1.0, 1.0, 1.0)
            .end();
        assert_eq!(geometry.vertices().len(), 1);
        assert_eq!(geometry.vertices()[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_byte_view_matches_layout() {
        let quad = ManualGeometry::ground_quad(1.0, 1.0);
        assert_eq!(quad.as_bytes().len(), 4 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    proptest! {
        #[test]
        fn prop_ground_quad_corners(w in 0.0f32..1.0e4, h in 0.0f32..1.0e4) {
            let quad = ManualGeometry::ground_quad(w, h);
            let p = quad.positions();
            prop_assert_eq!(p[0], Vec3::new(0.0, 0.0, 0.0));
            prop_assert_eq!(p[1], Vec3::new(w, 0.0, 0.0));
            prop_assert_eq!(p[2], Vec3::new(w, -h, 0.0));
            prop_assert_eq!(p[3], Vec3::new(0.0, -h, 0.0));
        }
    }
}
