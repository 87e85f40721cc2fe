//! Static mesh data

use crate::render::opengl::{GlError, GlResult};

/// Floats per vertex position
pub const POSITION_COMPONENTS: usize = 3;

#[rustfmt::skip]
const TRIANGLE_POSITIONS: [f32; 9] = [
    -1.0, -1.0, 0.0,
     1.0, -1.0, 0.0,
     0.0,  1.0, 0.0,
];

/// Tightly packed vertex positions, three floats per vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<f32>,
}

impl Mesh {
    /// Wrap raw positions
    ///
    /// Rejects empty data and data that does not divide into whole vertices.
    pub fn from_positions(positions: Vec<f32>) -> GlResult<Self> {
        if positions.is_empty() {
            return Err(GlError::InvalidVertexData("mesh has no vertices".to_string()));
        }
        if positions.len() % POSITION_COMPONENTS != 0 {
            return Err(GlError::InvalidVertexData(format!(
                "{} floats is not a whole number of {POSITION_COMPONENTS}-component vertices",
                positions.len()
            )));
        }
        Ok(Self { positions })
    }

    /// The built-in triangle spanning `[-1, 1]` on the XY plane
    pub fn triangle() -> Self {
        Self {
            positions: TRIANGLE_POSITIONS.to_vec(),
        }
    }

    /// Flat position data
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_COMPONENTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_has_three_vertices() {
        let mesh = Mesh::triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.positions()[..3], [-1.0, -1.0, 0.0]);
        assert_eq!(mesh.positions()[6..], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rejects_partial_vertex() {
        let err = Mesh::from_positions(vec![0.0; 7]).unwrap_err();
        assert!(matches!(err, GlError::InvalidVertexData(_)));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Mesh::from_positions(Vec::new()).is_err());
    }

    #[test]
    fn test_accepts_whole_vertices() {
        let mesh = Mesh::from_positions(vec![0.0; 12]).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
    }
}
