//! Producers and draw lists
//!
//! A producer owns a small buffer of animated state. The frame loop calls
//! [`Producer::advance`] once per tick; afterwards the renderer borrows the
//! state read-only through [`Producer::emit`].

use bitflags::bitflags;
use cafe3d_math::{Mat4, Vec3};

use crate::clock::Tick;
use crate::material::{Color, Material};
use crate::shapes::ShapeTemplate;

bitflags! {
    /// Render-facing data a producer touched during an advance
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// World transforms changed
        const TRANSFORM = 1 << 0;
        /// Point positions changed
        const POINTS = 1 << 1;
        /// Mesh geometry changed
        const MESH = 1 << 2;
        /// Everything needs a rebuild
        const ALL = Self::TRANSFORM.bits() | Self::POINTS.bits() | Self::MESH.bits();
    }
}

/// One mesh instance ready for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDraw {
    pub shape: ShapeTemplate,
    /// Local-to-world matrix
    pub world: Mat4,
    pub material: Material,
}

/// How a point cloud is drawn
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointStyle {
    /// Point diameter in world units
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
    /// Shrink points with distance from the camera
    pub size_attenuation: bool,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.06,
            color: Color::WHITE,
            opacity: 0.4,
            size_attenuation: true,
        }
    }
}

/// A borrowed point cloud
#[derive(Debug, Clone, Copy)]
pub struct PointsDraw<'a> {
    /// Offset added to every position
    pub origin: Vec3,
    pub positions: &'a [Vec3],
    pub style: PointStyle,
}

/// Everything the renderer needs for one frame
///
/// Point clouds borrow the producers' buffers, so a draw list cannot outlive
/// the frame loop it was collected from.
#[derive(Debug, Default)]
pub struct DrawList<'a> {
    pub meshes: Vec<MeshDraw>,
    pub points: Vec<PointsDraw<'a>>,
}

impl<'a> DrawList<'a> {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn push_mesh(&mut self, mesh: MeshDraw) {
        self.meshes.push(mesh);
    }

    pub fn push_points(&mut self, points: PointsDraw<'a>) {
        self.points.push(points);
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
        self.points.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty() && self.points.is_empty()
    }

    /// Total number of points across all clouds
    pub fn point_count(&self) -> usize {
        self.points.iter().map(|p| p.positions.len()).sum()
    }
}

/// A per-frame animation producer
pub trait Producer {
    /// Name for logging
    fn name(&self) -> &str;

    /// Advance one frame
    fn advance(&mut self, tick: &Tick) -> DirtyFlags;

    /// Append this producer's drawables
    fn emit<'a>(&'a self, list: &mut DrawList<'a>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_union() {
        let flags = DirtyFlags::TRANSFORM | DirtyFlags::POINTS;
        assert!(flags.contains(DirtyFlags::POINTS));
        assert!(!flags.contains(DirtyFlags::MESH));
        assert_eq!(DirtyFlags::default(), DirtyFlags::NONE);
    }

    #[test]
    fn test_point_style_defaults() {
        let style = PointStyle::default();
        assert_eq!(style.size, 0.06);
        assert_eq!(style.opacity, 0.4);
        assert!(style.size_attenuation);
    }

    #[test]
    fn test_draw_list_counts() {
        let positions = [Vec3::ZERO, Vec3::ONE];
        let mut list = DrawList::new();
        assert!(list.is_empty());
        list.push_points(PointsDraw {
            origin: Vec3::ZERO,
            positions: &positions,
            style: PointStyle::default(),
        });
        assert_eq!(list.point_count(), 2);
        list.clear();
        assert!(list.is_empty());
    }
}
