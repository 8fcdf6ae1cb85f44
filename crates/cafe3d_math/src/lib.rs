//! 3D Mathematics Library
//!
//! This crate provides the vector, matrix and primitive-geometry types used by
//! the cafe3d hero scene.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//!
//! ## Shape Types
//!
//! - [`Tessellate`] - Trait for primitives that produce triangles
//! - [`TriangleMesh`] - Indexed triangles with per-vertex normals
//! - [`Cylinder`], [`Torus`], [`Sphere`] - the primitives the scene is built from

mod vec3;
pub mod mat4;
pub mod shape;
pub mod cylinder;
pub mod torus;
pub mod sphere;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use shape::{Tessellate, TriangleMesh};
pub use cylinder::Cylinder;
pub use torus::Torus;
pub use sphere::Sphere;
