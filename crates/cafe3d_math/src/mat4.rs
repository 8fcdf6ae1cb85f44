//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>`
//! so they can be written to uniform buffers without transposing.
//! Rotations follow the right-handed convention, and Euler angles are applied
//! in XYZ order (the same order the scene descriptions are authored in).

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by two axes.
///
/// Rotates axis `p1` towards axis `p2` by `angle` radians.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z)
///
/// # Example
/// ```
/// use cafe3d_math::mat4::plane_rotation;
/// // Yaw: rotate Z towards X (a rotation about +Y)
/// let yaw = plane_rotation(0.5, 2, 0);
/// ```
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation about the +X axis
#[inline]
pub fn rotation_x(angle: f32) -> Mat4 {
    plane_rotation(angle, 1, 2)
}

/// Rotation about the +Y axis
#[inline]
pub fn rotation_y(angle: f32) -> Mat4 {
    plane_rotation(angle, 2, 0)
}

/// Rotation about the +Z axis
#[inline]
pub fn rotation_z(angle: f32) -> Mat4 {
    plane_rotation(angle, 0, 1)
}

/// Rotation from Euler angles in XYZ order: `Rx * Ry * Rz`
pub fn from_euler_xyz(euler: Vec3) -> Mat4 {
    mul(mul(rotation_x(euler.x), rotation_y(euler.y)), rotation_z(euler.z))
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Non-uniform scale matrix
pub fn scale(s: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s.x;
    m[1][1] = s.y;
    m[2][2] = s.z;
    m
}

/// Compose translation, Euler rotation and scale: `T * R * S`
pub fn from_trs(position: Vec3, euler: Vec3, s: Vec3) -> Mat4 {
    mul(translation(position), mul(from_euler_xyz(euler), scale(s)))
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a matrix, ignoring any projective row
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0) by a matrix
pub fn transform_vector(m: &Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
    )
}

/// Transform a surface normal and renormalize it
///
/// Uses the cofactor matrix of the upper 3x3 (columns `b×c, c×a, a×b`),
/// which equals the inverse-transpose up to the determinant, so it stays
/// correct under non-uniform scale.
pub fn transform_normal(m: &Mat4, n: Vec3) -> Vec3 {
    let a = get_column(m, 0);
    let b = get_column(m, 1);
    let c = get_column(m, 2);

    let n = b.cross(c) * n.x + c.cross(a) * n.y + a.cross(b) * n.z;
    n.normalized()
}

/// Get the xyz part of a column vector from a matrix
pub fn get_column(m: &Mat4, col: usize) -> Vec3 {
    Vec3::new(m[col][0], m[col][1], m[col][2])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Right-handed perspective projection with a [0, 1] depth range (wgpu clip space)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = far / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, range, -1.0],
        [0.0, 0.0, range * near, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_mul() {
        let m = from_euler_xyz(Vec3::new(0.3, 0.2, 0.1));
        assert_eq!(mul(IDENTITY, m), m);
        assert_eq!(mul(m, IDENTITY), m);
    }

    #[test]
    fn test_rotation_x() {
        let p = transform_point(&rotation_x(FRAC_PI_2), Vec3::Y);
        assert!(vec_approx_eq(p, Vec3::Z), "got {:?}", p);
    }

    #[test]
    fn test_rotation_y() {
        let p = transform_point(&rotation_y(FRAC_PI_2), Vec3::Z);
        assert!(vec_approx_eq(p, Vec3::X), "got {:?}", p);
    }

    #[test]
    fn test_rotation_z() {
        let p = transform_point(&rotation_z(FRAC_PI_2), Vec3::X);
        assert!(vec_approx_eq(p, Vec3::Y), "got {:?}", p);
    }

    #[test]
    fn test_euler_applies_z_first() {
        // Rz(90) takes X to Y, then Rx(90) takes Y to Z
        let m = from_euler_xyz(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        let p = transform_point(&m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::Z), "got {:?}", p);
    }

    #[test]
    fn test_trs_order() {
        // X * 2 = (2, 0, 0), rotated 90 degrees about Z = (0, 2, 0), + (10, 0, 0)
        let m = from_trs(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, FRAC_PI_2),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let p = transform_point(&m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(10.0, 2.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = translation(Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(transform_vector(&m, Vec3::X), Vec3::X);
    }

    #[test]
    fn test_transform_normal_non_uniform_scale() {
        // A 45-degree surface squashed along Y: the normal tilts towards Y
        let m = scale(Vec3::new(1.0, 0.5, 1.0));
        let n = transform_normal(&m, Vec3::new(1.0, 1.0, 0.0).normalized());
        let expected = Vec3::new(0.5, 1.0, 0.0).normalized();
        assert!(vec_approx_eq(n, expected), "got {:?}", n);
    }

    #[test]
    fn test_transpose_twice() {
        let m = from_trs(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), Vec3::ONE);
        assert_eq!(transpose(transpose(m)), m);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y);
        let p = transform_point(&view, eye);
        assert!(vec_approx_eq(p, Vec3::ZERO), "got {:?}", p);

        // The target ends up straight ahead (negative Z in view space)
        let t = transform_point(&view, Vec3::ZERO);
        assert!(vec_approx_eq(t, Vec3::new(0.0, 0.0, -5.0)), "got {:?}", t);
    }

    #[test]
    fn test_perspective_depth_range() {
        let near = 0.1;
        let far = 100.0;
        let proj = perspective(std::f32::consts::FRAC_PI_4, 1.0, near, far);

        let clip_z = |z: f32| {
            let cz = proj[2][2] * z + proj[3][2];
            let cw = proj[2][3] * z;
            cz / cw
        };

        assert!(clip_z(-near).abs() < 1e-4);
        assert!((clip_z(-far) - 1.0).abs() < 1e-4);
    }
}
