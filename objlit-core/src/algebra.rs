/// Vector and matrix aliases plus the transform builders for camera and model
///
/// Points are column vectors, so translation lives in column 3 (rows 0..3)
/// and `a * b` applies `b` first. Every builder here composes its elementary
/// matrix on the right of `m`, which means the last builder in a chain is the
/// first to touch a vertex. `Mat4::as_slice` is already the column-major order
/// a shader uniform expects.
use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// Texture coordinates
pub type Vec2 = Vector2<f32>;
/// Positions, normals and directions
pub type Vec3 = Vector3<f32>;
/// Homogeneous clip-space coordinates
pub type Vec4 = Vector4<f32>;
pub type Mat4 = Matrix4<f32>;

/// Vectors at or below this length have no usable direction
pub const MIN_NORM: f32 = 1e-6;

/// Scale to unit length, or `None` for a (near) zero vector
pub fn unit(v: &Vec3) -> Option<Vec3> {
    v.try_normalize(MIN_NORM)
}

/// Compose a translation by `v` onto `m`
pub fn translate(m: &Mat4, v: &Vec3) -> Mat4 {
    let t = Mat4::new(
        1.0, 0.0, 0.0, v.x,
        0.0, 1.0, 0.0, v.y,
        0.0, 0.0, 1.0, v.z,
        0.0, 0.0, 0.0, 1.0,
    );
    m * t
}

/// Compose a per-axis scale by `v` onto `m`
pub fn scale(m: &Mat4, v: &Vec3) -> Mat4 {
    let s = Mat4::new(
        v.x, 0.0, 0.0, 0.0,
        0.0, v.y, 0.0, 0.0,
        0.0, 0.0, v.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    m * s
}

/// Compose a rotation of `angle` radians about `axis` onto `m` (Rodrigues' formula).
///
/// The axis is normalized first, so any non-zero vector is a pure rotation.
/// A zero axis leaves the matrix unchanged.
pub fn rotate(m: &Mat4, angle: f32, axis: &Vec3) -> Mat4 {
    let Some(a) = unit(axis) else {
        return *m;
    };
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    let r = Mat4::new(
        t * a.x * a.x + c,
        t * a.x * a.y - s * a.z,
        t * a.x * a.z + s * a.y,
        0.0,
        t * a.x * a.y + s * a.z,
        t * a.y * a.y + c,
        t * a.y * a.z - s * a.x,
        0.0,
        t * a.x * a.z - s * a.y,
        t * a.y * a.z + s * a.x,
        t * a.z * a.z + c,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    );
    m * r
}

/// Right-handed view matrix looking from `eye` towards `center`.
///
/// Returns `None` when `eye == center` or `up` is parallel to the view
/// direction, since no basis exists for those inputs.
pub fn look_at(eye: &Vec3, center: &Vec3, up: &Vec3) -> Option<Mat4> {
    let f = unit(&(center - eye))?;
    let s = unit(&f.cross(&unit(up)?))?;
    let u = s.cross(&f);

    Some(Mat4::new(
        s.x, s.y, s.z, -s.dot(eye),
        u.x, u.y, u.z, -u.dot(eye),
        -f.x, -f.y, -f.z, f.dot(eye),
        0.0, 0.0, 0.0, 1.0,
    ))
}

/// Symmetric perspective projection.
///
/// Requires `0 < fov < PI`, `aspect > 0` and `0 < near < far`.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    debug_assert!(fov > 0.0 && fov < std::f32::consts::PI, "fov out of range: {fov}");
    debug_assert!(aspect > 0.0, "aspect must be positive: {aspect}");
    debug_assert!(near > 0.0 && far > near, "bad clip planes: {near}..{far}");

    let f = 1.0 / (fov / 2.0).tan();
    Mat4::new(
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (far + near) / (near - far), (2.0 * far * near) / (near - far),
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Transform a point (w = 1) without the perspective divide
pub fn homogeneous(m: &Mat4, p: &Vec3) -> Vec4 {
    m * p.push(1.0)
}

/// Transform a point (w = 1), ignoring the projective row
pub fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
    homogeneous(m, p).xyz()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn sample_matrix() -> Mat4 {
        let m = translate(&Mat4::identity(), &Vec3::new(1.0, -2.0, 3.5));
        let m = rotate(&m, 0.7, &Vec3::new(1.0, 1.0, 0.0));
        scale(&m, &Vec3::new(2.0, 0.5, 1.5))
    }

    #[test]
    fn test_identity_is_neutral() {
        let x = sample_matrix();
        assert_relative_eq!(Mat4::identity() * x, x, epsilon = 1e-5);
        assert_relative_eq!(x * Mat4::identity(), x, epsilon = 1e-5);
    }

    #[test]
    fn test_builders_apply_last_first() {
        let scaled = scale(&Mat4::identity(), &Vec3::repeat(2.0));
        let moved_then_scaled = translate(&scaled, &Vec3::x());
        assert_relative_eq!(
            transform_point(&moved_then_scaled, &Vec3::zeros()),
            Vec3::new(2.0, 0.0, 0.0),
            epsilon = 1e-5
        );

        let moved = translate(&Mat4::identity(), &Vec3::x());
        let scaled_then_moved = scale(&moved, &Vec3::repeat(2.0));
        assert_relative_eq!(
            transform_point(&scaled_then_moved, &Vec3::zeros()),
            Vec3::new(1.0, 0.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_translation_in_column_three() {
        let t = translate(&Mat4::identity(), &Vec3::new(4.0, 5.0, 6.0));
        assert_eq!([t[(0, 3)], t[(1, 3)], t[(2, 3)]], [4.0, 5.0, 6.0]);
        assert_eq!(t.as_slice()[12..15], [4.0, 5.0, 6.0]);
        assert_eq!(t, Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0)));
    }

    #[test]
    fn test_scale_matches_nalgebra() {
        let s = scale(&Mat4::identity(), &Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(s, Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_unit_rejects_zero() {
        let n = unit(&Vec3::new(-0.001, 0.002, 0.0005)).unwrap();
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(unit(&n).unwrap(), n, epsilon = 1e-6);
        assert_eq!(unit(&Vec3::zeros()), None);
    }

    #[test]
    fn test_rotate_half_turn_about_y() {
        let r = rotate(&Mat4::identity(), PI, &Vec3::y());
        assert_relative_eq!(
            transform_point(&r, &Vec3::x()),
            Vec3::new(-1.0, 0.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_rotate_matches_nalgebra() {
        let axis = Vec3::new(1.0, 2.0, -0.5);
        let ours = rotate(&Mat4::identity(), 0.9, &axis);
        let theirs = Mat4::from_axis_angle(&nalgebra::Unit::new_normalize(axis), 0.9);
        assert_relative_eq!(ours, theirs, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_normalizes_axis() {
        let long_axis = rotate(&Mat4::identity(), FRAC_PI_2, &Vec3::new(0.0, 0.0, 5.0));
        let unit_axis = rotate(&Mat4::identity(), FRAC_PI_2, &Vec3::z());
        assert_relative_eq!(long_axis, unit_axis, epsilon = 1e-6);

        let x = sample_matrix();
        assert_eq!(rotate(&x, 1.0, &Vec3::zeros()), x);
    }

    #[test]
    fn test_look_at_is_orthonormal() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = look_at(&eye, &(eye - Vec3::z()), &Vec3::y()).unwrap();

        let basis = view.fixed_view::<3, 3>(0, 0);
        assert_relative_eq!(basis * basis.transpose(), nalgebra::Matrix3::identity(), epsilon = 1e-5);
        // The eye maps to the origin of view space
        assert_relative_eq!(transform_point(&view, &eye), Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Vec3::new(2.0, 3.0, 5.0);
        let center = Vec3::new(0.5, -1.0, 0.0);
        let up = Vec3::new(0.0, 2.0, 0.0);
        let ours = look_at(&eye, &center, &up).unwrap();
        let theirs = Mat4::look_at_rh(&eye.into(), &center.into(), &up);
        assert_relative_eq!(ours, theirs, epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_degenerate() {
        let y = Vec3::y();
        assert!(look_at(&Vec3::zeros(), &Vec3::zeros(), &y).is_none());
        assert!(look_at(&Vec3::new(0.0, 5.0, 0.0), &Vec3::zeros(), &y).is_none());
        assert!(look_at(&Vec3::z(), &Vec3::zeros(), &Vec3::zeros()).is_none());
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let ours = perspective(FRAC_PI_4, 1.5, 0.1, 100.0);
        let theirs = Mat4::new_perspective(1.5, FRAC_PI_4, 0.1, 100.0);
        assert_relative_eq!(ours, theirs, epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let p = perspective(FRAC_PI_2, 1.0, 1.0, 10.0);
        let near = homogeneous(&p, &Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-5);
        let far = homogeneous(&p, &Vec3::new(0.0, 0.0, -10.0));
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_translation_leaves_directions_alone() {
        let m = translate(&Mat4::identity(), &Vec3::repeat(9.0));
        assert_relative_eq!(m.transform_vector(&Vec3::x()), Vec3::x());
        assert_relative_eq!(transform_point(&m, &Vec3::x()), Vec3::new(10.0, 9.0, 9.0));
    }
}
