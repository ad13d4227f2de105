use voxelcraft_geom::{Aabb, Axis, Vec2, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
}

#[test]
fn vec3_axis_accessors() {
    let mut v = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v.get(Axis::X), 1.0);
    assert_eq!(v.get(Axis::Y), 2.0);
    assert_eq!(v.get(Axis::Z), 3.0);
    v.set(Axis::Z, -7.5);
    assert_eq!(v, Vec3::new(1.0, 2.0, -7.5));
}

#[test]
fn vec3_floor_handles_negatives() {
    assert_eq!(Vec3::new(-0.2, 0.0, 3.999).floor_i32(), (-1, 0, 3));
}

#[test]
fn vec3_normalized_zero_is_noop() {
    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-6));
    assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
}

#[test]
fn vec2_angle_and_normalize() {
    let v = Vec2::from_angle(0.0);
    assert!(approx_eq(v.x, 1.0, 1e-6) && approx_eq(v.y, 0.0, 1e-6));
    let n = Vec2::new(0.0, -2.0).normalized();
    assert_eq!(n, Vec2::new(0.0, -1.0));
    assert!(Vec2::ZERO.normalized().is_zero());
}

#[test]
fn aabb_touching_faces_do_not_intersect() {
    let cell = Aabb::unit_cell(0, 0, 0);
    let right = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    assert!(!cell.intersects(&right));
    let above = Aabb::from_center(Vec3::new(0.5, 1.9, 0.5), Vec3::new(0.3, 0.9, 0.3));
    assert!(!cell.intersects(&above));
    let sunk = Aabb::from_center(Vec3::new(0.5, 1.89, 0.5), Vec3::new(0.3, 0.9, 0.3));
    assert!(cell.intersects(&sunk));
}

#[test]
fn aabb_include_grows() {
    let mut b = Aabb::new(Vec3::splat(0.0), Vec3::splat(0.0));
    b.include(Vec3::new(-1.0, 2.0, 0.5));
    assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(b.max, Vec3::new(0.0, 2.0, 0.5));
}

#[test]
fn aabb_ray_entry() {
    let b = Aabb::unit_cell(2, 0, 0);
    let t = b
        .ray_entry(Vec3::new(0.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0), 0.0, 10.0)
        .expect("ray along +X hits the cell");
    assert!(approx_eq(t, 2.0, 1e-6));
    // Beyond far distance
    assert!(
        b.ray_entry(Vec3::new(0.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0), 0.0, 1.5)
            .is_none()
    );
    // Parallel and outside the slab
    assert!(
        b.ray_entry(Vec3::new(0.0, 2.0, 0.5), Vec3::new(1.0, 0.0, 0.0), 0.0, 10.0)
            .is_none()
    );
    // Origin inside reports near
    let inside = b.ray_entry(Vec3::new(2.5, 0.5, 0.5), Vec3::new(0.0, 1.0, 0.0), 0.1, 10.0);
    assert_eq!(inside, Some(0.1));
}
