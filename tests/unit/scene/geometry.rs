use super::*;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn sphere_points_lie_on_the_surface() {
    let center = Vec3::new(1.0, -2.0, 0.5);
    let mesh = SphereMesh::new(center, 0.8, 20);
    assert_eq!(mesh.resolution(), 20);
    assert_eq!(mesh.points().len(), 400);
    for &p in mesh.points() {
        assert!(((p - center).length() - 0.8).abs() < 1e-9);
    }
    assert!(close(mesh.point(0, 0), center + Vec3::new(0.0, 0.0, 0.8)));
    assert!(close(mesh.point(7, 19), center + Vec3::new(0.0, 0.0, -0.8)));
}

#[test]
fn sphere_faces_point_outwards() {
    let mesh = SphereMesh::new(Vec3::ZERO, 2.0, 12);
    let faces: Vec<_> = mesh.faces().collect();
    assert_eq!(faces.len(), 11 * 11);
    for f in &faces {
        assert!(f.normal.dot(f.centroid) > 0.0);
        assert!((f.normal.length() - 1.0).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&f.v));
    }
}

#[test]
fn tiny_resolution_is_raised() {
    assert_eq!(SphereMesh::new(Vec3::ZERO, 1.0, 1).resolution(), 3);
}

#[test]
fn circle_orbit_is_flat_and_closed() {
    let pts = OrbitShape::circle(2.5).sample(ORBIT_RESOLUTION);
    assert_eq!(pts.len(), ORBIT_RESOLUTION);
    assert!(close(pts[0], Vec3::new(2.5, 0.0, 0.0)));
    assert!(close(pts[ORBIT_RESOLUTION - 1], pts[0]));
    for p in pts {
        assert!(p.z.abs() < 1e-12);
        assert!(((p.x * p.x + p.y * p.y).sqrt() - 2.5).abs() < 1e-9);
    }
}

#[test]
fn elliptical_orbit_wobbles_and_rotates() {
    let shape = OrbitShape::ellipse(4.0, 3.2, 1.3);
    let top = shape.point_at(std::f64::consts::PI);
    assert!(close(top, Vec3::new(-4.0, 0.0, 1.3)));

    let rotated = shape.rotated_z(std::f64::consts::FRAC_PI_2);
    assert!(close(rotated.point_at(0.0), Vec3::new(0.0, 4.0, 0.0)));
    assert_eq!(rotated.a, 4.0);
}
