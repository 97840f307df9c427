use super::*;

const CANVAS: Canvas = Canvas {
    width: 1080,
    height: 1920,
};

fn pose(elevation_deg: f64, azimuth_deg: f64) -> CameraPose {
    CameraPose {
        elevation_deg,
        azimuth_deg,
    }
}

#[test]
fn origin_projects_to_canvas_center() {
    let cam = Projector::new(CANVAS, pose(15.0, 42.0), 5.0);
    let p = cam.project(Vec3::ZERO);
    assert!((p.point.x - 540.0).abs() < 1e-9);
    assert!((p.point.y - 960.0).abs() < 1e-9);
    assert!((p.depth - 10.0).abs() < 1e-9);
}

#[test]
fn up_axis_points_up_on_screen() {
    let cam = Projector::new(CANVAS, pose(20.0, 0.0), 5.0);
    let top = cam.project(Vec3::new(0.0, 0.0, 3.0));
    assert!(top.point.y < 960.0);
    assert!((top.point.x - 540.0).abs() < 1e-9);
}

#[test]
fn nearer_points_are_larger_and_shallower() {
    let cam = Projector::new(CANVAS, pose(0.0, 0.0), 5.0);
    let near = cam.project(Vec3::new(4.0, 0.0, 0.0));
    let far = cam.project(Vec3::new(-4.0, 0.0, 0.0));
    assert!(near.depth < far.depth);
    assert!(near.px_per_unit > far.px_per_unit);
    assert!(cam.faces_camera(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)));
    assert!(!cam.faces_camera(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)));
}

#[test]
fn larger_world_extent_zooms_out() {
    let classic = Projector::new(CANVAS, pose(15.0, 0.0), 5.0);
    let enhanced = Projector::new(CANVAS, pose(15.0, 0.0), 8.0);
    let p = Vec3::new(0.0, 2.0, 0.0);
    let dc = classic.project(p).point.x - 540.0;
    let de = enhanced.project(p).point.x - 540.0;
    assert!(dc > de && de > 0.0);
}

#[test]
fn point_size_scales_with_canvas_width() {
    assert!((px_per_pt(CANVAS) - 100.0 / 72.0).abs() < 1e-12);
    let half = Canvas {
        width: 540,
        height: 960,
    };
    assert!((px_per_pt(half) - 50.0 / 72.0).abs() < 1e-12);
}

#[test]
fn light_is_unit_and_faces_viewer() {
    let cam = Projector::new(CANVAS, pose(25.0, 130.0), 8.0);
    let l = cam.light_dir();
    assert!((l.length() - 1.0).abs() < 1e-9);
    assert!(l.dot(cam.eye_dir()) > 0.0);
}
