//! Benchmarks for projection building and point projection.

use super::invert::{create_projection_matrix, create_view_matrix};
use crate::{
    angle::Degrees,
    benchmark::Benchmarker,
    matrix4::{DepthRange, Handedness, Matrix4, Viewport},
    vector::{Vector2, Vector3},
};

pub fn build_perspective(benchmarker: impl Benchmarker) {
    benchmarker.benchmark(&mut || {
        Matrix4::perspective(
            Degrees(75.0),
            16.0 / 10.0,
            0.05,
            f64::INFINITY,
            Handedness::Right,
            DepthRange::ZeroToOne,
        )
    });
}

pub fn build_look_at(benchmarker: impl Benchmarker) {
    let eye = Vector3::new(-4.0, 2.0, 8.0);
    let center = Vector3::new(1.0, 0.0, -1.0);
    benchmarker.benchmark(&mut || {
        Matrix4::look_at(&eye, &center, &Vector3::unit_y(), Handedness::Right)
    });
}

pub fn transform_project_points(benchmarker: impl Benchmarker) {
    let view_projection = create_projection_matrix() * create_view_matrix();
    let points = create_points();
    benchmarker.benchmark(&mut || {
        points
            .iter()
            .map(|point| view_projection.transform_project(point))
            .fold(Vector3::zeros(), |sum, projected| sum + projected)
    });
}

pub fn unproject_ray(benchmarker: impl Benchmarker) {
    let view_projection = create_projection_matrix() * create_view_matrix();
    let viewport = Viewport::new(0.0, 0.0, 1280.0, 960.0);
    let window = Vector2::new(400.0, 300.0);
    benchmarker.benchmark(&mut || view_projection.unproject_ray(&window, &viewport));
}

pub(super) fn create_points() -> Vec<Vector3> {
    (0..1000)
        .map(|idx| {
            let t = f64::from(idx) * 0.01;
            Vector3::new(t.sin() * 20.0, t.cos() * 5.0, -t * 4.0)
        })
        .collect()
}
