//! Benchmarks for frustum extraction and culling.

use super::{
    invert::{create_projection_matrix, create_view_matrix},
    project::create_points,
};
use crate::{benchmark::Benchmarker, frustum::FrustumIntersection, vector::Vector3};

pub fn extract_frustum_planes(benchmarker: impl Benchmarker) {
    let view_projection = create_projection_matrix() * create_view_matrix();
    benchmarker.benchmark(&mut || view_projection.frustum_planes());
}

pub fn cull_spheres(benchmarker: impl Benchmarker) {
    let frustum = FrustumIntersection::new(&(create_projection_matrix() * create_view_matrix()));
    let centers = create_points();
    benchmarker.benchmark(&mut || {
        centers
            .iter()
            .filter(|center| frustum.test_sphere(center, 1.5))
            .count()
    });
}

pub fn cull_aabs(benchmarker: impl Benchmarker) {
    let frustum = FrustumIntersection::new(&(create_projection_matrix() * create_view_matrix()));
    let centers = create_points();
    let half_extent = Vector3::same(1.0);
    benchmarker.benchmark(&mut || {
        centers
            .iter()
            .filter(|center| frustum.test_aab(&(*center - half_extent), &(*center + half_extent)))
            .count()
    });
}

pub fn cull_aabs_with_matrix(benchmarker: impl Benchmarker) {
    let view_projection = create_projection_matrix() * create_view_matrix();
    let centers = create_points();
    let half_extent = Vector3::same(1.0);
    benchmarker.benchmark(&mut || {
        centers
            .iter()
            .filter(|center| {
                view_projection.test_aab(&(*center - half_extent), &(*center + half_extent))
            })
            .count()
    });
}
