//! Benchmarks for matrix inversion.

use super::compose::{create_affine_matrix, create_general_matrix};
use crate::{
    angle::Degrees,
    benchmark::Benchmarker,
    matrix4::{DepthRange, Handedness, Matrix4},
    vector::Vector3,
};

pub fn invert_general(benchmarker: impl Benchmarker) {
    let a = create_general_matrix();
    benchmarker.benchmark(&mut || a.inverse_general());
}

pub fn invert_affine(benchmarker: impl Benchmarker) {
    let a = create_affine_matrix();
    benchmarker.benchmark(&mut || a.inverse_affine());
}

pub fn invert_affine_unit_scale(benchmarker: impl Benchmarker) {
    let a = create_view_matrix();
    benchmarker.benchmark(&mut || a.inverse_affine_unit_scale());
}

pub fn invert_perspective(benchmarker: impl Benchmarker) {
    let a = create_projection_matrix();
    benchmarker.benchmark(&mut || a.inverse_perspective());
}

pub fn invert_perspective_view(benchmarker: impl Benchmarker) {
    let projection = create_projection_matrix();
    let view = create_view_matrix();
    benchmarker.benchmark(&mut || projection.inverse_perspective_view(&view));
}

pub(super) fn create_projection_matrix() -> Matrix4 {
    Matrix4::perspective(
        Degrees(60.0),
        4.0 / 3.0,
        0.1,
        500.0,
        Handedness::Right,
        DepthRange::NegativeOneToOne,
    )
}

pub(super) fn create_view_matrix() -> Matrix4 {
    Matrix4::look_at(
        &Vector3::new(10.0, 4.0, -3.0),
        &Vector3::zeros(),
        &Vector3::unit_y(),
        Handedness::Right,
    )
}
