//! Benchmarks for matrix composition.

use crate::{
    angle::Degrees,
    benchmark::Benchmarker,
    matrix4::{DepthRange, Handedness, Matrix4},
    quaternion::Quaternion,
    vector::Vector3,
};

pub fn mul_general(benchmarker: impl Benchmarker) {
    let a = create_general_matrix();
    let b = create_general_matrix();
    benchmarker.benchmark(&mut || a.mul_general(&b));
}

pub fn mul_affine(benchmarker: impl Benchmarker) {
    let a = create_affine_matrix();
    let b = create_affine_matrix();
    benchmarker.benchmark(&mut || a.mul_affine(&b));
}

pub fn mul_dispatched_affine(benchmarker: impl Benchmarker) {
    let a = create_affine_matrix();
    let b = create_affine_matrix();
    benchmarker.benchmark(&mut || a * b);
}

pub fn mul_translation_affine(benchmarker: impl Benchmarker) {
    let a = Matrix4::from_translation(&Vector3::new(1.0, -2.0, 3.0));
    let b = create_affine_matrix();
    benchmarker.benchmark(&mut || a.mul_translation_affine(&b));
}

pub fn mul_perspective_affine(benchmarker: impl Benchmarker) {
    let a = Matrix4::perspective(
        Degrees(70.0),
        16.0 / 9.0,
        0.1,
        100.0,
        Handedness::Right,
        DepthRange::ZeroToOne,
    );
    let b = create_affine_matrix();
    benchmarker.benchmark(&mut || a.mul_perspective_affine(&b));
}

pub fn translate_rotate_scale(benchmarker: impl Benchmarker) {
    let a = create_affine_matrix();
    benchmarker.benchmark(&mut || {
        a.translated(&Vector3::new(0.5, 0.5, 0.5))
            .rotated_y(Degrees(15.0))
            .scaled(&Vector3::same(1.1))
    });
}

pub fn reflect_rotate_around(benchmarker: impl Benchmarker) {
    let a = create_affine_matrix();
    let rotation = Quaternion::from_axis_angle(&Vector3::unit_y(), Degrees(30.0));
    let pivot = Vector3::new(1.0, 0.0, -2.0);
    benchmarker.benchmark(&mut || {
        a.reflected(&Vector3::unit_y(), &Vector3::zeros())
            .rotated_around(&rotation, &pivot)
    });
}

pub(super) fn create_affine_matrix() -> Matrix4 {
    Matrix4::from_translation(&Vector3::new(2.0, -1.0, 0.5))
        .rotated(&Vector3::new(1.0, 2.0, -0.5).normalized(), Degrees(40.0))
        .scaled(&Vector3::new(1.5, 0.8, 2.0))
}

pub(super) fn create_general_matrix() -> Matrix4 {
    Matrix4::new(
        1.0, 0.3, -0.2, 0.01, 0.4, 1.2, 0.1, -0.02, -0.3, 0.2, 0.9, 0.03, 2.0, -1.0, 0.5, 1.0,
    )
}
