//! Benchmarks for writing matrices to buffers.

use super::compose::create_affine_matrix;
use crate::benchmark::Benchmarker;

const MATRIX_COUNT: usize = 256;

pub fn write_to_slice(benchmarker: impl Benchmarker) {
    let matrix = create_affine_matrix();
    let mut buffer = vec![0.0_f64; 16 * MATRIX_COUNT];
    benchmarker.benchmark(&mut || {
        (0..MATRIX_COUNT).try_for_each(|idx| matrix.write_to_slice(&mut buffer, 16 * idx))
    });
}

pub fn write_to_slice_f32(benchmarker: impl Benchmarker) {
    let matrix = create_affine_matrix();
    let mut buffer = vec![0.0_f32; 16 * MATRIX_COUNT];
    benchmarker.benchmark(&mut || {
        (0..MATRIX_COUNT).try_for_each(|idx| matrix.write_to_slice_f32(&mut buffer, 16 * idx))
    });
}

pub fn write_transposed_to_slice_f32(benchmarker: impl Benchmarker) {
    let matrix = create_affine_matrix();
    let mut buffer = vec![0.0_f32; 16 * MATRIX_COUNT];
    benchmarker.benchmark(&mut || {
        (0..MATRIX_COUNT).try_for_each(|idx| {
            matrix.write_transposed_to_slice_f32(&mut buffer, 16 * idx)
        })
    });
}
