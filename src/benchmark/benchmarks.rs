//! Benchmark functions, each running one operation through a
//! [`Benchmarker`](super::Benchmarker).

pub mod buffer;
pub mod compose;
pub mod frustum;
pub mod invert;
pub mod project;
