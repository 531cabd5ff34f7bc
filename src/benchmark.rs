//! Benchmarking of matrix operations.

pub mod benchmarks;
#[cfg(feature = "criterion")]
pub mod criterion;

use std::{
    hint::black_box,
    time::{Duration, Instant},
};

/// Runs a benchmark closure, either repeatedly for a fixed duration or under
/// the control of a benchmarking framework.
pub trait Benchmarker {
    fn benchmark<T>(self, f: &mut impl FnMut() -> T);
}

/// Runs the closure in a loop until the given duration has passed, always
/// at least once.
#[derive(Clone, Debug)]
pub struct BasicBenchmarker {
    duration: Duration,
    delayer: Delayer,
}

/// Holds back the start of a benchmark until a minimum time has passed since
/// program start, which gives an external profiler time to attach.
#[derive(Clone, Debug)]
pub struct Delayer {
    program_start: Instant,
    delay: Duration,
}

impl BasicBenchmarker {
    pub fn new(duration: Duration, delayer: Delayer) -> Self {
        Self { duration, delayer }
    }
}

impl Benchmarker for BasicBenchmarker {
    fn benchmark<T>(self, f: &mut impl FnMut() -> T) {
        self.delayer.wait();
        let start = Instant::now();
        let mut iterations: u64 = 0;
        loop {
            black_box(f());
            iterations += 1;

            if start.elapsed() > self.duration {
                break;
            }
        }
        let elapsed = start.elapsed();
        log::debug!(
            "Completed {} iterations, {:.1} ns per iteration",
            iterations,
            elapsed.as_secs_f64() * 1e9 / iterations as f64
        );
    }
}

impl Delayer {
    pub fn new(program_start: Instant, delay_seconds: f64) -> Self {
        Self {
            program_start,
            delay: Duration::from_secs_f64(delay_seconds),
        }
    }

    fn wait(self) {
        let remaining = self.delay.saturating_sub(self.program_start.elapsed());
        if remaining > Duration::ZERO {
            log::trace!("Delaying benchmark by {:.2} s", remaining.as_secs_f64());
            std::thread::sleep(remaining);
        }
    }
}

macro_rules! define_target_enum {
(
    $name:ident,
    $benchmarks_mod:path,
    $(
        $module:ident => {
            $($func:ident),* $(,)?
        }
    ),* $(,)?
) => {
    ::pastey::paste! {
        /// A benchmark that can be run with [`benchmark`].
        #[allow(clippy::enum_variant_names)]
        #[cfg_attr(feature = "cli", derive(::clap::ValueEnum))]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
        pub enum $name {
            $(
                $( [<$module:camel $func:camel>] ),*
            ),*
        }

        impl $name {
            pub const ALL: &[Self] = &[
                $(
                    $( Self::[<$module:camel $func:camel>], )*
                )*
            ];

            pub fn execute(&self, benchmarker: impl Benchmarker) {
                match self {
                    $(
                        $( Self::[<$module:camel $func:camel>] => $benchmarks_mod::$module::$func(benchmarker), )*
                    )*
                }
            }
        }
    }};
}

define_target_enum! {
    Target,
    crate::benchmark::benchmarks,
    compose => {
        mul_general,
        mul_affine,
        mul_dispatched_affine,
        mul_translation_affine,
        mul_perspective_affine,
        translate_rotate_scale,
        reflect_rotate_around,
    },
    invert => {
        invert_general,
        invert_affine,
        invert_affine_unit_scale,
        invert_perspective,
        invert_perspective_view,
    },
    project => {
        build_perspective,
        build_look_at,
        transform_project_points,
        unproject_ray,
    },
    frustum => {
        extract_frustum_planes,
        cull_spheres,
        cull_aabs,
        cull_aabs_with_matrix,
    },
    buffer => {
        write_to_slice,
        write_to_slice_f32,
        write_transposed_to_slice_f32,
    },
}

/// Runs the given target repeatedly for `duration` seconds, starting no
/// earlier than `delay` seconds after the call.
pub fn benchmark(target: Target, duration: f64, delay: f64) {
    let start = Instant::now();

    let delayer = Delayer::new(start, delay);
    let duration = Duration::from_secs_f64(duration);

    let benchmarker = BasicBenchmarker::new(duration, delayer);

    with_timing_info_logging!("Benchmark {:?}", target; {
        target.execute(benchmarker);
    });
}
