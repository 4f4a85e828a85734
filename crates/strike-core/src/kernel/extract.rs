use std::ops::Range;

use rayon::prelude::*;

use crate::consts::{BYTES_PER_PIXEL, MAX_COLOR_DELTA};
use crate::frame::Frame;

use super::lightness::{binarize, perceptual_lightness};

/// Per-worker accumulators. Combining is associative, so totals do not
/// depend on worker count beyond floating-point summation order.
#[derive(Clone, Copy, Debug, Default)]
struct PartialSums {
    brightness: f64,
    color_difference: f64,
    flipped: u64,
}

impl PartialSums {
    fn combine(self, other: Self) -> Self {
        Self {
            brightness: self.brightness + other.brightness,
            color_difference: self.color_difference + other.color_difference,
            flipped: self.flipped + other.flipped,
        }
    }
}

/// Compute the three frame signals from RGBA pixel buffers, using one
/// worker per available hardware thread.
///
/// `previous` must be `Some` for every ordinal after the first. For the
/// first frame it is ignored and both difference signals are 0.
///
/// # Panics
/// Panics on an empty buffer, a length that is not a multiple of 4, a
/// previous buffer of different length, or a missing previous buffer for
/// ordinals after the first.
pub fn extract(
    current: &[u8],
    previous: Option<&[u8]>,
    ordinal_number: u32,
    binary_threshold: f64,
) -> Frame {
    extract_with_workers(
        current,
        previous,
        ordinal_number,
        binary_threshold,
        rayon::current_num_threads(),
    )
}

/// [`extract`] with an explicit worker count.
///
/// # Panics
/// See [`extract`]; also panics if `workers` is zero.
pub fn extract_with_workers(
    current: &[u8],
    previous: Option<&[u8]>,
    ordinal_number: u32,
    binary_threshold: f64,
    workers: usize,
) -> Frame {
    assert!(workers > 0, "kernel needs at least one worker");
    assert!(
        !current.is_empty() && current.len() % BYTES_PER_PIXEL == 0,
        "pixel buffer must hold a positive number of RGBA pixels, got {} bytes",
        current.len()
    );
    let previous = if ordinal_number <= 1 {
        None
    } else {
        let prev = previous.expect("previous frame required after the first ordinal");
        assert_eq!(
            prev.len(),
            current.len(),
            "current and previous pixel buffers differ in length"
        );
        Some(prev)
    };

    let pixel_count = current.len() / BYTES_PER_PIXEL;
    let totals = worker_ranges(pixel_count, workers)
        .into_par_iter()
        .map(|range| accumulate(current, previous, range, binary_threshold))
        .reduce(PartialSums::default, PartialSums::combine);

    let n = pixel_count as f64;
    Frame::new(
        ordinal_number,
        totals.brightness / n,
        totals.color_difference / n,
        totals.flipped as f64 / n,
    )
}

/// Split `pixel_count` pixels into `workers` contiguous ranges. The last
/// range absorbs the division remainder.
pub fn worker_ranges(pixel_count: usize, workers: usize) -> Vec<Range<usize>> {
    let chunk = pixel_count / workers;
    (0..workers)
        .map(|w| {
            let start = w * chunk;
            let end = if w + 1 == workers { pixel_count } else { start + chunk };
            start..end
        })
        .collect()
}

fn accumulate(
    current: &[u8],
    previous: Option<&[u8]>,
    range: Range<usize>,
    binary_threshold: f64,
) -> PartialSums {
    let bytes = range.start * BYTES_PER_PIXEL..range.end * BYTES_PER_PIXEL;
    let cur = &current[bytes.clone()];
    let mut sums = PartialSums::default();

    match previous {
        None => {
            for px in cur.chunks_exact(BYTES_PER_PIXEL) {
                sums.brightness += perceptual_lightness(px[0], px[1], px[2]);
            }
        }
        Some(previous) => {
            let prev = &previous[bytes];
            for (px, pv) in cur
                .chunks_exact(BYTES_PER_PIXEL)
                .zip(prev.chunks_exact(BYTES_PER_PIXEL))
            {
                sums.brightness += perceptual_lightness(px[0], px[1], px[2]);

                let delta = px[0].abs_diff(pv[0]) as u32
                    + px[1].abs_diff(pv[1]) as u32
                    + px[2].abs_diff(pv[2]) as u32;
                sums.color_difference += delta as f64 / MAX_COLOR_DELTA;

                if binarize(px[0], px[1], px[2], binary_threshold)
                    != binarize(pv[0], pv[1], pv[2], binary_threshold)
                {
                    sums.flipped += 1;
                }
            }
        }
    }
    sums
}
