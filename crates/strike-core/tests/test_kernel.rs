mod common;

use approx::assert_abs_diff_eq;
use strike_core::kernel::{extract, extract_with_workers, grayscale, perceptual_lightness};

#[test]
fn test_first_frame_has_no_differences() {
    let frame = common::noise_frame(16, 9, 1);
    let result = extract(&frame, None, 1, 0.5);

    assert_eq!(result.ordinal_number(), 1);
    assert_eq!(result.color_difference(), 0.0);
    assert_eq!(result.binary_threshold_difference(), 0.0);

    let expected = frame
        .chunks_exact(4)
        .map(|px| perceptual_lightness(px[0], px[1], px[2]))
        .sum::<f64>()
        / (16.0 * 9.0);
    assert_abs_diff_eq!(result.brightness(), expected, epsilon = 1e-12);
}

#[test]
fn test_first_frame_ignores_previous() {
    let current = common::solid_frame(4, 4, [200, 10, 10]);
    let previous = common::solid_frame(4, 4, [0, 0, 0]);
    let result = extract(&current, Some(previous.as_slice()), 1, 0.5);
    assert_eq!(result.color_difference(), 0.0);
}

#[test]
fn test_uniform_gray_brightness() {
    let frame = common::solid_frame(8, 8, [128, 128, 128]);
    let result = extract(&frame, None, 1, 0.5);

    let linear = ((128.0 / 255.0 + 0.055) / 1.055f64).powf(2.4);
    let expected = (116.0 * linear.cbrt() - 16.0) / 100.0;
    assert_abs_diff_eq!(result.brightness(), expected, epsilon = 1e-9);
}

#[test]
fn test_dark_pixels_use_linear_segment() {
    // Luminance below the CIE epsilon
    let frame = common::solid_frame(2, 2, [5, 5, 5]);
    let result = extract(&frame, None, 1, 0.5);

    let linear = 5.0 / 255.0 / 12.92;
    assert_abs_diff_eq!(result.brightness(), 903.3 * linear / 100.0, epsilon = 1e-4);
}

#[test]
fn test_identical_frames_have_zero_differences() {
    let frame = common::noise_frame(32, 16, 7);
    let result = extract(&frame, Some(frame.as_slice()), 2, 0.5);
    assert_eq!(result.color_difference(), 0.0);
    assert_eq!(result.binary_threshold_difference(), 0.0);
}

#[test]
fn test_color_difference_scale() {
    let current = common::solid_frame(5, 5, [10, 20, 30]);
    let previous = common::solid_frame(5, 5, [0, 0, 0]);
    let result = extract(&current, Some(previous.as_slice()), 2, 0.5);
    assert_abs_diff_eq!(result.color_difference(), 60.0 / 765.0, epsilon = 1e-12);
    // Both frames stay below the cutoff
    assert_eq!(result.binary_threshold_difference(), 0.0);
}

#[test]
fn test_black_to_white_saturates_differences() {
    let current = common::solid_frame(3, 3, [255, 255, 255]);
    let previous = common::solid_frame(3, 3, [0, 0, 0]);
    let result = extract(&current, Some(previous.as_slice()), 5, 0.5);
    assert_abs_diff_eq!(result.color_difference(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.binary_threshold_difference(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.brightness(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_binary_difference_counts_flipped_pixels() {
    let previous = common::solid_frame(4, 2, [0, 0, 0]);
    let mut current = previous.clone();
    // Turn the first three of eight pixels white
    for px in current.chunks_exact_mut(4).take(3) {
        px[..3].copy_from_slice(&[255, 255, 255]);
    }
    let result = extract(&current, Some(previous.as_slice()), 2, 0.5);
    assert_abs_diff_eq!(result.binary_threshold_difference(), 3.0 / 8.0, epsilon = 1e-12);
}

#[test]
fn test_binary_cutoff_is_inclusive() {
    let gray = [128, 128, 128];
    let cutoff = grayscale(128, 128, 128);
    let previous = common::solid_frame(2, 2, [0, 0, 0]);
    let current = common::solid_frame(2, 2, gray);

    let at_cutoff = extract(&current, Some(previous.as_slice()), 2, cutoff);
    assert_eq!(at_cutoff.binary_threshold_difference(), 1.0);

    let above_cutoff = extract(&current, Some(previous.as_slice()), 2, cutoff + 1e-6);
    assert_eq!(above_cutoff.binary_threshold_difference(), 0.0);
}

#[test]
fn test_worker_count_does_not_change_result() {
    let previous = common::noise_frame(37, 23, 3);
    let current = common::noise_frame(37, 23, 4);

    let reference = extract_with_workers(&current, Some(previous.as_slice()), 9, 0.4, 1);
    for workers in [2, 3, 8, 64, 37 * 23 + 5] {
        let result = extract_with_workers(&current, Some(previous.as_slice()), 9, 0.4, workers);
        assert_eq!(result.ordinal_number(), 9);
        assert_abs_diff_eq!(result.brightness(), reference.brightness(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            result.color_difference(),
            reference.color_difference(),
            epsilon = 1e-12
        );
        assert_eq!(
            result.binary_threshold_difference(),
            reference.binary_threshold_difference()
        );
    }
}

#[test]
fn test_signals_are_normalized() {
    for seed in 0..8 {
        let previous = common::noise_frame(12, 12, seed);
        let current = common::noise_frame(12, 12, seed + 100);
        let f = extract(&current, Some(previous.as_slice()), 2, 0.5);
        for v in [f.brightness(), f.color_difference(), f.binary_threshold_difference()] {
            assert!((0.0..=1.0).contains(&v), "signal {v} out of range");
        }
    }
}

#[test]
#[should_panic]
fn test_mismatched_lengths_panic() {
    let current = common::solid_frame(4, 4, [1, 2, 3]);
    let previous = common::solid_frame(4, 3, [1, 2, 3]);
    let _ = extract(&current, Some(previous.as_slice()), 2, 0.5);
}

#[test]
#[should_panic]
fn test_missing_previous_panics() {
    let current = common::solid_frame(4, 4, [1, 2, 3]);
    let _ = extract(&current, None, 2, 0.5);
}

#[test]
#[should_panic]
fn test_empty_buffer_panics() {
    let _ = extract(&[], None, 1, 0.5);
}

#[test]
#[should_panic]
fn test_partial_pixel_panics() {
    let _ = extract(&[1, 2, 3, 4, 5], None, 1, 0.5);
}

#[test]
#[should_panic]
fn test_zero_workers_panics() {
    let frame = common::solid_frame(2, 2, [0, 0, 0]);
    let _ = extract_with_workers(&frame, None, 1, 0.5, 0);
}
