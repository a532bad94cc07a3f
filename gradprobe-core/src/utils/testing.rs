// src/utils/testing.rs
//! Assertion helpers shared by unit and integration tests.

use crate::tensor::Tensor;
use approx::relative_eq;

/// Asserts that `tensor` has the expected shape and that every element is
/// within `epsilon` (absolute and relative) of the expected data.
///
/// Panics with a descriptive message on mismatch; intended for tests.
pub fn check_tensor_near(tensor: &Tensor, expected_shape: &[usize], expected_data: &[f32], epsilon: f32) {
    assert_eq!(
        tensor.shape(),
        expected_shape,
        "Shape mismatch: expected {:?}, got {:?}",
        expected_shape,
        tensor.shape()
    );

    let actual_data = tensor.to_vec();
    assert_eq!(
        actual_data.len(),
        expected_data.len(),
        "Data length mismatch: expected {}, got {}",
        expected_data.len(),
        actual_data.len()
    );

    for (i, (actual, expected)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        assert!(
            relative_eq!(*actual, *expected, epsilon = epsilon, max_relative = epsilon),
            "Element {} mismatch: expected {}, got {} (epsilon {})",
            i,
            expected,
            actual,
            epsilon
        );
    }
}

/// Asserts that a one-element tensor holds a value near `expected`.
pub fn check_scalar_near(tensor: &Tensor, expected: f32, epsilon: f32) {
    let actual = tensor
        .item()
        .expect("check_scalar_near requires a one-element tensor");
    assert!(
        relative_eq!(actual, expected, epsilon = epsilon, max_relative = epsilon),
        "Scalar mismatch: expected {}, got {} (epsilon {})",
        expected,
        actual,
        epsilon
    );
}
