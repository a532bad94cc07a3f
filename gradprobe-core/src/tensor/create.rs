// src/tensor/create.rs
//! Tensor creation functions.

use crate::error::GradProbeError;
use crate::tensor::Tensor;

/// Creates a tensor of the given shape filled with `value`.
pub fn full(shape: Vec<usize>, value: f32) -> Result<Tensor, GradProbeError> {
    let numel: usize = shape.iter().product();
    Tensor::new(vec![value; numel], shape)
}

/// Creates a tensor of the given shape filled with zeros.
pub fn zeros(shape: Vec<usize>) -> Result<Tensor, GradProbeError> {
    full(shape, 0.0)
}

/// Creates a tensor of the given shape filled with ones.
pub fn ones(shape: Vec<usize>) -> Result<Tensor, GradProbeError> {
    full(shape, 1.0)
}

/// Creates a tensor with the same shape as `tensor`, filled with `value`.
pub fn full_like(tensor: &Tensor, value: f32) -> Result<Tensor, GradProbeError> {
    full(tensor.shape(), value)
}

/// Creates a tensor of zeros with the same shape as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, GradProbeError> {
    full_like(tensor, 0.0)
}

/// Creates a tensor of ones with the same shape as `tensor`.
/// The backward pass uses this to seed the gradient of a scalar output.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, GradProbeError> {
    full_like(tensor, 1.0)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
