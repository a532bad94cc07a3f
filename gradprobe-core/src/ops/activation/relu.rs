// src/ops/activation/relu.rs

use crate::autograd::BackwardOp;
use crate::error::GradProbeError;
use crate::ops::arithmetic::mul_op;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- Backward Operation Structure ---

/// Backward operation context for ReLU.
/// Keeps the forward input: its sign decides where gradient flows.
#[derive(Debug)]
struct ReluBackward {
    input: Tensor,
}

impl BackwardOp for ReluBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradProbeError> {
        // grad_input = grad_output * (input > 0). The derivative at exactly
        // zero is taken as zero.
        let input_guard = self.input.read_data();
        let mask_data: Vec<f32> = input_guard
            .buffer
            .iter()
            .map(|&x| if x > 0.0 { 1.0 } else { 0.0 })
            .collect();
        let mask_shape = input_guard.shape.clone();
        drop(input_guard);

        let mask = Tensor::new(mask_data, mask_shape)?;
        let grad_input = mul_op(grad_output, &mask)?;
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

// --- Forward Operation ---

/// Applies the Rectified Linear Unit element-wise: `relu(x) = max(0, x)`.
pub fn relu_op(input: &Tensor) -> Result<Tensor, GradProbeError> {
    let requires_grad = input.requires_grad();

    let input_guard = input.read_data();
    let result_data: Vec<f32> = input_guard
        .buffer
        .iter()
        .map(|&x| if x > 0.0 { x } else { 0.0 })
        .collect();
    let result_shape = input_guard.shape.clone();
    drop(input_guard);

    let result = Tensor::new(result_data, result_shape)?;

    // --- Autograd Linkage ---
    if requires_grad {
        let grad_fn: Arc<dyn BackwardOp + Send + Sync> = Arc::new(ReluBackward {
            input: input.clone(),
        });
        result.requires_grad_(true)?;
        result.set_grad_fn(Some(grad_fn));
    }

    Ok(result)
}

impl Tensor {
    /// Applies ReLU element-wise. See [`relu_op`].
    pub fn relu(&self) -> Result<Tensor, GradProbeError> {
        relu_op(self)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
