// src/ops/reduction/sum.rs

use crate::autograd::BackwardOp;
use crate::error::GradProbeError;
use crate::tensor::create::full;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- Backward Operation Structure ---

/// Backward operation context for the full sum reduction.
#[derive(Debug)]
struct SumBackward {
    input: Tensor,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradProbeError> {
        // d(sum)/dx_i = 1 for every element: broadcast the scalar upstream
        // gradient back to the input shape.
        let grad_value = grad_output.item()?;
        let grad_input = full(self.input.shape(), grad_value)?;
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

// --- Forward Operation ---

/// Sums all elements of `input` into a scalar tensor (empty shape).
///
/// This is the canonical way to reduce a non-scalar chain to a value on
/// which `backward()` can be called without an explicit seed gradient.
pub fn sum_op(input: &Tensor) -> Result<Tensor, GradProbeError> {
    let requires_grad = input.requires_grad();

    let input_guard = input.read_data();
    let sum_val: f32 = input_guard.buffer.iter().sum();
    drop(input_guard);

    let result = Tensor::new(vec![sum_val], vec![])?;

    // --- Autograd Linkage ---
    if requires_grad {
        let grad_fn: Arc<dyn BackwardOp + Send + Sync> = Arc::new(SumBackward {
            input: input.clone(),
        });
        result.requires_grad_(true)?;
        result.set_grad_fn(Some(grad_fn));
    }

    Ok(result)
}

impl Tensor {
    /// Sums all elements into a scalar. See [`sum_op`].
    pub fn sum(&self) -> Result<Tensor, GradProbeError> {
        sum_op(self)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
