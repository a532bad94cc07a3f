// src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::GradProbeError;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- Backward Operation Structure ---

/// Backward operation context for element-wise addition.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradProbeError> {
        // d(a+b)/da = 1 and d(a+b)/db = 1: the upstream gradient passes
        // through unchanged to both inputs.
        Ok(vec![grad_output.clone(), grad_output.clone()])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- Forward Operation ---

/// Performs element-wise addition of two tensors of identical shape.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradProbeError> {
    let requires_grad = a.requires_grad() || b.requires_grad();

    let a_guard = a.read_data();
    let b_guard = b.read_data();

    if a_guard.shape != b_guard.shape {
        return Err(GradProbeError::ShapeMismatch {
            expected: a_guard.shape.clone(),
            actual: b_guard.shape.clone(),
            operation: "add_op".to_string(),
        });
    }

    let result_data: Vec<f32> = a_guard
        .buffer
        .iter()
        .zip(b_guard.buffer.iter())
        .map(|(x, y)| x + y)
        .collect();
    let result_shape = a_guard.shape.clone();

    // Drop read locks before touching autograd metadata on the result.
    drop(a_guard);
    drop(b_guard);

    let result = Tensor::new(result_data, result_shape)?;

    // --- Autograd Linkage ---
    if requires_grad {
        let grad_fn: Arc<dyn BackwardOp + Send + Sync> = Arc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
        });
        result.requires_grad_(true)?;
        result.set_grad_fn(Some(grad_fn));
    }

    Ok(result)
}

impl Tensor {
    /// Element-wise addition. See [`add_op`].
    pub fn add(&self, other: &Tensor) -> Result<Tensor, GradProbeError> {
        add_op(self, other)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
