// src/ops/arithmetic/mul.rs

use crate::autograd::BackwardOp;
use crate::error::GradProbeError;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- Backward Operation Structure ---

/// Backward operation context for element-wise multiplication.
/// Stores clones of both inputs: each one is the other's local derivative.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradProbeError> {
        // grad_a = grad_output * b, grad_b = grad_output * a.
        // The stored operands are detached so the gradients themselves do not
        // extend the computation graph.
        let grad_a = mul_op(grad_output, &self.b.detach())?;
        let grad_b = mul_op(grad_output, &self.a.detach())?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- Forward Operation ---

/// Performs element-wise multiplication of two tensors of identical shape.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradProbeError> {
    let requires_grad = a.requires_grad() || b.requires_grad();

    let a_guard = a.read_data();
    let b_guard = b.read_data();

    if a_guard.shape != b_guard.shape {
        return Err(GradProbeError::ShapeMismatch {
            expected: a_guard.shape.clone(),
            actual: b_guard.shape.clone(),
            operation: "mul_op".to_string(),
        });
    }

    let result_data: Vec<f32> = a_guard
        .buffer
        .iter()
        .zip(b_guard.buffer.iter())
        .map(|(x, y)| x * y)
        .collect();
    let result_shape = a_guard.shape.clone();

    drop(a_guard);
    drop(b_guard);

    let result = Tensor::new(result_data, result_shape)?;

    // --- Autograd Linkage ---
    if requires_grad {
        let grad_fn: Arc<dyn BackwardOp + Send + Sync> = Arc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
        });
        result.requires_grad_(true)?;
        result.set_grad_fn(Some(grad_fn));
    }

    Ok(result)
}

impl Tensor {
    /// Element-wise multiplication. See [`mul_op`].
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, GradProbeError> {
        mul_op(self, other)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
