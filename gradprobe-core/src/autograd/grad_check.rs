// src/autograd/grad_check.rs
//! Numerical gradient checking via central differences.
//!
//! Used by op tests to validate the analytical gradients produced by the
//! `BackwardOp` implementations against a finite-difference estimate.

use crate::error::GradProbeError;
use crate::tensor::Tensor;
use num_traits::Float;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: analytical grad {analytical_grad} != numerical grad {numerical_grad}. Difference: {difference}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f32,
        numerical_grad: f32,
        difference: f32,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(GradProbeError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(GradProbeError),

    #[error("Gradient check requires a scalar output, got {numel} elements.")]
    NonScalarOutput { numel: usize },

    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },

    #[error("Gradient check input tensor {input_index} must require grad.")]
    InputRequiresGrad { input_index: usize },

    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(GradProbeError),
}

impl From<GradProbeError> for GradCheckError {
    fn from(err: GradProbeError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Scale-aware comparison of an analytical and a numerical derivative.
fn within_tolerance<F: Float>(analytical: F, numerical: F, tolerance: F) -> bool {
    let diff = (analytical - numerical).abs();
    let scale = F::one().max(analytical.abs().max(numerical.abs()));
    diff <= tolerance * scale
}

/// Checks the analytical gradients of `func` against central differences.
///
/// `func` must build its output from the given leaf `inputs` (all requiring
/// grad) and reduce it to a scalar. The check runs one backward pass to
/// collect analytical gradients, then perturbs each input element by
/// `±epsilon` and compares `(loss(+) - loss(-)) / (2 * epsilon)` against the
/// analytical value with the given relative `tolerance`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f32,
    tolerance: f32,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GradProbeError>,
{
    for (input_index, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index });
        }
        if !input.requires_grad() {
            return Err(GradCheckError::InputRequiresGrad { input_index });
        }
        input.zero_grad();
    }

    // --- Analytical gradients ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if output.numel() != 1 {
        return Err(GradCheckError::NonScalarOutput {
            numel: output.numel(),
        });
    }
    output
        .backward(None)
        .map_err(GradCheckError::BackwardPassError)?;

    let mut analytical: Vec<Vec<f32>> = Vec::with_capacity(inputs.len());
    for (input_index, input) in inputs.iter().enumerate() {
        match input.grad() {
            Some(grad) => analytical.push(grad.to_vec()),
            None => return Err(GradCheckError::MissingAnalyticalGrad { input_index }),
        }
    }

    // --- Numerical gradients by central differences ---
    for (input_index, input) in inputs.iter().enumerate() {
        for element_index in 0..input.numel() {
            let original = input.get_value(element_index)?;

            input.set_value(element_index, original + epsilon)?;
            let loss_plus = func(inputs)
                .map_err(GradCheckError::ForwardPassError)?
                .item()?;

            input.set_value(element_index, original - epsilon)?;
            let loss_minus = func(inputs)
                .map_err(GradCheckError::ForwardPassError)?
                .item()?;

            input.set_value(element_index, original)?;

            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical[input_index][element_index];

            if !within_tolerance(analytical_grad, numerical_grad, tolerance) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad,
                    numerical_grad,
                    difference: (analytical_grad - numerical_grad).abs(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::activation::relu_op;
    use crate::ops::arithmetic::{add_op, mul_op};
    use crate::ops::reduction::sum_op;
    use crate::tensor::Tensor;

    fn leaf(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
        let t = Tensor::new(data, shape).unwrap();
        t.requires_grad_(true).unwrap();
        t
    }

    #[test]
    fn test_check_grad_passes_for_composite_expression() {
        // Inputs chosen away from relu's kink at zero.
        let x = leaf(vec![3.0, -2.0], vec![2]);
        let w = leaf(vec![2.0, 0.5], vec![2]);
        let b = leaf(vec![1.0, 0.5], vec![2]);

        let result = check_grad(
            |inputs| {
                let u = mul_op(&inputs[0], &inputs[1])?;
                let v = add_op(&u, &inputs[2])?;
                let a = relu_op(&v)?;
                sum_op(&a)
            },
            &[x, w, b],
            1e-2,
            1e-3,
        );
        assert!(result.is_ok(), "grad check failed: {:?}", result.err());
    }

    #[test]
    fn test_check_grad_rejects_non_leaf_input() {
        let x = leaf(vec![1.0], vec![1]);
        let y = add_op(&x, &x).unwrap();
        let result = check_grad(|inputs| sum_op(&inputs[0]), &[y], 1e-2, 1e-3);
        assert_eq!(result, Err(GradCheckError::InputNotLeaf { input_index: 0 }));
    }

    #[test]
    fn test_check_grad_rejects_non_scalar_output() {
        let x = leaf(vec![1.0, 2.0], vec![2]);
        let result = check_grad(|inputs| add_op(&inputs[0], &inputs[0]), &[x], 1e-2, 1e-3);
        assert_eq!(result, Err(GradCheckError::NonScalarOutput { numel: 2 }));
    }
}
