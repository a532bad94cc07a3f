use thiserror::Error;

/// Custom error type for the GradProbe autodiff core.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum GradProbeError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index {index} out of bounds for tensor with {numel} elements")]
    IndexOutOfBounds { index: usize, numel: usize },

    #[error("Cannot convert tensor with {numel} elements to a scalar")]
    NotAScalar { numel: usize },

    #[error("Operation requires tensor to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("Cannot change requires_grad on a non-leaf tensor. Use .detach() first.")]
    RequiresGradOnNonLeaf,

    #[error("Backward called on non-scalar tensor without explicit gradient.")]
    BackwardNonScalar,

    #[error("Cannot register a hook on a tensor that does not require grad.")]
    HookRequiresGrad,

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,

    #[error("Internal error: {0}")]
    InternalError(String),
}
