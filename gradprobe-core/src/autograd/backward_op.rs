// src/autograd/backward_op.rs

use crate::error::GradProbeError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable operation.
///
/// Any operation that creates a non-leaf `Tensor` (a tensor resulting from an
/// operation on inputs that require gradients) has an associated `BackwardOp`
/// implementation. It is stored in the output tensor's `grad_fn` field and is
/// used during `backward()` to propagate gradients according to the chain
/// rule.
///
/// The trait requires `Debug + Send + Sync` because the `Arc<dyn BackwardOp>`
/// holding the context is shared and may be accessed across threads.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes the gradients of the operation's inputs, given the gradient
    /// of the operation's output (`grad_output`, i.e. dL/dOutput).
    ///
    /// The returned vector holds dL/dInput_i for each input, in the same
    /// order as [`BackwardOp::inputs`]. Each gradient has the same shape as
    /// the corresponding input.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradProbeError>;

    /// Returns handles to the input tensors of the forward operation.
    ///
    /// These are cheap `Arc` clones of the tensors the context already holds;
    /// their shared pointer is what identifies the predecessor nodes during
    /// graph traversal. The order **must** match the gradients returned by
    /// [`BackwardOp::backward`].
    fn inputs(&self) -> Vec<Tensor>;
}
