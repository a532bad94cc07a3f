//! Reverse-mode automatic differentiation.
//!
//! Forward operations (see [`crate::ops`]) record a [`BackwardOp`] node in
//! their result tensor's `grad_fn`, implicitly building the computation
//! graph. [`crate::tensor::Tensor::backward`] then walks that graph in
//! reverse topological order, accumulating gradients, firing registered
//! hooks, and retaining gradients on leaves (and on non-leaves that asked
//! for it via `retain_grad`).

pub mod backward_op;
pub mod grad_check;
pub mod graph;
pub mod hooks;

pub use backward_op::BackwardOp;
pub use grad_check::{check_grad, GradCheckError};
pub use hooks::HookHandle;
