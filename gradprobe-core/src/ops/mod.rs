//! # Tensor Operations Module (`ops`)
//!
//! Operations are grouped into submodules by functionality. Each operation
//! has a core `xxx_op` function performing the forward computation and, when
//! an input requires grad, linking the result into the autograd graph via a
//! `XxxBackward` struct implementing
//! [`BackwardOp`](crate::autograd::BackwardOp). Convenience methods on
//! [`Tensor`](crate::tensor::Tensor) (e.g. `t.relu()`) are defined next to
//! their `_op` function.
//!
//! ## Submodules:
//!
//! - [`arithmetic`]: element-wise arithmetic (add, mul).
//! - [`activation`]: activation functions (relu).
//! - [`reduction`]: reductions (sum to a scalar).

pub mod activation;
pub mod arithmetic;
pub mod reduction;
