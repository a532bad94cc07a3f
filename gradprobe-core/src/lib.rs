//! # gradprobe-core
//!
//! A minimal reverse-mode autodiff core built to make one thing easy to see:
//! how the partial derivatives of *intermediate* (non-leaf) variables can be
//! read out of a computation graph, either by retaining them
//! ([`Tensor::retain_grad`]) or by observing them as they flow
//! ([`Tensor::register_hook`], [`GradRecorder`]).

pub mod autograd;
pub mod error;
pub mod ops;
pub mod recorder;
pub mod tensor;
pub mod tensor_data;
pub mod utils;

pub use autograd::HookHandle;
pub use error::GradProbeError;
pub use recorder::GradRecorder;
pub use tensor::Tensor;
