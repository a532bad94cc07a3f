// src/tensor/debug.rs

use crate::tensor::Tensor;
use std::fmt;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tensor")
            .field("shape", &guard.shape)
            .field("data", &guard.buffer)
            .field("requires_grad", &guard.requires_grad)
            .field("grad_fn", &guard.grad_fn.as_ref().map(|_| "BackwardOp"))
            .finish()
    }
}
