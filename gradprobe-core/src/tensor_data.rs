// src/tensor_data.rs

use std::fmt;
use std::sync::Arc;

use crate::autograd::hooks::HookEntry;
use crate::autograd::BackwardOp;
use crate::error::GradProbeError;
use crate::tensor::Tensor;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the actual data buffer, the shape, and all
/// autograd-related bookkeeping. It is wrapped in `Arc<RwLock<TensorData>>`
/// by the `Tensor` struct to allow shared ownership and interior mutability.
pub struct TensorData {
    /// The underlying f32 data buffer, in row-major order.
    /// Wrapped in Arc so cheap clones (e.g. `detach`) can share it.
    pub(crate) buffer: Arc<Vec<f32>>,
    /// The shape (dimensions) of the tensor. An empty shape denotes a scalar.
    pub(crate) shape: Vec<usize>,

    // --- Autograd Metadata ---
    /// Flag indicating if the tensor participates in gradient computation.
    /// If true, operations involving this tensor are tracked in the graph.
    pub(crate) requires_grad: bool,
    /// Whether a non-leaf tensor keeps its gradient after `backward()`.
    /// Leaf tensors always keep theirs; see `Tensor::retain_grad`.
    pub(crate) retains_grad: bool,
    /// The gradient tensor, populated during the backward pass.
    /// Same shape as this tensor.
    pub(crate) grad: Option<Tensor>,
    /// The backward operation node that produced this tensor, linking it to
    /// the computation graph. Leaf tensors have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp + Send + Sync>>,
    /// Gradient hooks registered on this tensor, in registration order.
    pub(crate) hooks: Vec<HookEntry>,
    /// Identifier for the next hook registered on this tensor.
    pub(crate) next_hook_id: usize,
}

impl TensorData {
    /// Creates a new `TensorData` with the given data and shape.
    ///
    /// Takes ownership of the data vector and initializes all autograd
    /// metadata to its inert state (`requires_grad = false`, no grad, no
    /// grad_fn, no hooks).
    ///
    /// # Errors
    /// Returns `GradProbeError::TensorCreationError` if the length of
    /// `data_vec` does not match the number of elements implied by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradProbeError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(GradProbeError::TensorCreationError { data_len, shape });
        }

        Ok(TensorData {
            buffer: Arc::new(data_vec),
            shape,
            requires_grad: false,
            retains_grad: false,
            grad: None,
            grad_fn: None,
            hooks: Vec::new(),
            next_hook_id: 0,
        })
    }

    /// Creates a scalar `TensorData` (empty shape, one element).
    /// Cannot fail, so it skips the length validation of `new`.
    pub(crate) fn from_scalar(value: f32) -> Self {
        TensorData {
            buffer: Arc::new(vec![value]),
            shape: Vec::new(),
            requires_grad: false,
            retains_grad: false,
            grad: None,
            grad_fn: None,
            hooks: Vec::new(),
            next_hook_id: 0,
        }
    }

    /// The number of elements in the tensor. A scalar has numel 1.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Whether this tensor is a leaf of the computation graph.
    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }
}

// Manual Debug: hook callbacks are not Debug, summarize them instead.
impl fmt::Debug for TensorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorData")
            .field("shape", &self.shape)
            .field("data", &self.buffer)
            .field("requires_grad", &self.requires_grad)
            .field("retains_grad", &self.retains_grad)
            .field("grad", &self.grad.is_some())
            .field("grad_fn", &self.grad_fn)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
