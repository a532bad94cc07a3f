// src/tensor/mod.rs

use crate::error::GradProbeError;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock};

// --- Implementation modules ---
mod autograd_methods;
mod debug;
pub mod create;

// Re-export creation functions so they are reachable as `tensor::zeros` etc.
pub use create::{full, full_like, ones, ones_like, zeros, zeros_like};

/// A CPU tensor of `f32` values participating in a reverse-mode autodiff graph.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** Multiple `Tensor` instances can point to the same
///     underlying data without cloning the data itself (cheap clones).
/// 2.  **Interior Mutability:** Autograd metadata (like `requires_grad` or
///     `grad`) can be modified through an immutable `Tensor` reference, using
///     the `RwLock`. Read/write locks keep this thread safe.
///
/// The `Arc` pointer doubles as the tensor's identity in the computation
/// graph: two `Tensor` handles are the same graph node iff they share it.
pub struct Tensor {
    /// Arc for shared ownership, RwLock for interior mutability of TensorData.
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new tensor with the given data and shape.
    ///
    /// This is the primary constructor for creating tensors from raw data.
    /// The data is expected in flattened, row-major order. An empty shape
    /// denotes a scalar holding exactly one value.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradProbeError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        })
    }

    /// Creates a scalar tensor (empty shape) holding `value`.
    pub fn scalar(value: f32) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(TensorData::from_scalar(value))),
        }
    }

    /// Returns a clone of the tensor's shape (`Vec<usize>`).
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns a copy of the tensor's data as a flat `Vec<f32>`.
    pub fn to_vec(&self) -> Vec<f32> {
        self.read_data().buffer.as_ref().clone()
    }

    /// Returns the single value held by a one-element tensor.
    ///
    /// # Errors
    /// Returns `GradProbeError::NotAScalar` if the tensor holds more (or
    /// fewer) than one element.
    pub fn item(&self) -> Result<f32, GradProbeError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(GradProbeError::NotAScalar {
                numel: guard.numel(),
            });
        }
        Ok(guard.buffer[0])
    }

    /// Reads a single element from the flat buffer.
    /// Used by the numerical gradient checker.
    pub(crate) fn get_value(&self, index: usize) -> Result<f32, GradProbeError> {
        let guard = self.read_data();
        guard
            .buffer
            .get(index)
            .copied()
            .ok_or(GradProbeError::IndexOutOfBounds {
                index,
                numel: guard.numel(),
            })
    }

    /// Overwrites a single element of the flat buffer (copy-on-write when the
    /// buffer is shared). Used by the numerical gradient checker to perturb
    /// leaf inputs.
    pub(crate) fn set_value(&self, index: usize, value: f32) -> Result<(), GradProbeError> {
        let mut guard = self.write_data();
        let numel = guard.numel();
        if index >= numel {
            return Err(GradProbeError::IndexOutOfBounds { index, numel });
        }
        Arc::make_mut(&mut guard.buffer)[index] = value;
        Ok(())
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// The lock is automatically released when the guard goes out of scope.
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// The lock is automatically released when the guard goes out of scope.
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }
}

// Cloning a Tensor clones the Arc, not the TensorData: both handles keep
// designating the same graph node.
impl Clone for Tensor {
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}
