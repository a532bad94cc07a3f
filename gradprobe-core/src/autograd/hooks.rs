// src/autograd/hooks.rs
//! Gradient hooks.
//!
//! A hook is a callback registered on a tensor that requires grad. During
//! `backward()`, once the tensor's gradient has been fully accumulated, each
//! of its hooks is invoked with that gradient. A hook may return a
//! replacement tensor of the same shape, which then flows onward (both into
//! retention and into propagation towards the inputs); returning `None`
//! leaves the gradient untouched.
//!
//! Hooks are the only way to observe the gradient of a non-leaf tensor
//! without retaining it: they fire even when the gradient is about to be
//! discarded.

use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock, Weak};

/// Signature of a gradient hook.
///
/// Receives the accumulated gradient; may return a replacement of the same
/// shape.
pub type GradHookFn = dyn Fn(&Tensor) -> Option<Tensor> + Send + Sync;

/// A hook stored inside `TensorData`, tagged with its registration id.
pub(crate) struct HookEntry {
    pub(crate) id: usize,
    pub(crate) callback: Arc<GradHookFn>,
}

/// Handle returned by [`Tensor::register_hook`], allowing later removal.
///
/// Holds only a `Weak` reference to the tensor, so an outstanding handle does
/// not keep the graph alive.
pub struct HookHandle {
    pub(crate) data: Weak<RwLock<TensorData>>,
    pub(crate) id: usize,
}

impl HookHandle {
    /// Removes the hook from its tensor.
    ///
    /// A no-op if the tensor has already been dropped.
    pub fn remove(self) {
        if let Some(data) = self.data.upgrade() {
            let mut guard = data.write().expect("RwLock poisoned");
            guard.hooks.retain(|entry| entry.id != self.id);
        }
    }

    /// The registration id of this hook, unique per tensor.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookHandle").field("id", &self.id).finish()
    }
}
