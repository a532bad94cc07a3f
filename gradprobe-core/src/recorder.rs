// src/recorder.rs
//! Labelled gradient collection.
//!
//! `GradRecorder` wires gradient hooks onto a set of labelled tensors and
//! collects `label -> gradient` into a map as a side effect of the next
//! backward pass. This is the convenient way to read intermediate gradients
//! without sprinkling `retain_grad` calls over the graph.

use crate::autograd::HookHandle;
use crate::error::GradProbeError;
use crate::tensor::Tensor;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Collects gradients by label during backward passes.
///
/// Each watched tensor gets an observing hook that clones the accumulated
/// gradient into a shared map under the given label. Watching works for
/// leaves and intermediates alike; the recorder never alters the gradients
/// flowing through the graph.
pub struct GradRecorder {
    records: Arc<Mutex<HashMap<String, Tensor>>>,
    handles: Vec<HookHandle>,
}

impl GradRecorder {
    pub fn new() -> Self {
        GradRecorder {
            records: Arc::new(Mutex::new(HashMap::new())),
            handles: Vec::new(),
        }
    }

    /// Starts recording the gradient of `tensor` under `label`.
    ///
    /// Re-using a label overwrites its entry on the next backward pass.
    ///
    /// # Errors
    /// Returns `HookRequiresGrad` when the tensor does not require grad.
    pub fn watch(&mut self, label: &str, tensor: &Tensor) -> Result<(), GradProbeError> {
        let records = Arc::clone(&self.records);
        let label = label.to_string();
        let handle = tensor.register_hook(move |grad| {
            records
                .lock()
                .expect("GradRecorder mutex poisoned")
                .insert(label.clone(), grad.clone());
            None
        })?;
        self.handles.push(handle);
        Ok(())
    }

    /// Returns the recorded gradient for `label`, if any backward pass has
    /// produced one since the last `clear`.
    pub fn get(&self, label: &str) -> Option<Tensor> {
        self.records
            .lock()
            .expect("GradRecorder mutex poisoned")
            .get(label)
            .cloned()
    }

    /// Returns a snapshot of all recorded gradients.
    pub fn snapshot(&self) -> HashMap<String, Tensor> {
        self.records
            .lock()
            .expect("GradRecorder mutex poisoned")
            .clone()
    }

    /// Number of labels recorded so far.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .expect("GradRecorder mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all recorded gradients. Watched tensors stay watched.
    pub fn clear(&self) {
        self.records
            .lock()
            .expect("GradRecorder mutex poisoned")
            .clear();
    }

    /// Stops watching every tensor, removing the registered hooks.
    /// Already-recorded gradients are kept until `clear`.
    pub fn unwatch_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.remove();
        }
    }
}

impl Default for GradRecorder {
    fn default() -> Self {
        Self::new()
    }
}
