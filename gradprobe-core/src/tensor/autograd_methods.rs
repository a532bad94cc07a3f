// src/tensor/autograd_methods.rs

use crate::autograd::graph::{topological_sort, NodeId};
use crate::autograd::hooks::{GradHookFn, HookEntry, HookHandle};
use crate::autograd::BackwardOp;
use crate::error::GradProbeError;
use crate::ops::arithmetic::add_op;
use crate::tensor::create::ones_like;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` status of this tensor **in-place**.
    /// Only allowed on leaf tensors.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), GradProbeError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(GradProbeError::RequiresGradOnNonLeaf);
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Whether this tensor is a leaf of the computation graph
    /// (i.e. it was not produced by a tracked operation).
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// Returns a clone of the gradient tensor, if one was retained.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Resets the gradient of this tensor to None.
    pub fn zero_grad(&self) {
        self.write_data().grad = None;
    }

    /// Opts this tensor into keeping its gradient after `backward()`.
    ///
    /// By default only leaf tensors retain their gradient; the gradient of a
    /// non-leaf (intermediate) tensor is discarded once it has been
    /// propagated to the operation's inputs. After calling `retain_grad`,
    /// [`Tensor::grad`] is populated for this tensor too. On a leaf this is a
    /// no-op, since leaves already retain.
    ///
    /// # Errors
    /// Returns `RequiresGradNotMet` if the tensor does not require grad:
    /// no gradient will ever flow into it.
    pub fn retain_grad(&self) -> Result<(), GradProbeError> {
        let mut guard = self.write_data();
        if !guard.requires_grad {
            return Err(GradProbeError::RequiresGradNotMet);
        }
        guard.retains_grad = true;
        Ok(())
    }

    /// Whether this tensor keeps its gradient after `backward()` despite
    /// being a non-leaf. See [`Tensor::retain_grad`].
    pub fn retains_grad(&self) -> bool {
        self.read_data().retains_grad
    }

    /// Registers a gradient hook on this tensor.
    ///
    /// During `backward()`, once this tensor's gradient has been fully
    /// accumulated, `hook` is invoked with it. Hooks run in registration
    /// order; each may return a replacement gradient (same shape) that the
    /// rest of the backward pass then uses. The returned [`HookHandle`]
    /// removes the hook again.
    ///
    /// # Errors
    /// Returns `HookRequiresGrad` when the tensor does not require grad.
    pub fn register_hook<F>(&self, hook: F) -> Result<HookHandle, GradProbeError>
    where
        F: Fn(&Tensor) -> Option<Tensor> + Send + Sync + 'static,
    {
        let mut guard = self.write_data();
        if !guard.requires_grad {
            return Err(GradProbeError::HookRequiresGrad);
        }
        let id = guard.next_hook_id;
        guard.next_hook_id += 1;
        guard.hooks.push(HookEntry {
            id,
            callback: Arc::new(hook),
        });
        Ok(HookHandle {
            data: Arc::downgrade(&self.data),
            id,
        })
    }

    /// Clones the hook callbacks out of the lock, so they can be invoked
    /// without holding it (a hook is free to inspect its tensor).
    pub(crate) fn hook_callbacks(&self) -> Vec<Arc<GradHookFn>> {
        self.read_data()
            .hooks
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect()
    }

    /// Returns a clone of the `Arc` pointing to the backward operation node.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp + Send + Sync>> {
        self.read_data().grad_fn.clone()
    }

    /// Sets the backward operation node (`grad_fn`) for this tensor.
    /// Called by forward operations when linking their result into the graph.
    pub(crate) fn set_grad_fn(&self, grad_fn: Option<Arc<dyn BackwardOp + Send + Sync>>) {
        self.write_data().grad_fn = grad_fn;
    }

    /// Creates a new tensor that shares the same data buffer but is detached
    /// from the computation graph.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        let detached = TensorData {
            buffer: Arc::clone(&guard.buffer),
            shape: guard.shape.clone(),
            requires_grad: false,
            retains_grad: false,
            grad: None,
            grad_fn: None,
            hooks: Vec::new(),
            next_hook_id: 0,
        };
        Tensor {
            data: Arc::new(RwLock::new(detached)),
        }
    }

    /// Accumulates `grad_to_add` into this tensor's `grad` field
    /// (element-wise sum with any gradient already present).
    pub(crate) fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), GradProbeError> {
        let expected_shape = self.shape();
        if grad_to_add.shape() != expected_shape {
            return Err(GradProbeError::ShapeMismatch {
                expected: expected_shape,
                actual: grad_to_add.shape(),
                operation: "acc_grad".to_string(),
            });
        }

        let existing = self.write_data().grad.take();
        let new_grad = match existing {
            Some(existing_grad) => add_op(&existing_grad, &grad_to_add)?,
            None => grad_to_add,
        };
        self.write_data().grad = Some(new_grad);
        Ok(())
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// Computes the gradient of this tensor with respect to every tensor in
    /// its graph that requires grad, applying the chain rule in reverse
    /// topological order. Per node, once its gradient is fully accumulated:
    /// 1. registered hooks fire (in registration order, each may replace the
    ///    gradient),
    /// 2. the gradient is retained in `.grad` for leaves and for non-leaves
    ///    with `retain_grad` set,
    /// 3. the gradient is propagated through the node's `grad_fn`.
    ///
    /// # Arguments
    /// * `gradient`: Optional seed gradient for this tensor (dL/dself). If
    ///   `None`, the tensor must hold exactly one element and the seed
    ///   defaults to `1.0`.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` when this tensor does not require grad.
    /// * `BackwardNonScalar` when `gradient` is `None` and the tensor is not
    ///   a one-element tensor.
    /// * `ShapeMismatch` when an explicit `gradient` has the wrong shape, or
    ///   when a hook returns a replacement of the wrong shape.
    /// * `CycleDetected` when the graph is not a DAG.
    pub fn backward(&self, gradient: Option<Tensor>) -> Result<(), GradProbeError> {
        if !self.requires_grad() {
            return Err(GradProbeError::RequiresGradNotMet);
        }

        let seed = match gradient {
            Some(g) => {
                if g.shape() != self.shape() {
                    return Err(GradProbeError::ShapeMismatch {
                        expected: self.shape(),
                        actual: g.shape(),
                        operation: "backward".to_string(),
                    });
                }
                g
            }
            None => {
                if self.numel() != 1 {
                    return Err(GradProbeError::BackwardNonScalar);
                }
                ones_like(self)?
            }
        };

        let sorted_nodes = topological_sort(self)?;
        log::debug!(
            "backward: traversing {} node(s) from root {:?}",
            sorted_nodes.len(),
            self.node_id()
        );

        // Gradients in flight, keyed by node identity. A node's entry is
        // complete by the time the reverse iteration reaches it.
        let mut grad_map: HashMap<NodeId, Tensor> = HashMap::new();
        grad_map.insert(self.node_id(), seed);

        for node in sorted_nodes.iter().rev() {
            let mut grad = match grad_map.remove(&node.node_id()) {
                Some(g) => g,
                // No gradient flowed into this node (e.g. an input that does
                // not require grad).
                None => continue,
            };

            for hook in node.hook_callbacks() {
                if let Some(replacement) = hook(&grad) {
                    if replacement.shape() != grad.shape() {
                        return Err(GradProbeError::ShapeMismatch {
                            expected: grad.shape(),
                            actual: replacement.shape(),
                            operation: "gradient hook".to_string(),
                        });
                    }
                    grad = replacement;
                }
            }

            let (is_leaf, requires_grad, retains_grad) = {
                let guard = node.read_data();
                (guard.is_leaf(), guard.requires_grad, guard.retains_grad)
            };

            if requires_grad && (is_leaf || retains_grad) {
                node.acc_grad(grad.clone())?;
            }

            if let Some(grad_fn) = node.grad_fn() {
                let input_grads = grad_fn.backward(&grad)?;
                let inputs = grad_fn.inputs();
                if input_grads.len() != inputs.len() {
                    return Err(GradProbeError::InternalError(format!(
                        "BackwardOp returned {} gradients, but has {} inputs (op: {:?})",
                        input_grads.len(),
                        inputs.len(),
                        grad_fn
                    )));
                }

                for (input, grad_to_add) in inputs.into_iter().zip(input_grads) {
                    if !input.requires_grad() {
                        continue;
                    }
                    let input_id = input.node_id();
                    let accumulated = match grad_map.remove(&input_id) {
                        Some(existing) => add_op(&existing, &grad_to_add)?,
                        None => grad_to_add,
                    };
                    grad_map.insert(input_id, accumulated);
                }
                log::trace!("backward: propagated through node {:?}", node.node_id());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
