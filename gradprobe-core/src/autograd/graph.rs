// src/autograd/graph.rs

use crate::error::GradProbeError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Identity of a node in the computation graph.
///
/// Two `Tensor` handles designate the same node iff they share their inner
/// `Arc`, so the `Arc` pointer is a stable key for gradient maps. The
/// pointer is only dereferenced through `Tensor` handles kept alive by the
/// traversal, never directly.
pub(crate) type NodeId = *const RwLock<TensorData>;

impl Tensor {
    /// Returns this tensor's identity in the computation graph.
    pub(crate) fn node_id(&self) -> NodeId {
        Arc::as_ptr(&self.data)
    }
}

/// Builds a topological ordering of the graph reachable from `root` through
/// `grad_fn` links (inputs come before the nodes consuming them).
///
/// `backward()` iterates the result in reverse, which guarantees a node's
/// gradient is fully accumulated before it is propagated to its inputs.
pub(crate) fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>, GradProbeError> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut on_path: HashSet<NodeId> = HashSet::new();
    let mut sorted: Vec<Tensor> = Vec::new();
    visit(root, &mut visited, &mut on_path, &mut sorted)?;
    Ok(sorted)
}

fn visit(
    node: &Tensor,
    visited: &mut HashSet<NodeId>,
    on_path: &mut HashSet<NodeId>,
    sorted: &mut Vec<Tensor>,
) -> Result<(), GradProbeError> {
    let node_id = node.node_id();
    if visited.contains(&node_id) {
        return Ok(());
    }
    if !on_path.insert(node_id) {
        return Err(GradProbeError::CycleDetected);
    }

    if let Some(grad_fn) = node.grad_fn() {
        for input in grad_fn.inputs() {
            visit(&input, visited, on_path, sorted)?;
        }
    }

    on_path.remove(&node_id);
    visited.insert(node_id);
    sorted.push(node.clone());
    Ok(())
}
