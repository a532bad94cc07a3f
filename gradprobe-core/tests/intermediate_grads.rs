//! End-to-end coverage of the worked example:
//!
//! ```text
//! u = x * w
//! v = u + b
//! a = relu(v)
//! ```
//!
//! For `x = 3, w = 2, b = 1` the forward pass gives `u = 6, v = 7, a = 7`,
//! and the partials after `a.backward()` are `da/db = 1`, `da/du = 1`,
//! `da/dv = 1`, `da/dw = 3`, `da/dx = 2`. The intermediate partials
//! (`da/du`, `da/dv`) are read out two ways: gradient retention and
//! gradient hooks.

mod common;

use common::scalar_leaf;
use gradprobe_core::utils::testing::check_scalar_near;
use gradprobe_core::{GradProbeError, GradRecorder, Tensor};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct Graph {
    x: Tensor,
    w: Tensor,
    b: Tensor,
    u: Tensor,
    v: Tensor,
    a: Tensor,
}

fn build_graph(x: f32, w: f32, b: f32) -> Result<Graph, GradProbeError> {
    let x = scalar_leaf(x);
    let w = scalar_leaf(w);
    let b = scalar_leaf(b);
    let u = x.mul(&w)?;
    let v = u.add(&b)?;
    let a = v.relu()?;
    Ok(Graph { x, w, b, u, v, a })
}

#[test]
fn forward_values_match_worked_example() {
    let g = build_graph(3.0, 2.0, 1.0).unwrap();
    check_scalar_near(&g.u, 6.0, 1e-6);
    check_scalar_near(&g.v, 7.0, 1e-6);
    check_scalar_near(&g.a, 7.0, 1e-6);
}

#[test]
fn leaf_gradients_match_worked_example() {
    let g = build_graph(3.0, 2.0, 1.0).unwrap();
    g.a.backward(None).unwrap();

    check_scalar_near(&g.x.grad().unwrap(), 2.0, 1e-6);
    check_scalar_near(&g.w.grad().unwrap(), 3.0, 1e-6);
    check_scalar_near(&g.b.grad().unwrap(), 1.0, 1e-6);
}

#[test]
fn intermediate_gradients_discarded_without_retention() {
    let g = build_graph(3.0, 2.0, 1.0).unwrap();
    g.a.backward(None).unwrap();

    assert!(g.u.grad().is_none());
    assert!(g.v.grad().is_none());
}

#[test]
fn retain_grad_exposes_intermediate_gradients() {
    let g = build_graph(3.0, 2.0, 1.0).unwrap();
    g.u.retain_grad().unwrap();
    g.v.retain_grad().unwrap();
    g.a.backward(None).unwrap();

    check_scalar_near(&g.u.grad().unwrap(), 1.0, 1e-6);
    check_scalar_near(&g.v.grad().unwrap(), 1.0, 1e-6);
}

#[test]
fn hooks_observe_intermediate_gradients() {
    let g = build_graph(3.0, 2.0, 1.0).unwrap();

    let grads: Arc<Mutex<HashMap<String, f32>>> = Arc::new(Mutex::new(HashMap::new()));
    for (label, tensor) in [("u", &g.u), ("v", &g.v)] {
        let grads = Arc::clone(&grads);
        tensor
            .register_hook(move |grad| {
                grads
                    .lock()
                    .unwrap()
                    .insert(label.to_string(), grad.item().unwrap());
                None
            })
            .unwrap();
    }

    g.a.backward(None).unwrap();

    let grads = grads.lock().unwrap();
    assert_eq!(grads.get("u"), Some(&1.0));
    assert_eq!(grads.get("v"), Some(&1.0));
    // Hooks observed the gradients without retaining them.
    assert!(g.u.grad().is_none());
    assert!(g.v.grad().is_none());
}

#[test]
fn recorder_collects_every_partial() {
    let g = build_graph(3.0, 2.0, 1.0).unwrap();

    let mut recorder = GradRecorder::new();
    recorder.watch("x", &g.x).unwrap();
    recorder.watch("w", &g.w).unwrap();
    recorder.watch("b", &g.b).unwrap();
    recorder.watch("u", &g.u).unwrap();
    recorder.watch("v", &g.v).unwrap();

    g.a.backward(None).unwrap();

    let expected = [("x", 2.0), ("w", 3.0), ("b", 1.0), ("u", 1.0), ("v", 1.0)];
    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.len(), expected.len());
    for (label, value) in expected {
        check_scalar_near(&snapshot[label], value, 1e-6);
    }
}

#[test]
fn negative_branch_zeroes_all_gradients() {
    // x = -3: v = -5, relu clamps to 0 and every partial vanishes.
    let g = build_graph(-3.0, 2.0, 1.0).unwrap();
    g.u.retain_grad().unwrap();
    g.v.retain_grad().unwrap();
    g.a.backward(None).unwrap();

    check_scalar_near(&g.a, 0.0, 1e-6);
    check_scalar_near(&g.x.grad().unwrap(), 0.0, 1e-6);
    check_scalar_near(&g.w.grad().unwrap(), 0.0, 1e-6);
    check_scalar_near(&g.b.grad().unwrap(), 0.0, 1e-6);
    check_scalar_near(&g.u.grad().unwrap(), 0.0, 1e-6);
    check_scalar_near(&g.v.grad().unwrap(), 0.0, 1e-6);
}
