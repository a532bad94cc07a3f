//! # Reading Intermediate Gradients
//!
//! Walks the expression `u = x*w`, `v = u + b`, `a = relu(v)` with
//! `x = 3, w = 2, b = 1` and reads every partial derivative of `a` out of
//! the graph, two ways:
//!
//! 1. **Retention** (`retain_grad`): ask the engine to keep the gradient of
//!    an intermediate tensor so it can be read from `.grad()` afterwards.
//! 2. **Hooks** (`register_hook` / `GradRecorder`): observe the gradient as
//!    it flows through the backward pass, without retaining anything.
//!
//! ## Execution
//! `cargo run --example intermediate_gradients`

use gradprobe_core::{GradProbeError, GradRecorder, Tensor};

fn scalar_leaf(value: f32) -> Result<Tensor, GradProbeError> {
    let t = Tensor::scalar(value);
    t.requires_grad_(true)?;
    Ok(t)
}

fn main() -> Result<(), GradProbeError> {
    // --- Approach 1: retention ---
    println!("=== Approach 1: retain_grad ===");
    {
        let x = scalar_leaf(3.0)?;
        let w = scalar_leaf(2.0)?;
        let b = scalar_leaf(1.0)?;

        let u = x.mul(&w)?;
        let v = u.add(&b)?;
        let a = v.relu()?;
        println!("forward: u = {}, v = {}, a = {}", u.item()?, v.item()?, a.item()?);

        // Without these two calls, u.grad() and v.grad() stay None: the
        // engine discards non-leaf gradients once they are propagated.
        u.retain_grad()?;
        v.retain_grad()?;

        a.backward(None)?;

        for (name, tensor) in [("x", &x), ("w", &w), ("b", &b), ("u", &u), ("v", &v)] {
            match tensor.grad() {
                Some(grad) => println!("da/d{} = {}", name, grad.item()?),
                None => println!("da/d{} = <not retained>", name),
            }
        }
    }

    // --- Approach 2: hooks ---
    println!("\n=== Approach 2: gradient hooks ===");
    {
        let x = scalar_leaf(3.0)?;
        let w = scalar_leaf(2.0)?;
        let b = scalar_leaf(1.0)?;

        let u = x.mul(&w)?;
        let v = u.add(&b)?;
        let a = v.relu()?;

        let mut recorder = GradRecorder::new();
        recorder.watch("x", &x)?;
        recorder.watch("w", &w)?;
        recorder.watch("b", &b)?;
        recorder.watch("u", &u)?;
        recorder.watch("v", &v)?;

        a.backward(None)?;

        let mut grads: Vec<(String, f32)> = Vec::new();
        for (label, grad) in recorder.snapshot() {
            grads.push((label, grad.item()?));
        }
        grads.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));
        for (label, value) in grads {
            println!("da/d{} = {}", label, value);
        }

        // The hooks observed everything; nothing was retained on the graph.
        assert!(u.grad().is_none());
        assert!(v.grad().is_none());
    }

    Ok(())
}
