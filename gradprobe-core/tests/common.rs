use gradprobe_core::Tensor;

// Helper to create a scalar leaf tensor that requires grad.
// Added allow(dead_code) because usage across different test crates isn't
// detected easily.
#[allow(dead_code)]
pub fn scalar_leaf(value: f32) -> Tensor {
    let t = Tensor::scalar(value);
    t.requires_grad_(true)
        .expect("setting requires_grad on a fresh leaf cannot fail");
    t
}
