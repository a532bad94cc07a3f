#[cfg(test)]
mod tests {
    use crate::autograd::check_grad;
    use crate::error::GradProbeError;
    use crate::ops::arithmetic::mul_op;
    use crate::ops::reduction::sum_op;
    use crate::tensor::Tensor;
    use crate::utils::testing::{check_scalar_near, check_tensor_near};

    fn leaf(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
        let t = Tensor::new(data, shape).unwrap();
        t.requires_grad_(true).unwrap();
        t
    }

    #[test]
    fn test_mul_tensors_ok() {
        let t1 = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
        let t2 = Tensor::new(vec![4.0, 5.0, 6.0], vec![3]).unwrap();
        let result = mul_op(&t1, &t2).unwrap();
        check_tensor_near(&result, &[3], &[4.0, 10.0, 18.0], 1e-6);
    }

    #[test]
    fn test_mul_scalars() {
        let x = Tensor::scalar(3.0);
        let w = Tensor::scalar(2.0);
        let u = mul_op(&x, &w).unwrap();
        check_scalar_near(&u, 6.0, 1e-6);
        assert_eq!(u.shape(), Vec::<usize>::new());
    }

    #[test]
    fn test_mul_shape_mismatch() {
        let t1 = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let t2 = Tensor::scalar(2.0);
        assert!(matches!(
            mul_op(&t1, &t2),
            Err(GradProbeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_mul_backward_swaps_operands() {
        // d(a*b)/da = b, d(a*b)/db = a
        let a = leaf(vec![2.0, 3.0], vec![2]);
        let b = leaf(vec![5.0, 7.0], vec![2]);
        let c = mul_op(&a, &b).unwrap();
        let loss = sum_op(&c).unwrap();
        loss.backward(None).unwrap();

        check_tensor_near(&a.grad().unwrap(), &[2], &[5.0, 7.0], 1e-6);
        check_tensor_near(&b.grad().unwrap(), &[2], &[2.0, 3.0], 1e-6);
    }

    #[test]
    fn test_mul_same_input_accumulates() {
        // y = x * x, dy/dx = 2x
        let x = leaf(vec![3.0], vec![1]);
        let y = mul_op(&x, &x).unwrap();
        let loss = sum_op(&y).unwrap();
        loss.backward(None).unwrap();
        check_tensor_near(&x.grad().unwrap(), &[1], &[6.0], 1e-6);
    }

    #[test]
    fn test_mul_gradients_do_not_require_grad() {
        // The backward pass works on detached operands: the produced
        // gradients must not extend the computation graph.
        let a = leaf(vec![2.0], vec![1]);
        let b = leaf(vec![3.0], vec![1]);
        let c = mul_op(&a, &b).unwrap();
        let loss = sum_op(&c).unwrap();
        loss.backward(None).unwrap();

        let grad = a.grad().unwrap();
        assert!(!grad.requires_grad());
        assert!(grad.grad_fn().is_none());
    }

    #[test]
    fn test_mul_grad_check() {
        let a = leaf(vec![0.5, -1.5, 2.0], vec![3]);
        let b = leaf(vec![1.5, 0.25, -0.75], vec![3]);
        let result = check_grad(
            |inputs| sum_op(&mul_op(&inputs[0], &inputs[1])?),
            &[a, b],
            1e-2,
            1e-3,
        );
        assert!(result.is_ok(), "grad check failed: {:?}", result.err());
    }
}
