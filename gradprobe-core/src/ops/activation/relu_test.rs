#[cfg(test)]
mod tests {
    use crate::autograd::check_grad;
    use crate::ops::activation::relu_op;
    use crate::ops::arithmetic::mul_op;
    use crate::ops::reduction::sum_op;
    use crate::tensor::Tensor;
    use crate::utils::testing::check_tensor_near;

    fn leaf(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
        let t = Tensor::new(data, shape).unwrap();
        t.requires_grad_(true).unwrap();
        t
    }

    #[test]
    fn test_relu_forward() {
        let t = Tensor::new(vec![-2.0, -1.0, 0.0, 1.0, 2.0], vec![5]).unwrap();
        let result = relu_op(&t).unwrap();
        check_tensor_near(&result, &[5], &[0.0, 0.0, 0.0, 1.0, 2.0], 1e-6);
        assert!(!result.requires_grad());
    }

    #[test]
    fn test_relu_propagates_requires_grad() {
        let t1 = leaf(vec![-1.0, 1.0], vec![2]);
        let result = relu_op(&t1).unwrap();
        assert!(result.requires_grad());
        assert!(result.grad_fn().is_some());

        let t2 = Tensor::new(vec![3.0], vec![1]).unwrap();
        let result2 = relu_op(&t2).unwrap();
        assert!(!result2.requires_grad());
        assert!(result2.grad_fn().is_none());
    }

    #[test]
    fn test_relu_backward_masks_gradient() {
        let t = leaf(vec![-2.0, -1.0, 0.0, 1.0, 2.0], vec![5]);
        let result = relu_op(&t).unwrap();
        let loss = sum_op(&result).unwrap();

        assert!(t.grad().is_none());
        loss.backward(None).unwrap();

        // Upstream 1.0 masked by (input > 0); the derivative at exactly
        // zero is zero.
        check_tensor_near(&t.grad().unwrap(), &[5], &[0.0, 0.0, 0.0, 1.0, 1.0], 1e-6);
    }

    #[test]
    fn test_relu_backward_chain() {
        // loss = sum(relu(x * 2)):
        // dLoss/dy = [0, 1, 1], dLoss/dx = [0, 2, 2]
        let x = leaf(vec![-1.0, 1.0, 2.0], vec![3]);
        let two = Tensor::new(vec![2.0, 2.0, 2.0], vec![3]).unwrap();

        let y = mul_op(&x, &two).unwrap();
        let z = relu_op(&y).unwrap();
        let loss = sum_op(&z).unwrap();
        loss.backward(None).unwrap();

        check_tensor_near(&x.grad().unwrap(), &[3], &[0.0, 2.0, 2.0], 1e-6);
    }

    #[test]
    fn test_relu_grad_check() {
        // Inputs away from the kink at zero.
        let t = leaf(vec![-2.0, -0.5, 0.5, 2.0], vec![4]);
        let result = check_grad(|inputs| sum_op(&relu_op(&inputs[0])?), &[t], 1e-2, 1e-3);
        assert!(result.is_ok(), "grad check failed: {:?}", result.err());
    }
}
