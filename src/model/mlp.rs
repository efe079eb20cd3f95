//! Feed-forward network built from a layer-size list
//!
//! Architecture: Input(sizes[0]) → Linear → ReLU → ... → Linear(sizes[last])
//! with one hidden block per interior entry and a linear output layer.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Fully-connected network with ReLU hidden activations
#[derive(Module, Debug)]
pub struct FeedForward<B: Backend> {
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
}

impl<B: Backend> FeedForward<B> {
    /// Build from consecutive layer sizes, e.g. `[4, 2, 3]` for a network
    /// with 4 inputs, one hidden layer of 2 units, and 3 outputs.
    ///
    /// # Panics
    /// Panics if fewer than two sizes are given.
    pub fn new(device: &B::Device, sizes: &[usize]) -> Self {
        assert!(
            sizes.len() >= 2,
            "layer sizes need at least an input and an output width"
        );

        let hidden = sizes
            .windows(2)
            .take(sizes.len() - 2)
            .map(|w| LinearConfig::new(w[0], w[1]).init(device))
            .collect();

        let last = sizes.len() - 1;
        FeedForward {
            hidden,
            output: LinearConfig::new(sizes[last - 1], sizes[last]).init(device),
        }
    }

    /// Forward pass over a `[batch, input_dim]` tensor.
    ///
    /// Returns raw output activations `[batch, output_dim]`; no softmax is
    /// applied here, losses and argmax work on the raw values.
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = x;
        for layer in &self.hidden {
            x = relu(layer.forward(x));
        }
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let model = FeedForward::<TestBackend>::new(&device, &[3, 2, 5]);

        let x = Tensor::random(
            [4, 3],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &device,
        );
        let out = model.forward(x);

        assert_eq!(out.dims(), [4, 5]);
    }

    #[test]
    fn test_no_hidden_layer() {
        let device = Default::default();
        let model = FeedForward::<TestBackend>::new(&device, &[6, 2]);

        let x = Tensor::zeros([1, 6], &device);
        assert_eq!(model.forward(x).dims(), [1, 2]);
    }

    #[test]
    fn test_deep_stack() {
        let device = Default::default();
        let model = FeedForward::<TestBackend>::new(&device, &[8, 16, 8, 4, 2]);

        let x = Tensor::zeros([3, 8], &device);
        assert_eq!(model.forward(x).dims(), [3, 2]);
    }
}
