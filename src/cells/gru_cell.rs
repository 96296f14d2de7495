//! Gated Recurrent Unit (GRU) Cell Implementation
//!
//! Reference: Cho et al., "Learning Phrase Representations using RNN
//! Encoder-Decoder for Statistical Machine Translation", EMNLP 2014

use crate::cells::{uniform_weight, zero_bias};
use burn::module::{Module, Param};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Standard GRU cell for single-timestep processing
///
/// Implements the GRU equations with gate order (r, z, n):
/// - r = sigmoid(W_ir @ x + b_ir + W_hr @ h + b_hr)
/// - z = sigmoid(W_iz @ x + b_iz + W_hz @ h + b_hz)
/// - n = tanh(W_in @ x + b_in + r * (W_hn @ h + b_hn))
/// - h' = (1 - z) * n + z * h
///
/// The reset gate scales the full recurrent candidate contribution,
/// including its bias.
#[derive(Module, Debug)]
pub struct GruCell<B: Backend> {
    /// Input-to-hidden weights, shape `[input_size, 3 * hidden_size]`
    pub weight_ih: Param<Tensor<B, 2>>,
    /// Hidden-to-hidden weights, shape `[hidden_size, 3 * hidden_size]`
    pub weight_hh: Param<Tensor<B, 2>>,
    /// Input-to-hidden bias, shape `[3 * hidden_size]`
    pub bias_ih: Param<Tensor<B, 1>>,
    /// Hidden-to-hidden bias, shape `[3 * hidden_size]`
    pub bias_hh: Param<Tensor<B, 1>>,
    /// Input size (number of features)
    #[module(skip)]
    input_size: usize,
    /// Hidden state size
    #[module(skip)]
    hidden_size: usize,
}

impl<B: Backend> GruCell<B> {
    /// Create a new GRU cell
    ///
    /// Weights are drawn uniformly from [-0.1, 0.1]; biases start at zero.
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            weight_ih: uniform_weight([input_size, 3 * hidden_size], device),
            weight_hh: uniform_weight([hidden_size, 3 * hidden_size], device),
            bias_ih: zero_bias([3 * hidden_size], device),
            bias_hh: zero_bias([3 * hidden_size], device),
            input_size,
            hidden_size,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Perform a forward pass through the GRU cell
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `hidden` - Previous hidden state of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// New hidden state of shape `[batch_size, hidden_size]`
    pub fn forward(&self, input: Tensor<B, 2>, hidden: Tensor<B, 2>) -> Tensor<B, 2> {
        let h = self.hidden_size;

        let input_contrib = input
            .matmul(self.weight_ih.val())
            .add(self.bias_ih.val().unsqueeze::<2>());
        let recurrent_contrib = hidden
            .clone()
            .matmul(self.weight_hh.val())
            .add(self.bias_hh.val().unsqueeze::<2>());

        let reset = activation::sigmoid(
            input_contrib.clone().narrow(1, 0, h) + recurrent_contrib.clone().narrow(1, 0, h),
        );
        let update = activation::sigmoid(
            input_contrib.clone().narrow(1, h, h) + recurrent_contrib.clone().narrow(1, h, h),
        );
        let candidate = (input_contrib.narrow(1, 2 * h, h)
            + reset * recurrent_contrib.narrow(1, 2 * h, h))
        .tanh();

        // h' = (1 - z) * n + z * h
        update * (hidden - candidate.clone()) + candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type Backend = NdArray<f32>;

    #[test]
    fn test_gru_cell_creation() {
        let device = Default::default();
        let cell = GruCell::<Backend>::new(8, 16, &device);

        assert_eq!(cell.input_size(), 8);
        assert_eq!(cell.hidden_size(), 16);
        assert_eq!(cell.weight_ih.val().dims(), [8, 48]);
        assert_eq!(cell.weight_hh.val().dims(), [16, 48]);
        assert_eq!(cell.bias_ih.val().dims(), [48]);
        assert_eq!(cell.bias_hh.val().dims(), [48]);
    }

    #[test]
    fn test_gru_init_policy() {
        let device = Default::default();
        let cell = GruCell::<Backend>::new(8, 16, &device);

        // Weights lie in [-0.1, 0.1]
        for weight in [cell.weight_ih.val(), cell.weight_hh.val()] {
            assert!(weight.clone().min().into_scalar() >= -0.1);
            assert!(weight.max().into_scalar() <= 0.1);
        }

        // Biases are exactly zero
        for bias in [cell.bias_ih.val(), cell.bias_hh.val()] {
            assert!(bias.abs().sum().into_scalar() == 0.0);
        }
    }

    #[test]
    fn test_gru_cell_forward() {
        let device = Default::default();
        let cell = GruCell::<Backend>::new(8, 16, &device);

        let input = Tensor::<Backend, 2>::zeros([4, 8], &device);
        let hidden = Tensor::<Backend, 2>::zeros([4, 16], &device);

        let new_hidden = cell.forward(input, hidden);
        assert_eq!(new_hidden.dims(), [4, 16]);
    }

    #[test]
    fn test_gru_state_change() {
        let device = Default::default();
        let cell = GruCell::<Backend>::new(8, 16, &device);

        let input =
            Tensor::<Backend, 2>::random([2, 8], Distribution::Uniform(-1.0, 1.0), &device);
        let hidden = Tensor::<Backend, 2>::ones([2, 16], &device);

        let new_hidden = cell.forward(input, hidden.clone());
        let diff = new_hidden.sub(hidden).abs().mean().into_scalar();
        assert!(diff > 0.0, "State should change after forward pass");
    }
}
