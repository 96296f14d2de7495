//! Long Short-Term Memory (LSTM) Cell Implementation
//!
//! Reference: Hochreiter & Schmidhuber, "Long Short-Term Memory",
//! Neural Computation 1997

use crate::cells::{uniform_weight, zero_bias};
use burn::module::{Module, Param};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Standard LSTM cell for single-timestep processing
///
/// Implements the LSTM equations with gate order (i, f, g, o):
/// - i = sigmoid(W_ii @ x + b_ii + W_hi @ h + b_hi)
/// - f = sigmoid(W_if @ x + b_if + W_hf @ h + b_hf)
/// - g = tanh(W_ig @ x + b_ig + W_hg @ h + b_hg)
/// - o = sigmoid(W_io @ x + b_io + W_ho @ h + b_ho)
/// - c' = f * c + i * g
/// - h' = o * tanh(c')
#[derive(Module, Debug)]
pub struct LstmCell<B: Backend> {
    /// Input-to-hidden weights, shape `[input_size, 4 * hidden_size]`
    pub weight_ih: Param<Tensor<B, 2>>,
    /// Hidden-to-hidden weights, shape `[hidden_size, 4 * hidden_size]`
    pub weight_hh: Param<Tensor<B, 2>>,
    /// Input-to-hidden bias, shape `[4 * hidden_size]`
    pub bias_ih: Param<Tensor<B, 1>>,
    /// Hidden-to-hidden bias, shape `[4 * hidden_size]`
    pub bias_hh: Param<Tensor<B, 1>>,
    /// Input size (number of features)
    #[module(skip)]
    input_size: usize,
    /// Hidden state size
    #[module(skip)]
    hidden_size: usize,
}

impl<B: Backend> LstmCell<B> {
    /// Create a new LSTM cell
    ///
    /// Weights are drawn uniformly from [-0.1, 0.1]; biases start at zero.
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            weight_ih: uniform_weight([input_size, 4 * hidden_size], device),
            weight_hh: uniform_weight([hidden_size, 4 * hidden_size], device),
            bias_ih: zero_bias([4 * hidden_size], device),
            bias_hh: zero_bias([4 * hidden_size], device),
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

    /// Perform a forward pass through the LSTM cell
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `states` - Tuple of (hidden_state, cell_state), each of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (new_hidden_state, new_cell_state)
    pub fn forward(
        &self,
        input: Tensor<B, 2>,
        states: (Tensor<B, 2>, Tensor<B, 2>),
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let (hidden_state, cell_state) = states;
        let h = self.hidden_size;

        let input_contrib = input
            .matmul(self.weight_ih.val())
            .add(self.bias_ih.val().unsqueeze::<2>());
        let recurrent_contrib = hidden_state
            .matmul(self.weight_hh.val())
            .add(self.bias_hh.val().unsqueeze::<2>());
        let gates = input_contrib + recurrent_contrib;

        let input_gate = activation::sigmoid(gates.clone().narrow(1, 0, h));
        let forget_gate = activation::sigmoid(gates.clone().narrow(1, h, h));
        let candidate = gates.clone().narrow(1, 2 * h, h).tanh();
        let output_gate = activation::sigmoid(gates.narrow(1, 3 * h, h));

        let new_cell = forget_gate * cell_state + input_gate * candidate;
        let new_hidden = output_gate * new_cell.clone().tanh();

        (new_hidden, new_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type Backend = NdArray<f32>;

    #[test]
    fn test_lstm_cell_creation() {
        let device = Default::default();
        let cell = LstmCell::<Backend>::new(8, 16, &device);

        assert_eq!(cell.input_size(), 8);
        assert_eq!(cell.hidden_size(), 16);
        assert_eq!(cell.weight_ih.val().dims(), [8, 64]);
        assert_eq!(cell.weight_hh.val().dims(), [16, 64]);
        assert_eq!(cell.bias_ih.val().dims(), [64]);
        assert_eq!(cell.bias_hh.val().dims(), [64]);
    }

    #[test]
    fn test_lstm_init_policy() {
        let device = Default::default();
        let cell = LstmCell::<Backend>::new(8, 16, &device);

        for weight in [cell.weight_ih.val(), cell.weight_hh.val()] {
            assert!(weight.clone().min().into_scalar() >= -0.1);
            assert!(weight.max().into_scalar() <= 0.1);
        }

        for bias in [cell.bias_ih.val(), cell.bias_hh.val()] {
            assert!(bias.abs().sum().into_scalar() == 0.0);
        }
    }

    #[test]
    fn test_lstm_cell_forward() {
        let device = Default::default();
        let cell = LstmCell::<Backend>::new(8, 16, &device);

        let input = Tensor::<Backend, 2>::zeros([4, 8], &device);
        let hidden = Tensor::<Backend, 2>::zeros([4, 16], &device);
        let cell_state = Tensor::<Backend, 2>::zeros([4, 16], &device);

        let (new_hidden, new_cell) = cell.forward(input, (hidden, cell_state));
        assert_eq!(new_hidden.dims(), [4, 16]);
        assert_eq!(new_cell.dims(), [4, 16]);
    }

    #[test]
    fn test_lstm_state_change() {
        let device = Default::default();
        let cell = LstmCell::<Backend>::new(8, 16, &device);

        let input =
            Tensor::<Backend, 2>::random([2, 8], Distribution::Uniform(-1.0, 1.0), &device);
        let hidden = Tensor::<Backend, 2>::ones([2, 16], &device);
        let cell_state = Tensor::<Backend, 2>::ones([2, 16], &device);

        let (new_hidden, _) = cell.forward(input, (hidden.clone(), cell_state));
        let diff = new_hidden.sub(hidden).abs().mean().into_scalar();
        assert!(diff > 0.0, "State should change after forward pass");
    }
}
