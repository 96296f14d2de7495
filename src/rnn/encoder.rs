//! Recurrent Sequence Encoder
//!
//! Full encoder layer that handles embedding lookup, sequence processing,
//! layer stacking, and hidden state management for GRU/LSTM cells.

use crate::cells::{CellKind, CellState, Recurrence};
use crate::error::{EncoderError, EncoderResult};
use crate::mask::step_mask;
use burn::module::Module;
use burn::nn::{Dropout, DropoutConfig, Embedding};
use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

/// Final recurrent state of an encoder forward pass.
///
/// Also accepted as the initial state of a later pass, so state can be
/// threaded across batches.
#[derive(Debug, Clone)]
pub struct EncoderState<B: Backend> {
    /// Hidden state, shape `[num_layers * num_directions, batch, hidden_size]`.
    ///
    /// Rows are ordered `layer * num_directions + direction`, forward
    /// direction first.
    pub hidden: Tensor<B, 3>,
    /// LSTM cell state of the same shape; `None` for GRU encoders.
    pub cell: Option<Tensor<B, 3>>,
}

/// One stacked layer: a forward cell plus, for bidirectional encoders,
/// a backward cell running over the reversed sequence.
#[derive(Module, Debug)]
struct RnnLayer<B: Backend> {
    forward_cell: Recurrence<B>,
    backward_cell: Option<Recurrence<B>>,
}

/// Multi-layer recurrent sequence encoder
///
/// Maps batches of padded token-id sequences to per-step contextual
/// representations plus a final hidden state, for consumption by a
/// downstream decoder or classifier.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct RnnEncoder<B: Backend> {
    /// Token embedding table, provided by the caller
    embedding: Embedding<B>,
    /// Stacked recurrent layers
    layers: Vec<RnnLayer<B>>,
    /// Dropout applied between layers (not after the last)
    dropout: Dropout,
    /// Hidden state size per direction
    #[module(skip)]
    hidden_size: usize,
    /// Number of stacked layers
    #[module(skip)]
    num_layers: usize,
    /// Whether a backward recurrence runs alongside the forward one
    #[module(skip)]
    bidirectional: bool,
    /// Embedding output dimensionality
    #[module(skip)]
    emb_dim: usize,
}

impl<B: Backend> RnnEncoder<B> {
    /// Create a new encoder
    ///
    /// Allocates one cell per layer and direction. Layer 0 consumes the
    /// embedding dimensionality; later layers consume
    /// `hidden_size * num_directions`. Cell weights are drawn uniformly from
    /// [-0.1, 0.1] and biases start at zero; the embedding is used as given
    /// and never re-initialized.
    ///
    /// # Arguments
    /// * `kind` - Recurrence update rule (GRU or LSTM)
    /// * `bidirectional` - Run a backward recurrence and concatenate outputs
    /// * `num_layers` - Number of stacked layers (at least 1)
    /// * `hidden_size` - Hidden state size per direction (at least 1)
    /// * `dropout` - Inter-layer dropout probability in [0, 1)
    /// * `embedding` - Token embedding module mapping ids to dense vectors
    /// * `device` - Device to create the module on
    ///
    /// # Errors
    /// [`EncoderError::InvalidConfig`] if `num_layers` or `hidden_size` is
    /// zero, or `dropout` is outside [0, 1). No weights are allocated on
    /// failure.
    pub fn new(
        kind: CellKind,
        bidirectional: bool,
        num_layers: usize,
        hidden_size: usize,
        dropout: f64,
        embedding: Embedding<B>,
        device: &B::Device,
    ) -> EncoderResult<Self> {
        if num_layers == 0 {
            return Err(EncoderError::InvalidConfig(
                "num_layers must be at least 1".to_string(),
            ));
        }
        if hidden_size == 0 {
            return Err(EncoderError::InvalidConfig(
                "hidden_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&dropout) {
            return Err(EncoderError::InvalidConfig(format!(
                "dropout must be in [0, 1), got {dropout}"
            )));
        }

        let emb_dim = embedding.weight.val().dims()[1];
        let num_directions = if bidirectional { 2 } else { 1 };

        let mut layers = Vec::with_capacity(num_layers);
        for layer_idx in 0..num_layers {
            let input_size = if layer_idx == 0 {
                emb_dim
            } else {
                hidden_size * num_directions
            };
            layers.push(RnnLayer {
                forward_cell: Recurrence::new(kind, input_size, hidden_size, device),
                backward_cell: bidirectional
                    .then(|| Recurrence::new(kind, input_size, hidden_size, device)),
            });
        }

        Ok(Self {
            embedding,
            layers,
            dropout: DropoutConfig::new(dropout).init(),
            hidden_size,
            num_layers,
            bidirectional,
            emb_dim,
        })
    }

    /// Get the hidden size per direction
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Get the number of stacked layers
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Whether this encoder is bidirectional
    pub fn bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Number of directions (1 or 2)
    pub fn num_directions(&self) -> usize {
        if self.bidirectional {
            2
        } else {
            1
        }
    }

    /// Get the embedding output dimensionality
    pub fn emb_dim(&self) -> usize {
        self.emb_dim
    }

    /// Per-step output size (`hidden_size * num_directions`)
    pub fn output_size(&self) -> usize {
        self.hidden_size * self.num_directions()
    }

    /// The recurrence update rule of this encoder
    pub fn cell_kind(&self) -> CellKind {
        self.layers[0].forward_cell.kind()
    }

    /// Forward pass over a batch of padded token-id sequences
    ///
    /// # Arguments
    /// * `tokens` - Token ids of shape `[batch, seq_len]`, right-padded
    /// * `lengths` - Optional true lengths, one per sequence, each in
    ///   `1..=seq_len`. When given, padding positions do not influence the
    ///   carried state and their outputs are zero-filled. When `None`,
    ///   padding positions are processed as ordinary input, which is correct
    ///   only for fixed-length batches.
    /// * `state` - Optional initial state with hidden shape
    ///   `[num_layers * num_directions, batch, hidden_size]`. Defaults to
    ///   zeros.
    ///
    /// # Returns
    /// Tuple of (output, final_state) where:
    /// - output: `[batch, seq_len, hidden_size * num_directions]`
    /// - final_state: hidden `[num_layers * num_directions, batch, hidden_size]`,
    ///   plus the equally-shaped cell state for LSTM encoders
    ///
    /// Malformed `lengths` or `state` shapes are the caller's responsibility;
    /// they surface as panics from the tensor engine, not as local checks.
    pub fn forward(
        &self,
        tokens: Tensor<B, 2, Int>,
        lengths: Option<&[usize]>,
        state: Option<EncoderState<B>>,
    ) -> (Tensor<B, 3>, EncoderState<B>) {
        let device = tokens.device();
        let [batch_size, _] = tokens.dims();
        let kind = self.cell_kind();
        let dirs = self.num_directions();

        let mut layer_input = self.embedding.forward(tokens); // [batch, seq, emb_dim]

        let mut final_hiddens: Vec<Tensor<B, 2>> = Vec::with_capacity(self.num_layers * dirs);
        let mut final_cells: Vec<Tensor<B, 2>> = Vec::with_capacity(self.num_layers * dirs);

        for (layer_idx, layer) in self.layers.iter().enumerate() {
            let init = self.initial_state(&state, layer_idx * dirs, kind, batch_size, &device);
            let (forward_out, forward_final) =
                run_direction(&layer.forward_cell, &layer_input, init, lengths, false);

            let mut finals = vec![forward_final];
            let layer_output = match &layer.backward_cell {
                Some(cell) => {
                    let init =
                        self.initial_state(&state, layer_idx * dirs + 1, kind, batch_size, &device);
                    let (backward_out, backward_final) =
                        run_direction(cell, &layer_input, init, lengths, true);
                    finals.push(backward_final);
                    Tensor::cat(vec![forward_out, backward_out], 2)
                }
                None => forward_out,
            };

            for final_state in finals {
                final_hiddens.push(final_state.hidden);
                if let Some(cell_state) = final_state.cell {
                    final_cells.push(cell_state);
                }
            }

            // Inter-layer dropout, skipped after the last layer
            layer_input = if layer_idx + 1 < self.layers.len() {
                self.dropout.forward(layer_output)
            } else {
                layer_output
            };
        }

        let hidden: Tensor<B, 3> = Tensor::stack(final_hiddens, 0);
        let cell: Option<Tensor<B, 3>> = if final_cells.is_empty() {
            None
        } else {
            Some(Tensor::stack(final_cells, 0))
        };

        (layer_input, EncoderState { hidden, cell })
    }

    /// Initial cell state for one (layer, direction) slot.
    fn initial_state(
        &self,
        state: &Option<EncoderState<B>>,
        index: usize,
        kind: CellKind,
        batch_size: usize,
        device: &B::Device,
    ) -> CellState<B> {
        match state {
            Some(state) => CellState {
                hidden: state.hidden.clone().narrow(0, index, 1).squeeze(0),
                cell: state
                    .cell
                    .as_ref()
                    .map(|c| c.clone().narrow(0, index, 1).squeeze(0)),
            },
            None => CellState::zeros(kind, batch_size, self.hidden_size, device),
        }
    }
}

/// Run one cell over the full sequence in one direction.
///
/// With `lengths`, each timestep is masked per sequence: state updates are
/// suppressed at padding positions and the emitted output there is zero.
/// For the reversed direction this makes the recurrence effectively start
/// at each sequence's last valid position.
fn run_direction<B: Backend>(
    cell: &Recurrence<B>,
    input: &Tensor<B, 3>,
    init: CellState<B>,
    lengths: Option<&[usize]>,
    reverse: bool,
) -> (Tensor<B, 3>, CellState<B>) {
    let [_, seq_len, _] = input.dims();
    let device = input.device();

    let mut state = init;
    let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);

    let mut order: Vec<usize> = (0..seq_len).collect();
    if reverse {
        order.reverse();
    }

    for t in order {
        // input[batch, t, features] -> [batch, features]
        let step_input = input.clone().narrow(1, t, 1).squeeze(1);
        let next = cell.forward(step_input, state.clone());

        match lengths {
            Some(lengths) => {
                let mask = step_mask::<B>(lengths, t, &device);
                outputs.push(next.hidden.clone().mul(mask.clone()));
                state = blend(next, state, mask);
            }
            None => {
                outputs.push(next.hidden.clone());
                state = next;
            }
        }
    }

    if reverse {
        outputs.reverse();
    }

    let output: Tensor<B, 3> = Tensor::stack(outputs, 1); // [batch, seq, hidden]
    (output, state)
}

/// Keep `next` where the mask is 1, carry `prev` through where it is 0.
fn blend<B: Backend>(next: CellState<B>, prev: CellState<B>, mask: Tensor<B, 2>) -> CellState<B> {
    let keep = mask.clone().neg().add_scalar(1.0);
    let hidden = next.hidden.mul(mask.clone()) + prev.hidden.mul(keep.clone());
    let cell = match (next.cell, prev.cell) {
        (Some(next_cell), Some(prev_cell)) => Some(next_cell.mul(mask) + prev_cell.mul(keep)),
        // Previous state had no cell tensor: it stands in for zeros
        (Some(next_cell), None) => Some(next_cell.mul(mask)),
        _ => None,
    };
    CellState { hidden, cell }
}
