//! # RNN Cell Implementations
//!
//! This module provides single-timestep recurrent cells. These cells process
//! one timestep at a time and are wrapped by the higher-level
//! [`RnnEncoder`](crate::rnn::RnnEncoder) layer for sequence processing.
//!
//! ## Cell Types
//!
//! | Cell | Description |
//! |------|-------------|
//! | [`GruCell`] | Gated Recurrent Unit (3 gates, single state tensor) |
//! | [`LstmCell`] | Long Short-Term Memory (4 gates, hidden + cell state) |
//!
//! [`Recurrence`] is the closed dispatch over both kinds: it gives the
//! encoder a uniform step API via [`CellState`], so the sequence loop does
//! not care which recurrence update rule is running.
//!
//! ## When to Use Cells Directly
//!
//! Most users should use [`RnnEncoder`](crate::rnn::RnnEncoder), which
//! handles embedding lookup, layer stacking, and variable-length batches.
//! Use cells directly when you need custom sequence processing logic or
//! fine-grained control over state management.
//!
//! ## Tensor Shapes
//!
//! All cells expect 2D tensors for single-timestep processing:
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `input` | `[batch, input_size]` |
//! | `hidden_state` | `[batch, hidden_size]` |
//! | `cell_state` (LSTM only) | `[batch, hidden_size]` |
//!
//! ## Weight Initialization
//!
//! Every cell follows the same policy: weight matrices are drawn uniformly
//! from `[-0.1, 0.1]`, bias vectors start at exactly zero. Weights and
//! biases are separate, strongly typed parameter groups on each cell.

pub mod gru_cell;
pub mod lstm_cell;

pub use gru_cell::GruCell;
pub use lstm_cell::LstmCell;

use crate::error::EncoderError;
use burn::module::{Module, Param};
use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};
use std::fmt;
use std::str::FromStr;

/// Half-width of the uniform weight-initialization interval.
const INIT_RANGE: f64 = 0.1;

/// The recurrence update rule used by an encoder.
///
/// Closed over the two supported kinds; plain (non-gated) RNN cells are
/// deliberately not representable. Parse from `"GRU"` / `"LSTM"` strings
/// via [`FromStr`] when the kind comes from configuration data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CellKind {
    /// Gated Recurrent Unit
    Gru,
    /// Long Short-Term Memory
    Lstm,
}

impl FromStr for CellKind {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GRU" => Ok(CellKind::Gru),
            "LSTM" => Ok(CellKind::Lstm),
            other => Err(EncoderError::UnsupportedCellKind(other.to_string())),
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Gru => write!(f, "GRU"),
            CellKind::Lstm => write!(f, "LSTM"),
        }
    }
}

/// Recurrent state carried between timesteps.
///
/// GRU cells use only `hidden`; LSTM cells also carry `cell`.
#[derive(Debug, Clone)]
pub struct CellState<B: Backend> {
    /// Hidden state, shape `[batch, hidden_size]`
    pub hidden: Tensor<B, 2>,
    /// LSTM cell state, shape `[batch, hidden_size]`; `None` for GRU
    pub cell: Option<Tensor<B, 2>>,
}

impl<B: Backend> CellState<B> {
    /// Zero state for a batch, shaped for the given cell kind.
    pub fn zeros(
        kind: CellKind,
        batch_size: usize,
        hidden_size: usize,
        device: &B::Device,
    ) -> Self {
        let hidden = Tensor::zeros([batch_size, hidden_size], device);
        let cell = match kind {
            CellKind::Gru => None,
            CellKind::Lstm => Some(Tensor::zeros([batch_size, hidden_size], device)),
        };
        Self { hidden, cell }
    }
}

/// A single recurrent cell of either supported kind.
///
/// This is the [`CellKind`] dispatch point: construction picks a fixed
/// constructor per kind, and `forward` matches on the variant.
#[derive(Module, Debug)]
pub enum Recurrence<B: Backend> {
    /// GRU variant
    Gru(GruCell<B>),
    /// LSTM variant
    Lstm(LstmCell<B>),
}

impl<B: Backend> Recurrence<B> {
    /// Create a cell of the given kind
    pub fn new(kind: CellKind, input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        match kind {
            CellKind::Gru => Recurrence::Gru(GruCell::new(input_size, hidden_size, device)),
            CellKind::Lstm => Recurrence::Lstm(LstmCell::new(input_size, hidden_size, device)),
        }
    }

    /// The kind of this cell
    pub fn kind(&self) -> CellKind {
        match self {
            Recurrence::Gru(_) => CellKind::Gru,
            Recurrence::Lstm(_) => CellKind::Lstm,
        }
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        match self {
            Recurrence::Gru(cell) => cell.hidden_size(),
            Recurrence::Lstm(cell) => cell.hidden_size(),
        }
    }

    /// Advance the recurrence by one timestep
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, input_size]`
    /// * `state` - Previous state; a missing LSTM cell tensor is treated as zeros
    pub fn forward(&self, input: Tensor<B, 2>, state: CellState<B>) -> CellState<B> {
        match self {
            Recurrence::Gru(cell) => CellState {
                hidden: cell.forward(input, state.hidden),
                cell: None,
            },
            Recurrence::Lstm(cell) => {
                let cell_state = state.cell.unwrap_or_else(|| {
                    Tensor::zeros(state.hidden.dims(), &state.hidden.device())
                });
                let (hidden, cell_state) = cell.forward(input, (state.hidden, cell_state));
                CellState {
                    hidden,
                    cell: Some(cell_state),
                }
            }
        }
    }
}

/// Weight-matrix parameter drawn uniformly from [-0.1, 0.1].
pub(crate) fn uniform_weight<B: Backend, const D: usize>(
    shape: [usize; D],
    device: &B::Device,
) -> Param<Tensor<B, D>> {
    let tensor = Tensor::random(shape, Distribution::Uniform(-INIT_RANGE, INIT_RANGE), device);
    Param::from_tensor(tensor)
}

/// Bias-vector parameter initialized to exactly zero.
pub(crate) fn zero_bias<B: Backend, const D: usize>(
    shape: [usize; D],
    device: &B::Device,
) -> Param<Tensor<B, D>> {
    Param::from_tensor(Tensor::zeros(shape, device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type Backend = NdArray<f32>;

    #[test]
    fn test_cell_kind_parse() {
        assert_eq!("GRU".parse::<CellKind>().unwrap(), CellKind::Gru);
        assert_eq!("LSTM".parse::<CellKind>().unwrap(), CellKind::Lstm);
    }

    #[test]
    fn test_cell_kind_rejects_plain_rnn() {
        let err = "RNN".parse::<CellKind>().unwrap_err();
        assert_eq!(err, EncoderError::UnsupportedCellKind("RNN".to_string()));
    }

    #[test]
    fn test_cell_kind_rejects_arbitrary() {
        assert!("transformer".parse::<CellKind>().is_err());
        assert!("gru".parse::<CellKind>().is_err());
        assert!("".parse::<CellKind>().is_err());
    }

    #[test]
    fn test_cell_kind_display_round_trip() {
        for kind in [CellKind::Gru, CellKind::Lstm] {
            assert_eq!(kind.to_string().parse::<CellKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_recurrence_dispatch() {
        let device = Default::default();

        let gru = Recurrence::<Backend>::new(CellKind::Gru, 8, 16, &device);
        assert_eq!(gru.kind(), CellKind::Gru);
        assert_eq!(gru.hidden_size(), 16);

        let lstm = Recurrence::<Backend>::new(CellKind::Lstm, 8, 16, &device);
        assert_eq!(lstm.kind(), CellKind::Lstm);
    }

    #[test]
    fn test_recurrence_step_states() {
        let device = Default::default();
        let input = Tensor::<Backend, 2>::zeros([4, 8], &device);

        let gru = Recurrence::<Backend>::new(CellKind::Gru, 8, 16, &device);
        let state = CellState::zeros(CellKind::Gru, 4, 16, &device);
        let next = gru.forward(input.clone(), state);
        assert_eq!(next.hidden.dims(), [4, 16]);
        assert!(next.cell.is_none());

        let lstm = Recurrence::<Backend>::new(CellKind::Lstm, 8, 16, &device);
        let state = CellState::zeros(CellKind::Lstm, 4, 16, &device);
        let next = lstm.forward(input, state);
        assert_eq!(next.hidden.dims(), [4, 16]);
        assert_eq!(next.cell.unwrap().dims(), [4, 16]);
    }

    #[test]
    fn test_lstm_missing_cell_state_treated_as_zeros() {
        let device = Default::default();
        let lstm = Recurrence::<Backend>::new(CellKind::Lstm, 8, 16, &device);
        let input = Tensor::<Backend, 2>::ones([2, 8], &device);

        let explicit = lstm.forward(
            input.clone(),
            CellState::zeros(CellKind::Lstm, 2, 16, &device),
        );
        let implicit = lstm.forward(
            input,
            CellState {
                hidden: Tensor::zeros([2, 16], &device),
                cell: None,
            },
        );

        let diff = explicit
            .hidden
            .sub(implicit.hidden)
            .abs()
            .max()
            .into_scalar();
        assert!(diff < 1e-6);
    }
}
