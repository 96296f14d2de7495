//! # seqrnn - Recurrent Sequence Encoders (Rust)
//!
//! Multi-layer GRU/LSTM sequence encoders built on the Burn framework, for
//! use as the encoder half of sequence-to-sequence pipelines.
//!
//! ## Features
//!
//! - **GRU / LSTM**: both gated recurrence rules behind one closed [`cells::CellKind`]
//! - **Stacking**: any number of layers, with inter-layer dropout
//! - **Bidirectional**: forward and backward recurrences with concatenated outputs
//! - **Variable-Length Batches**: per-sequence lengths keep padding out of the
//!   carried state and zero-fill padded output positions
//! - **Stateful**: final hidden (and LSTM cell) state can seed a later pass
//! - **Deterministic Init**: weights uniform in [-0.1, 0.1], biases zero
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::nn::EmbeddingConfig;
//! use burn::tensor::{Int, Tensor};
//! use seqrnn::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let embedding = EmbeddingConfig::new(100, 16).init(&device);
//! let encoder = RnnEncoder::<Backend>::new(
//!     CellKind::Gru,
//!     false, // bidirectional
//!     1,     // num_layers
//!     32,    // hidden_size
//!     0.0,   // dropout
//!     embedding,
//!     &device,
//! )
//! .unwrap();
//!
//! // Two sequences padded to length 5, with true lengths 3 and 5
//! let tokens = Tensor::<Backend, 2, Int>::from_ints([[4, 7, 2, 0, 0], [9, 3, 8, 1, 5]], &device);
//! let (output, state) = encoder.forward(tokens, Some(&[3, 5]), None);
//!
//! assert_eq!(output.dims(), [2, 5, 32]);
//! assert_eq!(state.hidden.dims(), [1, 2, 32]);
//! ```
//!
//! ## Cell-level Usage
//!
//! For direct single-timestep processing, the cells are public:
//!
//! ```ignore
//! use seqrnn::cells::GruCell;
//!
//! let cell = GruCell::<Backend>::new(16, 32, &device);
//! let new_hidden = cell.forward(input, hidden);
//! ```

pub mod cells;
pub mod error;
pub mod mask;
pub mod rnn;

pub mod prelude {
    pub use crate::cells::{CellKind, CellState, GruCell, LstmCell, Recurrence};
    pub use crate::error::{EncoderError, EncoderResult};
    pub use crate::rnn::{EncoderState, RnnEncoder};
}
