//! # Sequence-Level Encoder Layer
//!
//! This module provides the full encoder that handles embedding lookup,
//! sequence processing, batching, and hidden state management.
//! **This is the primary API most users should use.**
//!
//! ## Quick Start
//!
//! ```ignore
//! use seqrnn::prelude::*;
//! use burn::nn::EmbeddingConfig;
//! use burn::tensor::{Int, Tensor};
//!
//! let embedding = EmbeddingConfig::new(10_000, 128).init(&device);
//! let encoder = RnnEncoder::<Backend>::new(
//!     CellKind::Gru, true, 2, 256, 0.1, embedding, &device,
//! )?;
//!
//! // Process batch: [batch=4, seq_len=20] padded token ids
//! let tokens: Tensor<Backend, 2, Int> = /* ... */;
//! let (output, state) = encoder.forward(tokens, Some(&lengths), None);
//!
//! // output: [4, 20, 512] - per-step representations (both directions)
//! // state.hidden: [4, 4, 256] - final hidden per layer/direction
//! ```
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `tokens` | `[batch, seq_len]` (Int, right-padded) |
//! | `output` | `[batch, seq_len, hidden_size * num_directions]` |
//! | `state.hidden` | `[num_layers * num_directions, batch, hidden_size]` |
//! | `state.cell` (LSTM) | `[num_layers * num_directions, batch, hidden_size]` |
//!
//! ## Variable-Length Batches
//!
//! Pass the true length of each sequence to keep padding out of the
//! computation:
//!
//! ```ignore
//! let (output, state) = encoder.forward(tokens, Some(&[3, 5]), None);
//! // output rows beyond each true length are zero, and state is taken
//! // at each sequence's last valid position
//! ```
//!
//! ## Stateful Processing (preserve hidden state)
//!
//! ```ignore
//! let (output1, state) = encoder.forward(batch1, None, None);
//! let (output2, state) = encoder.forward(batch2, None, Some(state));
//! // State persists across batches
//! ```

pub mod encoder;

pub use encoder::{EncoderState, RnnEncoder};
