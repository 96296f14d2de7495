//! Basic usage example of the recurrent sequence encoder
//!
//! This example demonstrates how to create a GRU encoder and run a batch of
//! token-id sequences through it.

use burn::backend::NdArray;
use burn::nn::EmbeddingConfig;
use burn::tensor::{Int, Tensor};
use seqrnn::prelude::*;

fn main() {
    println!("=== seqrnn Basic Example ===\n");

    // Use the NdArray backend (CPU)
    type Backend = NdArray<f32>;
    let device = Default::default();

    // Example 1: Unidirectional GRU encoder
    println!("Example 1: Unidirectional GRU");
    let embedding = EmbeddingConfig::new(1000, 16).init(&device);
    let encoder = RnnEncoder::<Backend>::new(CellKind::Gru, false, 1, 32, 0.0, embedding, &device)
        .expect("valid configuration");

    println!("Created encoder:");
    println!("  Cell kind:   {}", encoder.cell_kind());
    println!("  Hidden size: {}", encoder.hidden_size());
    println!("  Output size: {}", encoder.output_size());
    println!();

    // Batch of 4 sequences, padded length 10
    let tokens = Tensor::<Backend, 2, Int>::random(
        [4, 10],
        burn::tensor::Distribution::Uniform(1.0, 1000.0),
        &device,
    );

    let (output, state) = encoder.forward(tokens, None, None);

    println!("  Input shape:  [4, 10]");
    println!("  Output shape: {:?}", output.dims());
    println!("  Hidden shape: {:?}", state.hidden.dims());
    println!();

    // Example 2: Stacked bidirectional LSTM
    println!("Example 2: Stacked bidirectional LSTM");
    let embedding = EmbeddingConfig::new(1000, 16).init(&device);
    let encoder = RnnEncoder::<Backend>::new(CellKind::Lstm, true, 2, 32, 0.1, embedding, &device)
        .expect("valid configuration");

    let tokens = Tensor::<Backend, 2, Int>::random(
        [4, 10],
        burn::tensor::Distribution::Uniform(1.0, 1000.0),
        &device,
    );

    let (output, state) = encoder.forward(tokens, None, None);

    println!("  Output shape: {:?}", output.dims());
    println!("  Hidden shape: {:?}", state.hidden.dims());
    println!(
        "  Cell shape:   {:?}",
        state.cell.expect("LSTM carries a cell state").dims()
    );
    println!();

    // Example 3: Parsing the cell kind from configuration data
    println!("Example 3: Cell kind from a string");
    match "RNN".parse::<CellKind>() {
        Ok(kind) => println!("  Parsed: {kind}"),
        Err(err) => println!("  Rejected as expected: {err}"),
    }
}
