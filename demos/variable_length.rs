//! Variable-length batch example
//!
//! Shows how true sequence lengths keep padding positions out of the
//! encoder's carried state, and how the final state is unaffected by
//! whatever happens to sit in the padded tail.

use burn::backend::NdArray;
use burn::nn::EmbeddingConfig;
use burn::tensor::{Int, Tensor};
use seqrnn::prelude::*;

fn main() {
    println!("=== seqrnn Variable-Length Example ===\n");

    type Backend = NdArray<f32>;
    let device = Default::default();

    let embedding = EmbeddingConfig::new(100, 8).init(&device);
    let encoder = RnnEncoder::<Backend>::new(CellKind::Gru, false, 1, 4, 0.0, embedding, &device)
        .expect("valid configuration");

    // Two sequences padded to length 5; the first is truly 3 tokens long
    let lengths = [3, 5];
    let tokens_a = Tensor::<Backend, 2, Int>::from_ints(
        [[11, 12, 13, 0, 0], [21, 22, 23, 24, 25]],
        &device,
    );
    // Same batch with garbage in the padded tail of the first sequence
    let tokens_b = Tensor::<Backend, 2, Int>::from_ints(
        [[11, 12, 13, 41, 42], [21, 22, 23, 24, 25]],
        &device,
    );

    let (output_a, state_a) = encoder.forward(tokens_a, Some(&lengths), None);
    let (_, state_b) = encoder.forward(tokens_b, Some(&lengths), None);

    println!("Lengths: {lengths:?}");
    println!("Output shape: {:?}", output_a.dims());
    println!("Hidden shape: {:?}", state_a.hidden.dims());
    println!();

    // Padded positions of the first sequence emit zeros
    let tail = output_a.clone().narrow(0, 0, 1).narrow(1, 3, 2);
    println!(
        "Max |output| at padded positions: {}",
        tail.abs().max().into_scalar()
    );

    // The padded tail cannot leak into the final hidden state
    let drift = state_a
        .hidden
        .sub(state_b.hidden)
        .abs()
        .max()
        .into_scalar();
    println!("Max |final hidden drift| from tail garbage: {drift}");
}
