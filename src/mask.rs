//! Step masks for variable-length batches
//!
//! Burn has no pack/unpack primitive, so padded batches are handled by
//! masking each timestep: a sequence whose true length has been passed
//! contributes a 0 for every padded position and a 1 for every valid one.
//! The encoder uses these masks to freeze hidden state and zero outputs at
//! padding positions.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Builds the validity mask for timestep `t`.
///
/// Returns a `[batch, 1]` tensor holding `1.0` for sequences with
/// `t < length` and `0.0` otherwise, ready to broadcast against
/// `[batch, hidden]` state tensors.
pub fn step_mask<B: Backend>(lengths: &[usize], t: usize, device: &B::Device) -> Tensor<B, 2> {
    let flags: Vec<f32> = lengths
        .iter()
        .map(|&len| if t < len { 1.0 } else { 0.0 })
        .collect();
    Tensor::<B, 1>::from_floats(flags.as_slice(), device).unsqueeze_dim(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type Backend = NdArray<f32>;

    #[test]
    fn test_step_mask_shape() {
        let device = Default::default();
        let mask = step_mask::<Backend>(&[3, 5, 1], 0, &device);
        assert_eq!(mask.dims(), [3, 1]);
    }

    #[test]
    fn test_step_mask_values() {
        let device = Default::default();

        // t = 2: only lengths > 2 are still valid
        let mask = step_mask::<Backend>(&[3, 5, 1], 2, &device);
        let expected = [1.0f32, 1.0, 0.0];
        for (i, &want) in expected.iter().enumerate() {
            let got = mask.clone().slice([i..i + 1, 0..1]).into_scalar();
            assert!((got - want).abs() < 1e-6, "mask[{}] = {}, want {}", i, got, want);
        }
    }

    #[test]
    fn test_step_mask_all_valid_at_zero() {
        let device = Default::default();
        let mask = step_mask::<Backend>(&[4, 2, 7], 0, &device);
        let sum = mask.sum().into_scalar();
        assert!((sum - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_mask_exhausted() {
        let device = Default::default();
        let mask = step_mask::<Backend>(&[2, 3], 5, &device);
        let sum = mask.sum().into_scalar();
        assert!(sum.abs() < 1e-6);
    }
}
