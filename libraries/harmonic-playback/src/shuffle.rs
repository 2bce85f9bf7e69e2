//! Shuffle target selection
//!
//! Shuffle never reorders the queue. It only changes how "next" picks its
//! target: a uniform draw over the whole queue on every call. There is no
//! shuffle bag, so the current track can come up again immediately.

use rand::Rng;

/// Uniform index in `0..len`, or `None` for an empty range
pub fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}
