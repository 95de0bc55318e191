//! Random sources for password generation.
//!
//! The generator is generic over [`rand::Rng`]. Normal runs use [`Global`],
//! the process-wide hardware-stirred generator; `--seed` runs use
//! [`seeded`].

mod hw;

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rand_core::impls;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub fn entropy_source() -> &'static str {
    hw::source_name()
}

// =============================================================================
// Process-wide generator
// =============================================================================

// Odd multipliers; any odd value keeps the state step a bijection.
const MULTIPLIERS: [u64; 8] = [
    0x9e37_79b9_7f4a_7c15,
    0xbf58_476d_1ce4_e5b9,
    0x94d0_49bb_1331_11eb,
    0xd6e8_feb8_6659_fd93,
    0x2545_f491_4f6c_dd1d,
    0x5851_f42d_4c95_7f2d,
    0xda94_2042_e4dd_58b5,
    0xd134_2543_de82_ef95,
];

// Zero means "not yet seeded": the first step folds in hardware entropy.
static STATE: AtomicU64 = AtomicU64::new(0);

pub struct Rand;

impl Rand {
    /// Next value from the process-wide generator. Safe to call from any
    /// thread; concurrent callers each observe a distinct state transition.
    #[inline]
    pub fn get() -> u64 {
        let ent = hw::entropy();
        let prev = match STATE.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
            Some(step(s, ent))
        }) {
            Ok(s) | Err(s) => s,
        };
        finalize(step(prev, ent))
    }
}

#[inline(always)]
fn step(state: u64, ent: u64) -> u64 {
    let mixed = state ^ ent;
    let idx = ((mixed ^ (mixed >> 32)) % MULTIPLIERS.len() as u64) as usize;
    state.rotate_left(17).wrapping_mul(MULTIPLIERS[idx]) ^ ent
}

/// SplitMix64 output finalizer.
#[inline(always)]
fn finalize(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Wipe the process-wide state. Async-signal-safe.
pub fn zeroize_state() {
    STATE.store(0, Ordering::SeqCst);
}

/// Handle to the process-wide generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

impl RngCore for Global {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (Rand::get() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        Rand::get()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

// =============================================================================
// Seeded generator
// =============================================================================

/// Reproducible generator for `--seed`. Same seed, same passwords.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
