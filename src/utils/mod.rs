//! Shared helpers for tests and benches

use rand::{rngs::StdRng, SeedableRng};

#[cfg(debug_assertions)]
pub fn make_rng() -> StdRng {
    const SEED: u64 = 63;
    StdRng::seed_from_u64(SEED)
}

#[cfg(not(debug_assertions))]
pub fn make_rng() -> StdRng {
    use rand::rngs::SysRng;
    use rand::TryRng;

    let seed = SysRng::try_next_u64(&mut SysRng).unwrap();
    StdRng::seed_from_u64(seed)
}
