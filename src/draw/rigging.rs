//! Winner selection.
//!
//! Committing every label in [`SPECIAL_NUMBERS`] is a reward rule: the winner is
//! then drawn from the player's own labels, so the draw always pays out.
//! Any other commitment draws uniformly from the whole board.

use std::collections::BTreeSet;

use rand::Rng;

use crate::config::SPECIAL_NUMBERS;

pub fn all_special_selected(committed: &BTreeSet<u32>) -> bool {
    SPECIAL_NUMBERS.iter().all(|n| committed.contains(n))
}

/// Random label in `1..=total_cells`, used for the rolling display as well.
pub fn random_label<R: Rng + ?Sized>(rng: &mut R, total_cells: usize) -> u32 {
    rng.gen_range(1..=total_cells as u32)
}

pub fn pick_winner<R: Rng + ?Sized>(
    rng: &mut R,
    committed: &BTreeSet<u32>,
    total_cells: usize,
) -> u32 {
    if all_special_selected(committed) {
        let nth = rng.gen_range(0..committed.len());
        if let Some(&label) = committed.iter().nth(nth) {
            return label;
        }
    }
    random_label(rng, total_cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn labels(xs: &[u32]) -> BTreeSet<u32> {
        xs.iter().copied().collect()
    }

    #[test]
    fn special_set_detection() {
        assert!(all_special_selected(&labels(&[6, 16, 26, 36, 46, 56])));
        assert!(all_special_selected(&labels(&[1, 6, 16, 26, 36, 46, 56, 64])));
        assert!(!all_special_selected(&labels(&[6, 16, 26, 36, 46])));
        assert!(!all_special_selected(&labels(&[])));
    }

    #[test]
    fn special_set_always_wins() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for trial in 0..2000u32 {
            let mut committed = labels(&SPECIAL_NUMBERS);
            // Vary the extra picks per trial.
            for k in 0..(trial % 9) {
                committed.insert(1 + (trial * 7 + k * 13) % 64);
            }
            let winner = pick_winner(&mut rng, &committed, 64);
            assert!(committed.contains(&winner), "trial {trial}: {winner} not committed");
        }
    }

    #[test]
    fn rigged_winner_covers_every_committed_label() {
        let mut rng = SmallRng::seed_from_u64(3);
        let committed = labels(&[3, 6, 16, 26, 36, 46, 56]);
        let mut seen = BTreeSet::new();
        for _ in 0..1000 {
            seen.insert(pick_winner(&mut rng, &committed, 64));
        }
        assert_eq!(seen, committed);
    }

    #[test]
    fn ordinary_draw_is_uniform() {
        const TRIALS: usize = 10_000;
        let mut rng = SmallRng::seed_from_u64(42);
        let committed = labels(&[1, 6, 16, 26, 36, 46]);
        let mut counts = [0usize; 64];
        for _ in 0..TRIALS {
            let w = pick_winner(&mut rng, &committed, 64);
            assert!((1..=64).contains(&w));
            counts[(w - 1) as usize] += 1;
        }
        let expected = TRIALS as f64 / 64.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        // 63 degrees of freedom, p = 0.001
        assert!(chi2 < 103.44, "chi-square {chi2} too large");
    }
}
