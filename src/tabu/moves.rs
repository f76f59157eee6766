//! Pattern move operators.
//!
//! Each operator repeats one elementary edit a random number of times
//! (possibly zero), so a move may return the input unchanged. The
//! single-symbol floor is enforced by [`Pattern::remove`], and operators
//! whose repetition range would be empty degrade to a no-op.

use crate::packing::{Heuristic, Pattern};
use crate::random::repetitions;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A neighbourhood move on a heuristic pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveOperator {
    /// Insert `[0, len]` random symbols at random positions, stopping at
    /// the maximum pattern length.
    Add,
    /// Drop `[0, len)` random symbols; never drops the last one.
    Remove,
    /// Overwrite `[0, len]` random positions with random symbols.
    Change,
    /// Swap `[0, len)` random pairs of positions.
    Swap,
}

impl MoveOperator {
    /// All operators.
    pub const ALL: [MoveOperator; 4] = [
        MoveOperator::Add,
        MoveOperator::Remove,
        MoveOperator::Change,
        MoveOperator::Swap,
    ];

    /// Applies the move to a copy of `pattern`.
    ///
    /// New symbols are drawn uniformly from `alphabet`; an empty alphabet
    /// turns `Add` and `Change` into no-ops.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_binpack::packing::{Heuristic, Pattern};
    /// use u_binpack::random::create_rng;
    /// use u_binpack::tabu::MoveOperator;
    ///
    /// let mut rng = create_rng(42);
    /// let single = Pattern::single(Heuristic::BestFit);
    /// // Nothing to remove or swap in a one-symbol pattern.
    /// let out = MoveOperator::Remove.apply(&single, &Heuristic::ALL, 10, &mut rng);
    /// assert_eq!(out, single);
    /// ```
    pub fn apply<R: Rng>(
        self,
        pattern: &Pattern,
        alphabet: &[Heuristic],
        max_len: usize,
        rng: &mut R,
    ) -> Pattern {
        let mut out = pattern.clone();
        let len = pattern.len();

        match self {
            MoveOperator::Add => {
                if alphabet.is_empty() {
                    return out;
                }
                for _ in 0..repetitions(rng, len + 1) {
                    if out.len() >= max_len {
                        break;
                    }
                    let pos = rng.random_range(0..=out.len());
                    out.insert(pos, pick(alphabet, rng));
                }
            }
            MoveOperator::Remove => {
                for _ in 0..repetitions(rng, len) {
                    let pos = rng.random_range(0..out.len());
                    if out.remove(pos).is_none() {
                        break;
                    }
                }
            }
            MoveOperator::Change => {
                if alphabet.is_empty() {
                    return out;
                }
                for _ in 0..repetitions(rng, len + 1) {
                    let pos = rng.random_range(0..out.len());
                    out.set(pos, pick(alphabet, rng));
                }
            }
            MoveOperator::Swap => {
                for _ in 0..repetitions(rng, len) {
                    let a = rng.random_range(0..out.len());
                    let b = rng.random_range(0..out.len());
                    out.swap(a, b);
                }
            }
        }
        out
    }
}

fn pick<R: Rng>(alphabet: &[Heuristic], rng: &mut R) -> Heuristic {
    alphabet[rng.random_range(0..alphabet.len())]
}

impl std::fmt::Display for MoveOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MoveOperator::Add => "add",
            MoveOperator::Remove => "remove",
            MoveOperator::Change => "change",
            MoveOperator::Swap => "swap",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::MAX_PATTERN_LENGTH;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn sorted(p: &Pattern) -> Vec<char> {
        let mut v: Vec<char> = p.symbols().iter().map(|h| h.symbol()).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_remove_never_empties() {
        let mut rng = create_rng(42);
        let p: Pattern = "fn".parse().unwrap();
        for _ in 0..1000 {
            let out = MoveOperator::Remove.apply(&p, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng);
            assert!(out.len() >= 1);
        }
        let single: Pattern = "w".parse().unwrap();
        for _ in 0..100 {
            let out =
                MoveOperator::Remove.apply(&single, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng);
            assert_eq!(out, single);
        }
    }

    #[test]
    fn test_single_symbol_swap_is_noop() {
        let mut rng = create_rng(3);
        let single: Pattern = "b".parse().unwrap();
        for _ in 0..100 {
            let out = MoveOperator::Swap.apply(&single, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng);
            assert_eq!(out, single);
        }
    }

    #[test]
    fn test_add_grows_up_to_double_and_max() {
        let mut rng = create_rng(9);
        let p: Pattern = "fnw".parse().unwrap();
        let mut grew = false;
        for _ in 0..500 {
            let out = MoveOperator::Add.apply(&p, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng);
            assert!(out.len() >= 3 && out.len() <= 6);
            grew |= out.len() > 3;
        }
        assert!(grew);

        let full: Pattern = "fnwbfnwbfn".parse().unwrap();
        for _ in 0..100 {
            let out = MoveOperator::Add.apply(&full, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng);
            assert_eq!(out, full);
        }
    }

    #[test]
    fn test_swap_preserves_multiset() {
        let mut rng = create_rng(5);
        let p: Pattern = "ffnwbb".parse().unwrap();
        for _ in 0..200 {
            let out = MoveOperator::Swap.apply(&p, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng);
            assert_eq!(sorted(&out), sorted(&p));
        }
    }

    #[test]
    fn test_change_keeps_length_and_alphabet() {
        let mut rng = create_rng(11);
        let p: Pattern = "ffff".parse().unwrap();
        let alphabet = [Heuristic::BestFit];
        let mut changed = false;
        for _ in 0..200 {
            let out = MoveOperator::Change.apply(&p, &alphabet, MAX_PATTERN_LENGTH, &mut rng);
            assert_eq!(out.len(), 4);
            assert!(out
                .symbols()
                .iter()
                .all(|&h| h == Heuristic::FirstFit || h == Heuristic::BestFit));
            changed |= out != p;
        }
        assert!(changed);
    }

    #[test]
    fn test_zero_repetitions_possible() {
        let mut rng = create_rng(1);
        let p: Pattern = "fnwb".parse().unwrap();
        let unchanged = (0..500).any(|_| {
            MoveOperator::Change.apply(&p, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng) == p
        });
        assert!(unchanged, "callers must tolerate unchanged patterns");
    }

    proptest! {
        #[test]
        fn prop_moves_keep_length_bounds(
            pattern in "[fnwb]{1,10}",
            op_idx in 0usize..4,
            seed in any::<u64>(),
        ) {
            let p: Pattern = pattern.parse().unwrap();
            let mut rng = create_rng(seed);
            let out = MoveOperator::ALL[op_idx].apply(&p, &Heuristic::ALL, MAX_PATTERN_LENGTH, &mut rng);
            prop_assert!(out.len() >= 1);
            prop_assert!(out.len() <= MAX_PATTERN_LENGTH.max(p.len()));
        }
    }
}
