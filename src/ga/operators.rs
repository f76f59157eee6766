//! Genetic operators on heuristic patterns.
//!
//! # Crossover
//!
//! - [`single_point_crossover`]: independent cut point in each parent, tails
//!   swapped. Parents may differ in length, so children may too.
//!
//! # Mutation
//!
//! - [`point_mutation`]: one random position gets a fresh random symbol;
//!   the length is unchanged.

use crate::packing::{Heuristic, Pattern};
use rand::Rng;

/// Single-point crossover with independent cut points.
///
/// With `cut1 ∈ [0, len1)` and `cut2 ∈ [0, len2)`:
///
/// - child1 = `parent1[..cut1] ++ parent2[cut2..]`
/// - child2 = `parent2[..cut2] ++ parent1[cut1..]`
///
/// Each tail holds at least one symbol, so both children are non-empty.
/// Children longer than `max_len` are truncated to their first `max_len`
/// symbols.
pub fn single_point_crossover<R: Rng>(
    parent1: &Pattern,
    parent2: &Pattern,
    max_len: usize,
    rng: &mut R,
) -> (Pattern, Pattern) {
    let a = parent1.symbols();
    let b = parent2.symbols();
    let cut1 = rng.random_range(0..a.len());
    let cut2 = rng.random_range(0..b.len());

    let mut child1 = Pattern::joined(&a[..cut1], &b[cut2..]);
    let mut child2 = Pattern::joined(&b[..cut2], &a[cut1..]);
    child1.truncate(max_len);
    child2.truncate(max_len);
    (child1, child2)
}

/// Replaces the symbol at one random position with a random symbol.
///
/// The draw may repeat the old symbol, leaving the pattern unchanged.
pub fn point_mutation<R: Rng>(pattern: &mut Pattern, rng: &mut R) {
    let idx = rng.random_range(0..pattern.len());
    pattern.set(idx, Heuristic::random(rng));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::MAX_PATTERN_LENGTH;
    use crate::random::create_rng;

    fn count(p: &Pattern, h: Heuristic) -> usize {
        p.symbols().iter().filter(|&&s| s == h).count()
    }

    #[test]
    fn test_crossover_conserves_symbols() {
        let p1: Pattern = "ffff".parse().unwrap();
        let p2: Pattern = "bbbbbb".parse().unwrap();
        let mut rng = create_rng(42);

        for _ in 0..200 {
            let (c1, c2) = single_point_crossover(&p1, &p2, MAX_PATTERN_LENGTH, &mut rng);
            assert!(!c1.is_empty() && !c2.is_empty());
            // Total length is conserved (10 fits within the limit).
            assert_eq!(c1.len() + c2.len(), 10);
            assert_eq!(count(&c1, Heuristic::FirstFit) + count(&c2, Heuristic::FirstFit), 4);
            // child1 starts with parent1's head and ends with parent2's tail.
            let head = count(&c1, Heuristic::FirstFit);
            assert!(c1.symbols()[..head].iter().all(|&s| s == Heuristic::FirstFit));
            assert!(count(&c1, Heuristic::BestFit) >= 1);
            assert!(count(&c2, Heuristic::FirstFit) >= 1);
        }
    }

    #[test]
    fn test_crossover_respects_max_length() {
        let p1: Pattern = "ffffffffff".parse().unwrap();
        let p2: Pattern = "bbbbbbbbbb".parse().unwrap();
        let mut rng = create_rng(7);

        for _ in 0..200 {
            let (c1, c2) = single_point_crossover(&p1, &p2, MAX_PATTERN_LENGTH, &mut rng);
            assert!(c1.len() <= MAX_PATTERN_LENGTH);
            assert!(c2.len() <= MAX_PATTERN_LENGTH);
        }
    }

    #[test]
    fn test_crossover_single_symbol_parents() {
        let p1: Pattern = "f".parse().unwrap();
        let p2: Pattern = "n".parse().unwrap();
        let mut rng = create_rng(1);
        // Both cuts are 0, so the children are the swapped parents.
        let (c1, c2) = single_point_crossover(&p1, &p2, MAX_PATTERN_LENGTH, &mut rng);
        assert_eq!(c1, p2);
        assert_eq!(c2, p1);
    }

    #[test]
    fn test_point_mutation_keeps_length() {
        let mut rng = create_rng(42);
        let mut p: Pattern = "fnwbf".parse().unwrap();
        let mut changed = false;
        for _ in 0..100 {
            let before = p.clone();
            point_mutation(&mut p, &mut rng);
            assert_eq!(p.len(), 5);
            let diffs = before
                .symbols()
                .iter()
                .zip(p.symbols())
                .filter(|(a, b)| a != b)
                .count();
            assert!(diffs <= 1);
            changed |= diffs == 1;
        }
        assert!(changed);
    }
}
