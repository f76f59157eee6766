//! Tabu memory of visited patterns.

use crate::packing::Pattern;
use std::collections::HashSet;
use std::collections::VecDeque;

/// Set of visited patterns, compared by exact symbol equality.
///
/// With `tenure: None` the memory grows for the whole run and a pattern is
/// evaluated at most once. With `tenure: Some(n)` it keeps only the `n`
/// most recently inserted patterns: inserting the `n + 1`-th evicts the
/// oldest, which may then be visited again.
#[derive(Debug, Clone, Default)]
pub struct TabuMemory {
    set: HashSet<Pattern>,
    queue: VecDeque<Pattern>,
    tenure: Option<usize>,
}

impl TabuMemory {
    /// Creates an empty memory with the given tenure.
    pub fn new(tenure: Option<usize>) -> Self {
        Self {
            set: HashSet::new(),
            queue: VecDeque::new(),
            tenure,
        }
    }

    /// Whether `pattern` is currently tabu.
    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.set.contains(pattern)
    }

    /// Marks `pattern` as visited. Returns `false` if it already was.
    pub fn insert(&mut self, pattern: Pattern) -> bool {
        if !self.set.insert(pattern.clone()) {
            return false;
        }
        // Insertion order only matters when entries can expire.
        if let Some(tenure) = self.tenure {
            self.queue.push_back(pattern);
            while self.queue.len() > tenure {
                if let Some(old) = self.queue.pop_front() {
                    self.set.remove(&old);
                }
            }
        }
        true
    }

    /// Number of patterns currently held.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether the memory is empty.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Tenure limit, if any.
    pub fn tenure(&self) -> Option<usize> {
        self.tenure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Pattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_unbounded_memory_keeps_everything() {
        let mut memory = TabuMemory::new(None);
        assert!(memory.insert(p("f")));
        assert!(memory.insert(p("fn")));
        assert!(!memory.insert(p("f")));
        assert!(memory.contains(&p("f")));
        assert!(!memory.contains(&p("nf")));
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.tenure(), None);
        assert!(memory.queue.is_empty());
    }

    #[test]
    fn test_bounded_memory_evicts_oldest() {
        let mut memory = TabuMemory::new(Some(2));
        memory.insert(p("f"));
        memory.insert(p("n"));
        memory.insert(p("w"));
        assert_eq!(memory.tenure(), Some(2));
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.queue.len(), 2);
        assert!(!memory.contains(&p("f")));
        assert!(memory.contains(&p("n")));
        assert!(memory.contains(&p("w")));

        // An evicted pattern can be inserted again.
        assert!(memory.insert(p("f")));
        assert!(!memory.contains(&p("n")));
    }

    #[test]
    fn test_duplicate_insert_does_not_refresh() {
        let mut memory = TabuMemory::new(Some(2));
        memory.insert(p("f"));
        memory.insert(p("n"));
        assert!(!memory.insert(p("f")));
        memory.insert(p("w"));
        assert!(!memory.contains(&p("f")));
    }
}
