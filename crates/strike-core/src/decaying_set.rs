use std::collections::HashSet;
use std::hash::Hash;

/// Bounded-memory "already seen" set built from two generations.
///
/// Each cycle inserts into the active generation only, until the cycle
/// counter passes `3 * decay`. The next `decay` insertions also prime the
/// inactive generation. At `4 * decay` the primed generation becomes active
/// and the old one is cleared, so each generation holds at most `4 * decay`
/// entries.
#[derive(Clone, Debug)]
pub struct DecayingSet<T> {
    first: HashSet<T>,
    second: HashSet<T>,
    first_active: bool,
    counter: usize,
    decay: usize,
}

impl<T: Eq + Hash + Clone> DecayingSet<T> {
    /// # Panics
    /// Panics if `decay` is zero.
    pub fn new(decay: usize) -> Self {
        assert!(decay > 0, "decaying set decay must be positive");
        Self {
            first: HashSet::new(),
            second: HashSet::new(),
            first_active: true,
            counter: 0,
            decay,
        }
    }

    pub fn add(&mut self, value: T) {
        self.counter += 1;
        if self.counter > 3 * self.decay {
            self.inactive_mut().insert(value.clone());
        }
        self.active_mut().insert(value);

        if self.counter >= 4 * self.decay {
            self.first_active = !self.first_active;
            self.inactive_mut().clear();
            self.counter = self.active().len();
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.active().contains(value)
    }

    /// Union of both generations, without duplicates.
    pub fn values(&self) -> Vec<T> {
        self.first.union(&self.second).cloned().collect()
    }

    pub fn decay(&self) -> usize {
        self.decay
    }

    /// Entry counts of the (active, inactive) generations.
    pub fn generation_sizes(&self) -> (usize, usize) {
        (self.active().len(), self.inactive().len())
    }

    fn active(&self) -> &HashSet<T> {
        if self.first_active {
            &self.first
        } else {
            &self.second
        }
    }

    fn inactive(&self) -> &HashSet<T> {
        if self.first_active {
            &self.second
        } else {
            &self.first
        }
    }

    fn active_mut(&mut self) -> &mut HashSet<T> {
        if self.first_active {
            &mut self.first
        } else {
            &mut self.second
        }
    }

    fn inactive_mut(&mut self) -> &mut HashSet<T> {
        if self.first_active {
            &mut self.second
        } else {
            &mut self.first
        }
    }
}
