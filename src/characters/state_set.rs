use std::fmt::Display;
use std::ops::{BitAnd, BitOr, Deref};

use hashbrown::{hash_set::IntoIter, hash_set::Iter, HashSet};
use itertools::join;

/// Candidate character states for one node in one column. Leaf states
/// start out as singletons; the reconciliation rule produces larger sets
/// at internal nodes when sibling states disagree.
#[repr(transparent)]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct StateSet {
    pub s: HashSet<u8>,
}

impl StateSet {
    pub fn new() -> Self {
        Self { s: HashSet::new() }
    }

    pub fn singleton(state: u8) -> Self {
        StateSet::from_iter([state])
    }

    pub fn from_slice(states: &[u8]) -> Self {
        StateSet::from_iter(states.iter().copied())
    }
}

impl std::iter::FromIterator<u8> for StateSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        StateSet {
            s: HashSet::from_iter(iter),
        }
    }
}

impl Deref for StateSet {
    type Target = HashSet<u8>;

    fn deref(&self) -> &Self::Target {
        &self.s
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars: Vec<char> = self.s.iter().map(|&a| a as char).collect();
        chars.sort();
        write!(f, "[{}]", join(chars.iter(), " "))
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a u8;
    type IntoIter = Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.s.iter()
    }
}

impl IntoIterator for StateSet {
    type Item = u8;
    type IntoIter = IntoIter<u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.s.into_iter()
    }
}

impl BitAnd for &StateSet {
    type Output = StateSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        StateSet {
            s: self.s.intersection(&rhs.s).copied().collect(),
        }
    }
}

impl BitOr for &StateSet {
    type Output = StateSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        StateSet {
            s: self.s.union(&rhs.s).copied().collect(),
        }
    }
}
