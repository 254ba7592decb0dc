use std::fmt;
use std::sync::Arc;

/// A named clock belonging to one automaton.
///
/// Equality covers the owning scope and declaration index as well as the
/// name, so same-named clocks of different automata never alias.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clock {
    name: Arc<str>,
    scope: u32,
    index: usize,
}

impl Clock {
    /// Creates a clock in the default scope.
    pub fn new(name: impl Into<Arc<str>>, index: usize) -> Self {
        Self::scoped(0, name, index)
    }

    /// Creates a clock owned by the automaton identified by `scope`.
    pub fn scoped(scope: u32, name: impl Into<Arc<str>>, index: usize) -> Self {
        Self {
            name: name.into(),
            scope,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> u32 {
        self.scope
    }

    /// Declaration index inside the owning automaton, fixed at construction.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clock({}#{}@{})", self.name, self.index, self.scope)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
