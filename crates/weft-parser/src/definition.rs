//! Grammar rules inside composite and block kinds.

use std::fmt;

use crate::kind::ElementKind;

/// What a definition matches: a single kind or a nested sequence.
#[derive(Clone, Copy)]
pub enum Target {
    /// One element of the given kind.
    Leaf(&'static ElementKind),
    /// A nested sequence of definitions, matched with the same algorithm as
    /// a composite but without creating a node of its own.
    Group(&'static [ElementDefinition]),
}

/// One entry in the ordered definitions of a composite or block kind.
///
/// Definitions default to required and single; [`optional`](Self::optional)
/// and [`repeated`](Self::repeated) relax that. A repeated definition matches
/// greedily with no separator between occurrences. Separated repetition is
/// expressed with a list kind instead.
///
/// ```
/// use weft_parser::{ElementDefinition, ElementKind};
///
/// static SPACE: ElementKind = ElementKind::pattern("Space", r"\s+");
///
/// let spaces = ElementDefinition::element(&SPACE).optional().repeated();
/// assert!(!spaces.is_required());
/// assert!(spaces.is_repeatable());
/// ```
#[derive(Clone, Copy)]
pub struct ElementDefinition {
    target: Target,
    required: bool,
    repeatable: bool,
}

impl ElementDefinition {
    /// Create a definition with explicit flags.
    pub const fn new(target: Target, required: bool, repeatable: bool) -> Self {
        Self {
            target,
            required,
            repeatable,
        }
    }

    /// A required, single occurrence of `kind`.
    pub const fn element(kind: &'static ElementKind) -> Self {
        Self::new(Target::Leaf(kind), true, false)
    }

    /// A required, single occurrence of the nested `definitions`.
    pub const fn group(definitions: &'static [ElementDefinition]) -> Self {
        Self::new(Target::Group(definitions), true, false)
    }

    /// The same definition, but allowed to match nothing.
    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    /// The same definition, but matched as many times as possible.
    pub const fn repeated(self) -> Self {
        Self {
            repeatable: true,
            ..self
        }
    }

    /// What this definition matches.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Whether a missing match is an error once the owner has committed.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether consecutive occurrences are matched greedily.
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Leaf(kind) => write!(f, "`{}`", kind.name()),
            Target::Group(definitions) => {
                f.write_str("(")?;
                for (i, definition) in definitions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{definition}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match (self.required, self.repeatable) {
            (true, false) => "",
            (false, false) => "?",
            (true, true) => "+",
            (false, true) => "*",
        };
        write!(f, "{}{suffix}", self.target)
    }
}

impl fmt::Debug for ElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
