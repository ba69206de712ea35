use std::{
    fmt::{Debug, Display},
    hash::Hash,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use by_address::ByAddress;
use indexmap::IndexMap;

/// Name of the pre-registered default placeholder.
pub const UNDERSCORE: &str = "_";

#[derive(Debug)]
struct PlaceholderData {
    name: Box<str>,
}

/// A named hole.
///
/// Placeholders are interned: for any name there is exactly one instance for the lifetime of
/// the process, so equality and hashing are by address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder(ByAddress<&'static PlaceholderData>);

impl Placeholder {
    /// Returns the placeholder registered under `name`, creating it on first use.
    pub fn named(name: &str) -> Self {
        Registry::global().get_or_create(name)
    }

    /// Sub-placeholder lookup, the equivalent of writing `_.name`.
    ///
    /// Sub-placeholders live in the same flat namespace as every other placeholder, so
    /// `a.attr("x") == b.attr("x")` for any `a` and `b`.
    pub fn attr(&self, name: &str) -> Self {
        Self::named(name)
    }

    pub fn name(&self) -> &'static str {
        let data: &'static PlaceholderData = self.0.0;
        &data.name
    }

    pub fn is_underscore(&self) -> bool {
        self.name() == UNDERSCORE
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        underscore()
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_underscore() {
            f.write_str(UNDERSCORE)
        } else {
            write!(f, "{UNDERSCORE}.{}", self.name())
        }
    }
}

impl Debug for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Placeholder({self})")
    }
}

/// Process-wide name to placeholder map. Append-only.
pub struct Registry {
    holes: Mutex<IndexMap<Box<str>, Placeholder>>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(|| {
            let registry = Self {
                holes: Mutex::new(IndexMap::new()),
            };
            registry.get_or_create(UNDERSCORE);
            registry
        })
    }

    // Entries are only ever appended, so a panic in another holder cannot leave the map
    // half-updated.
    fn lock(&self) -> MutexGuard<'_, IndexMap<Box<str>, Placeholder>> {
        self.holes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the existing placeholder for `name` or interns a new one.
    pub fn get_or_create(&self, name: &str) -> Placeholder {
        let mut holes = self.lock();
        if let Some(hole) = holes.get(name) {
            return *hole;
        }
        tracing::trace!("intern placeholder {name:?}");
        let data: &'static PlaceholderData = Box::leak(Box::new(PlaceholderData {
            name: name.into(),
        }));
        let hole = Placeholder(ByAddress(data));
        holes.insert(name.into(), hole);
        hole
    }

    /// Looks `name` up without creating it.
    pub fn get(&self, name: &str) -> Option<Placeholder> {
        self.lock().get(name).copied()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// The default placeholder `_`.
pub fn underscore() -> Placeholder {
    Registry::global().get_or_create(UNDERSCORE)
}

pub fn placeholder(name: &str) -> Placeholder {
    Placeholder::named(name)
}
