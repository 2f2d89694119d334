//! Interned identifiers for model names.
//!
//! Declaration names, property names and decorator names are compared far more
//! often than they are created, so they are stored as [`Id`] symbols backed by
//! a process-wide string interner.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// Access is serialized through a `Mutex`.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier.
///
/// Equality and hashing operate on the interned symbol, so two ids built from
/// the same text are always equal and comparing them is a single integer
/// comparison. Comparison is case-sensitive.
///
/// # Examples
///
/// ```
/// use tessel_core::identifier::Id;
///
/// let term = Id::new("Term");
/// assert_eq!(term, Id::new("Term"));
/// assert_ne!(term, Id::new("term"));
///
/// let person = Id::qualified("org.acme@1.0.0", "Person");
/// assert_eq!(person, "org.acme@1.0.0.Person");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the fully qualified id `namespace.name`.
    pub fn qualified(namespace: &str, name: &str) -> Self {
        Self::new(&format!("{namespace}.{name}"))
    }

    /// Runs `f` with the text of this identifier.
    ///
    /// The interner lock is held while `f` runs, so `f` must not create or
    /// resolve other ids.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let text = interner.resolve(self.0).unwrap_or_default();
        f(text)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.with_str(str::to_owned);
        f.write_str(&text)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "Term"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|text| text == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
