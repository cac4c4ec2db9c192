//! Identifier management using string interning for efficient name storage and comparison
//!
//! Component, instance and port names are stored as [`Id`]s. Qualified connector
//! endpoints stay plain strings and are split by [`crate::qualified::QualifiedName`].

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned name of a component, instance or port.
///
/// # Examples
///
/// ```
/// use arcwire_core::identifier::Id;
///
/// let component = Id::new("Outer");
/// let instance = Id::new("s");
///
/// assert_eq!(component.qualify(instance), "Outer.s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str, interning it if it was not seen before.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcwire_core::identifier::Id;
    ///
    /// let port = Id::new("speed");
    /// assert_eq!(port, "speed");
    /// ```
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Looks up an already interned name without interning it.
    ///
    /// Returns `None` when `name` was never interned, which means no model
    /// element can carry that name. Lookups use this so that resolving a
    /// name never grows the interner.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcwire_core::identifier::Id;
    ///
    /// let declared = Id::new("declared_port");
    /// assert_eq!(Id::lookup("declared_port"), Some(declared));
    /// assert_eq!(Id::lookup("never_declared_anywhere"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }

    /// Joins this identifier and `child` with the `.` separator.
    ///
    /// Used for fully qualified instance names such as `Outer.s`.
    pub fn qualify(&self, child: Id) -> Self {
        let mut interner = interner();
        let parent_str = interner
            .resolve(self.0)
            .expect("Parent ID should exist in interner");
        let child_str = interner
            .resolve(child.0)
            .expect("Child ID should exist in interner");
        let qualified = format!("{parent_str}.{child_str}");
        Self(interner.get_or_intern(&qualified))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
