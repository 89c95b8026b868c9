// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::{BinSegError, Result};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Factory function producing a fresh boxed instance.
pub type Constructor<T> = fn() -> Box<T>;

struct Entry<T: ?Sized> {
    description: String,
    constructor: Constructor<T>,
}

impl<T: ?Sized> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            constructor: self.constructor,
        }
    }
}

/// Name-keyed factory for trait objects.
///
/// Registration is first-wins: re-registering a name is a no-op that returns
/// `false`, so repeated startup registration is harmless. Writers need
/// `&mut self`; once built, a registry can be shared read-only across threads.
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    entries: BTreeMap<String, Entry<T>>,
}

impl<T: ?Sized> Registry<T> {
    /// Creates an empty registry; `kind` names the entries in errors and logs.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Registers `constructor` under `name` unless the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        constructor: Constructor<T>,
    ) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            debug!(kind = self.kind, name = %name, "registration ignored: name already taken");
            return false;
        }

        debug!(kind = self.kind, name = %name, "registered");
        self.entries.insert(
            name,
            Entry {
                description: description.into(),
                constructor,
            },
        );
        true
    }

    /// Builds a fresh instance of the entry named `name`.
    pub fn create(&self, name: &str) -> Result<Box<T>> {
        match self.entries.get(name) {
            Some(entry) => {
                debug!(kind = self.kind, name, hit = "exact", "registry lookup");
                Ok((entry.constructor)())
            }
            None => {
                debug!(kind = self.kind, name, hit = "miss", "registry lookup");
                Err(BinSegError::not_found(self.kind, name))
            }
        }
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(|entry| entry.description.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name to description mapping, ordered by name.
    pub fn list_registered(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.description.clone()))
            .collect()
    }
}

impl<T: ?Sized> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            entries: self.entries.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
