use indexmap::IndexMap;

use super::Backend;
use crate::error::{Error, Result};

/// Backends by id. Built once by the caller and passed down; there is no
/// process-wide instance.
pub struct Registry {
    backends: IndexMap<&'static str, Box<dyn Backend>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self { backends: IndexMap::new() }
    }

    /// Every backend shipped with the crate.
    pub fn builtin() -> Self {
        let mut r = Self::empty();
        r.register(Box::new(super::typescript::TypeScript));
        r.register(Box::new(super::javascript::JavaScript));
        r.register(Box::new(super::python::Python));
        r.register(Box::new(super::rust::Rust));
        r.register(Box::new(super::go::Go));
        r.register(Box::new(super::c::C));
        r.register(Box::new(super::cpp::Cpp));
        r.register(Box::new(super::java::Java));
        r.register(Box::new(super::kotlin::Kotlin));
        r
    }

    /// Add a backend, replacing (and returning) one with the same id.
    pub fn register(&mut self, backend: Box<dyn Backend>) -> Option<Box<dyn Backend>> {
        self.backends.insert(backend.id(), backend)
    }

    /// Look a backend up by id, case-insensitively.
    pub fn get(&self, id: &str) -> Result<&dyn Backend> {
        self.backends
            .get(id.to_ascii_lowercase().as_str())
            .map(|b| b.as_ref())
            .ok_or_else(|| Error::UnsupportedBackend { id: id.to_string(), available: self.ids() })
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.backends.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Backend> {
        self.backends.values().map(|b| b.as_ref())
    }
}

impl Default for Registry {
    fn default() -> Self { Self::builtin() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids() {
        let r = Registry::builtin();
        assert_eq!(
            r.ids(),
            ["typescript", "javascript", "python", "rust", "go", "c", "cpp", "java", "kotlin"]
        );
        for b in r.iter() {
            assert_eq!(r.get(b.id()).unwrap().id(), b.id());
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Registry::builtin().get("Rust").unwrap().label(), "Rust");
    }

    #[test]
    fn unknown_backend_lists_the_available_ones() {
        let err = Registry::builtin().get("cobol").err().unwrap();
        match &err {
            Error::UnsupportedBackend { id, available } => {
                assert_eq!(id, "cobol");
                assert_eq!(available.len(), 9);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().contains("`cobol`"));
    }

    #[test]
    fn register_replaces_same_id() {
        let mut r = Registry::builtin();
        let old = r.register(Box::new(crate::codegen::go::Go));
        assert!(old.is_some());
        assert_eq!(r.ids().len(), 9);
    }
}
