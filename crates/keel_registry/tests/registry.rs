//! Integration tests for [`Registry`] registration and lookup semantics.

use keel_registry::{Creator, FnCreator, Registry, RegistryError};

trait Parser: Send + Sync {
    fn format(&self) -> String;
}

struct Named(&'static str);

impl Parser for Named {
    fn format(&self) -> String {
        self.0.to_string()
    }
}

/// Creator whose product remembers which creator built it.
struct TaggedCreator {
    key: &'static str,
    tag: &'static str,
}

impl Creator<dyn Parser> for TaggedCreator {
    fn key(&self) -> &str {
        self.key
    }

    fn create(&self) -> Box<dyn Parser> {
        Box::new(Named(self.tag))
    }
}

fn tagged(key: &'static str, tag: &'static str) -> TaggedCreator {
    TaggedCreator { key, tag }
}

#[test]
fn distinct_keys_are_all_retrievable() {
    let registry: Registry<dyn Parser> = Registry::new("parser");
    let keys = ["LoopsFile", "SpanFile", "PoseFile", "ScoreFunction"];

    for key in keys {
        registry.register(tagged(key, key)).unwrap();
    }

    let mut listed = registry.all_keys();
    listed.sort();
    let mut expected: Vec<String> = keys.iter().map(ToString::to_string).collect();
    expected.sort();
    assert_eq!(listed, expected);

    for key in keys {
        assert!(registry.has(key));
        assert_eq!(registry.create(key).unwrap().format(), key);
    }
}

#[test]
fn all_keys_preserves_insertion_order() {
    let registry: Registry<dyn Parser> = Registry::new("parser");
    registry.register(tagged("b", "b")).unwrap();
    registry.register(tagged("a", "a")).unwrap();
    registry.register(tagged("c", "c")).unwrap();

    assert_eq!(registry.all_keys(), vec!["b", "a", "c"]);
}

#[test]
fn duplicate_registration_keeps_first_entry() {
    let registry: Registry<dyn Parser> = Registry::new("parser");
    registry.register(tagged("LoopsFile", "first")).unwrap();
    let before = registry.all_keys();

    let result = registry.register(tagged("LoopsFile", "second"));

    assert_eq!(
        result,
        Err(RegistryError::DuplicateRegistration {
            kind: "parser",
            key: "LoopsFile".into(),
        })
    );
    assert_eq!(registry.all_keys(), before);
    assert_eq!(registry.create("LoopsFile").unwrap().format(), "first");
}

#[test]
fn duplicate_registration_rejected_in_either_order() {
    for (first, second) in [("alpha", "beta"), ("beta", "alpha")] {
        let registry: Registry<dyn Parser> = Registry::new("parser");
        registry.register(tagged("Shared", first)).unwrap();

        let result = registry.register(tagged("Shared", second));

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateRegistration { .. })
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.create("Shared").unwrap().format(), first);
    }
}

#[test]
fn unknown_key_is_reported() {
    let registry: Registry<dyn Parser> = Registry::new("parser");
    registry.register(tagged("LoopsFile", "loops")).unwrap();

    let error = registry.create("SpanFile").err().unwrap();

    assert_eq!(
        error,
        RegistryError::UnknownKey {
            kind: "parser",
            key: "SpanFile".into(),
        }
    );
    assert_eq!(error.to_string(), "unknown parser 'SpanFile'");
}

#[test]
fn registration_after_freeze_is_rejected() {
    let registry: Registry<dyn Parser> = Registry::new("parser");
    registry.register(tagged("LoopsFile", "loops")).unwrap();
    registry.freeze();

    let result = registry.register(tagged("SpanFile", "span"));

    assert!(matches!(result, Err(RegistryError::Frozen { .. })));
    assert!(!registry.has("SpanFile"));
    assert_eq!(registry.create("LoopsFile").unwrap().format(), "loops");
}

#[test]
fn registration_after_first_create_is_rejected() {
    let registry: Registry<dyn Parser> = Registry::new("parser");
    registry.register(tagged("LoopsFile", "loops")).unwrap();
    let _ = registry.create("LoopsFile").unwrap();

    let result = registry.register(tagged("SpanFile", "span"));

    assert!(matches!(result, Err(RegistryError::Frozen { .. })));
}

#[test]
fn each_create_returns_a_fresh_instance() {
    fn build() -> Box<dyn Parser> {
        Box::new(Named("fresh"))
    }

    let registry: Registry<dyn Parser> = Registry::new("parser");
    registry.register(FnCreator::new("Fresh", build)).unwrap();

    let first = registry.create("Fresh").unwrap();
    let second = registry.create("Fresh").unwrap();

    assert_eq!(first.format(), second.format());
    assert!(!core::ptr::addr_eq(&*first, &*second));
}
