//! Introspection of registered products.

use core::fmt;
use keel_resource::Registries;
use serde::Serialize;

/// Snapshot of one registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySection {
    /// Product kind (`"loader"`, `"locator"`, `"options"` or `"fallback"`).
    pub kind: &'static str,
    /// Registered keys, sorted.
    pub keys: Vec<String>,
    /// Whether the registry was frozen when the snapshot was taken.
    pub frozen: bool,
}

/// Snapshot of every registry, suitable for startup logs and `--list` style
/// output.
///
/// Keys are sorted because installation order depends on link order.
///
/// # Example
///
/// ```
/// use keel_diagnostics::RegistryReport;
/// use keel_resource::Registries;
///
/// let report = RegistryReport::from_registries(&Registries::with_static_registrations());
/// let locators = report.section("locator").unwrap();
/// assert_eq!(locators.keys, ["FileSystem", "Inline", "NullLocator"]);
///
/// assert!(report.to_string().contains("locator (3, open): FileSystem, Inline, NullLocator"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryReport {
    sections: Vec<RegistrySection>,
}

impl RegistryReport {
    /// Takes a snapshot of `registries`.
    #[must_use]
    pub fn from_registries(registries: &Registries) -> Self {
        fn section(kind: &'static str, mut keys: Vec<String>, frozen: bool) -> RegistrySection {
            keys.sort_unstable();
            RegistrySection { kind, keys, frozen }
        }

        let loaders = registries.loaders();
        let locators = registries.locators();
        let options = registries.options();
        let fallbacks = registries.fallbacks();

        Self {
            sections: vec![
                section(loaders.kind(), loaders.all_keys(), loaders.is_frozen()),
                section(locators.kind(), locators.all_keys(), locators.is_frozen()),
                section(options.kind(), options.all_keys(), options.is_frozen()),
                section(fallbacks.kind(), fallbacks.all_keys(), fallbacks.is_frozen()),
            ],
        }
    }

    /// Takes a snapshot of the process-wide registries.
    #[must_use]
    pub fn global() -> Self {
        Self::from_registries(&Registries::global())
    }

    /// Returns every section in `loader`, `locator`, `options`, `fallback` order.
    #[must_use]
    pub fn sections(&self) -> &[RegistrySection] {
        &self.sections
    }

    /// Returns the section for one product kind.
    #[must_use]
    pub fn section(&self, kind: &str) -> Option<&RegistrySection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Returns the total number of registered products.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.keys.len()).sum()
    }

    /// Serializes the report as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Emits one `info` event per product kind.
    pub fn log(&self) {
        for section in &self.sections {
            tracing::info!(
                kind = section.kind,
                count = section.keys.len(),
                frozen = section.frozen,
                keys = ?section.keys,
                "registered products"
            );
        }
    }
}

impl fmt::Display for RegistryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            let state = if section.frozen { "frozen" } else { "open" };
            writeln!(
                f,
                "{} ({}, {}): {}",
                section.kind,
                section.keys.len(),
                state,
                section.keys.join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_resource::{FnCreator, ResourceLoader};

    fn no_loader() -> Box<dyn ResourceLoader> {
        unreachable!("never created in these tests")
    }

    #[test]
    fn empty_registries() {
        let report = RegistryReport::from_registries(&Registries::new());
        assert_eq!(report.total(), 0);
        assert_eq!(report.sections().len(), 4);
        assert_eq!(
            report.to_string(),
            "loader (0, open): \nlocator (0, open): \noptions (0, open): \nfallback (0, open): \n"
        );
    }

    #[test]
    fn keys_sorted_and_freeze_reported() {
        let registries = Registries::new();
        registries
            .loaders()
            .register(FnCreator::new("Zeta", no_loader))
            .unwrap();
        registries
            .loaders()
            .register(FnCreator::new("Alpha", no_loader))
            .unwrap();
        registries.finish();

        let report = RegistryReport::from_registries(&registries);
        let loaders = report.section("loader").unwrap();

        assert_eq!(loaders.keys, ["Alpha", "Zeta"]);
        assert!(loaders.frozen);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn json_lists_sections() {
        let report = RegistryReport::from_registries(&Registries::with_static_registrations());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["sections"][1]["kind"], "locator");
        assert_eq!(json["sections"][2]["keys"][0], "Basic");
    }
}
