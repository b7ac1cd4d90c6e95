//! Explicit per-resource configuration records.
//!
//! The markup that describes resources is parsed elsewhere; this module only
//! holds the parsed record shape. Records can be built in code or read from
//! JSON:
//!
//! ```
//! use keel_resource::definition::ResourceDefinitions;
//!
//! let definitions = ResourceDefinitions::from_json_str(r#"{
//!     "my_loops": {
//!         "kind": "loops",
//!         "locator_key": "FileSystem",
//!         "locator_identifier": "/tmp/x.loops",
//!         "loader_key": "LoopsFile",
//!         "options": { "prohibit_single_residue_loops": "false" }
//!     }
//! }"#).unwrap();
//!
//! let record = definitions.get("my_loops").unwrap();
//! assert_eq!(record.loader_key, "LoopsFile");
//! assert_eq!(record.options.get("prohibit_single_residue_loops"), Some("false"));
//! ```

use crate::error::DefinitionError;
use crate::settings::Settings;
use indexmap::IndexMap;
use core::fmt;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// ResourceConfiguration
// ─────────────────────────────────────────────────────────────────────────────

/// How to build one named resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfiguration {
    /// Resource kind (e.g. `"loops"`). Reported in logs; construction is
    /// driven by the keys below.
    pub kind: String,
    /// Locator registry key.
    pub locator_key: String,
    /// Identifier handed to the locator.
    pub locator_identifier: String,
    /// Loader registry key.
    pub loader_key: String,
    /// Options registry key. When absent the loader's default options are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_key: Option<String>,
    /// Settings applied to the options.
    #[serde(default, skip_serializing_if = "Settings::is_empty")]
    pub options: Settings,
    /// Settings applied to the locator.
    #[serde(default, skip_serializing_if = "Settings::is_empty")]
    pub locator_settings: Settings,
}

impl ResourceConfiguration {
    /// Creates a record with no options or locator settings.
    pub fn new(
        kind: impl Into<String>,
        locator_key: impl Into<String>,
        locator_identifier: impl Into<String>,
        loader_key: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            locator_key: locator_key.into(),
            locator_identifier: locator_identifier.into(),
            loader_key: loader_key.into(),
            options_key: None,
            options: Settings::new(),
            locator_settings: Settings::new(),
        }
    }

    /// Selects a registered options type.
    #[must_use]
    pub fn with_options_key(mut self, key: impl Into<String>) -> Self {
        self.options_key = Some(key.into());
        self
    }

    /// Adds an options setting.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key, value);
        self
    }

    /// Adds a locator setting.
    #[must_use]
    pub fn with_locator_setting(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.locator_settings.insert(key, value);
        self
    }

    /// Checks that every required key is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingField`] naming the first empty field.
    pub fn validate(&self, resource: &str) -> Result<(), DefinitionError> {
        let required = [
            ("kind", &self.kind),
            ("locator_key", &self.locator_key),
            ("loader_key", &self.loader_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DefinitionError::MissingField {
                    resource: resource.to_string(),
                    field,
                });
            }
        }
        if self.options_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err(DefinitionError::MissingField {
                resource: resource.to_string(),
                field: "options_key",
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ResourceDefinitions
// ─────────────────────────────────────────────────────────────────────────────

/// The table of explicitly configured resources, keyed by resource name.
///
/// Names are unique and iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceDefinitions {
    resources: IndexMap<String, ResourceConfiguration>,
}

impl ResourceDefinitions {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: IndexMap::new(),
        }
    }

    /// Adds a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already defined or the record is
    /// missing a required key.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        configuration: ResourceConfiguration,
    ) -> Result<(), DefinitionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DefinitionError::MissingField {
                resource: name,
                field: "name",
            });
        }
        configuration.validate(&name)?;
        if self.resources.contains_key(&name) {
            return Err(DefinitionError::DuplicateResource(name));
        }
        self.resources.insert(name, configuration);
        Ok(())
    }

    /// Adds a record, builder style.
    ///
    /// # Errors
    ///
    /// Same as [`insert()`](Self::insert).
    pub fn with(
        mut self,
        name: impl Into<String>,
        configuration: ResourceConfiguration,
    ) -> Result<Self, DefinitionError> {
        self.insert(name, configuration)?;
        Ok(self)
    }

    /// Parses a JSON object mapping resource names to records.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON, an invalid record or a name that
    /// appears twice.
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON definitions file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Returns the record for a resource name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResourceConfiguration> {
        self.resources.get(name)
    }

    /// Returns whether a resource name is configured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// Returns configured names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if no resources are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl<'de> Deserialize<'de> for ResourceDefinitions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DefinitionsVisitor;

        impl<'de> Visitor<'de> for DefinitionsVisitor {
            type Value = ResourceDefinitions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of resource names to configuration records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut definitions = ResourceDefinitions::new();
                while let Some((name, configuration)) =
                    map.next_entry::<String, ResourceConfiguration>()?
                {
                    definitions
                        .insert(name, configuration)
                        .map_err(de::Error::custom)?;
                }
                Ok(definitions)
            }
        }

        deserializer.deserialize_map(DefinitionsVisitor)
    }
}
