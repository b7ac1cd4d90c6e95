//! String-keyed settings attached to resource records.

use crate::error::OptionsError;
use core::fmt::Display;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ordered `name -> value` map of textual settings.
///
/// Settings arrive as strings from whatever markup produced the resource
/// record; options and locators parse them with [`parse()`](Self::parse).
///
/// # Example
///
/// ```
/// use keel_resource::settings::Settings;
///
/// let settings = Settings::new()
///     .with("prohibit_single_residue_loops", "false")
///     .with("max_loops", "12");
///
/// assert_eq!(settings.parse::<bool>("prohibit_single_residue_loops").unwrap(), Some(false));
/// assert_eq!(settings.parse_or("max_loops", 0_u32).unwrap(), 12);
/// assert_eq!(settings.parse_or("missing", 7_u32).unwrap(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, String>);

impl Settings {
    /// Creates empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a setting, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a setting, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the raw value of a setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns whether a setting is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns a copy without the given setting.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.0.remove(key);
        copy
    }

    /// Parses a setting into `T`, returning `None` if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidValue`] if the value does not parse.
    pub fn parse<T>(&self, key: &str) -> Result<Option<T>, OptionsError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(key)
            .map(|value| {
                value.parse::<T>().map_err(|e| OptionsError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Parses a setting into `T`, falling back to `default` if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidValue`] if the value does not parse.
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T, OptionsError>
    where
        T: FromStr,
        T::Err: Display,
    {
        Ok(self.parse(key)?.unwrap_or(default))
    }

    /// Returns the number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates setting names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for Settings {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}
