//! The resource construction pipeline.
//!
//! Construction moves through four stages, each a distinct type:
//!
//! ```text
//! Pipeline<Unresolved> --locate()--> Pipeline<Located>
//!     --stream()--> Pipeline<Streamed> --load()--> Box<dyn Resource>
//! ```
//!
//! 1. **Unresolved -> Located**: a [`Resolution`] supplies the locator key,
//!    identifier, loader key and options source, from an explicit record or
//!    from the fallback registered for the resource kind.
//! 2. **Located -> Streamed**: a fresh locator is created, configured and asked
//!    for a [`ResourceStream`].
//! 3. **Streamed -> Loaded**: a fresh loader is created, options are built and
//!    named, and the loader consumes the stream.
//!
//! Every failure is a [`ConstructionError`] whose [`stage()`](ConstructionError::stage)
//! names the stage that could not be reached. There is no retry and no hidden
//! state: the same configuration and stream content always produce the same
//! resource.
//!
//! Most callers go through [`ResourceManager`](crate::manager::ResourceManager)
//! instead of driving the stages by hand.

use crate::definition::{ResourceConfiguration, ResourceDefinitions};
use crate::error::ConstructionError;
use crate::fallback::FallbackDefaults;
use crate::options::{DEFAULT_OPTIONS_NAME, NAME_SETTING, ResourceOptions};
use crate::registries::Registries;
use crate::resource::Resource;
use crate::settings::Settings;
use crate::stream::ResourceStream;
use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Stage
// ─────────────────────────────────────────────────────────────────────────────

/// A point in the construction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing is known beyond the resource name.
    Unresolved,
    /// Locator, loader and options have been decided.
    Located,
    /// The locator produced a stream.
    Streamed,
    /// The loader produced the resource.
    Loaded,
}

impl Stage {
    /// Returns the stage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "Unresolved",
            Self::Located => "Located",
            Self::Streamed => "Streamed",
            Self::Loaded => "Loaded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Where a resource's configuration came from.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// An explicit record exists for the name.
    Explicit(&'a ResourceConfiguration),
    /// No record exists; the fallback for `kind` supplied defaults.
    Fallback {
        /// Kind whose fallback was consulted.
        kind: String,
        /// The fallback's defaults.
        defaults: FallbackDefaults,
    },
    /// Neither a record nor a usable fallback exists.
    Unresolved {
        /// Kind whose fallback was looked up.
        kind: String,
        /// Why no fallback applied.
        reason: String,
    },
}

impl Resolution<'_> {
    /// Returns true if an explicit record was found.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Returns true if a fallback supplied the configuration.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Resolves the configuration for `resource`.
///
/// An explicit record always wins. Otherwise the fallback registered under
/// `kind` is created and asked for defaults.
pub fn resolve<'a>(
    registries: &Registries,
    definitions: &'a ResourceDefinitions,
    resource: &str,
    kind: &str,
) -> Resolution<'a> {
    if let Some(configuration) = definitions.get(resource) {
        return Resolution::Explicit(configuration);
    }

    let fallback = match registries.fallbacks().create(kind) {
        Ok(fallback) => fallback,
        Err(_) => {
            return Resolution::Unresolved {
                kind: kind.to_string(),
                reason: format!("no fallback is registered for kind '{kind}'"),
            };
        }
    };

    match fallback.provide_default(resource) {
        Some(defaults) => Resolution::Fallback {
            kind: kind.to_string(),
            defaults,
        },
        None => Resolution::Unresolved {
            kind: kind.to_string(),
            reason: fallback.explain(resource),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stage States
// ─────────────────────────────────────────────────────────────────────────────

mod sealed {
    pub trait Sealed {}
}

/// Marker for the typestates of a [`Pipeline`].
pub trait PipelineState: sealed::Sealed {
    /// The stage this state represents.
    const STAGE: Stage;
}

/// Initial state: only the resource name is known.
#[derive(Debug)]
pub struct Unresolved;

/// Configuration has been decided.
#[derive(Debug)]
pub struct Located {
    plan: Plan,
}

/// The stream is open.
#[derive(Debug)]
pub struct Streamed {
    plan: Plan,
    stream: ResourceStream,
}

impl sealed::Sealed for Unresolved {}
impl sealed::Sealed for Located {}
impl sealed::Sealed for Streamed {}

impl PipelineState for Unresolved {
    const STAGE: Stage = Stage::Unresolved;
}

impl PipelineState for Located {
    const STAGE: Stage = Stage::Located;
}

impl PipelineState for Streamed {
    const STAGE: Stage = Stage::Streamed;
}

/// Everything decided at [`Stage::Located`].
#[derive(Debug)]
struct Plan {
    locator_key: String,
    locator_identifier: String,
    locator_settings: Settings,
    loader_key: String,
    options: OptionsSource,
}

#[derive(Debug)]
enum OptionsSource {
    /// Built at load time from the options registry or the loader's defaults.
    Configured {
        key: Option<String>,
        settings: Settings,
    },
    /// Supplied ready-made by a fallback.
    Provided(Box<dyn ResourceOptions>),
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// One construction run for one resource name.
///
/// # Example
///
/// ```
/// use keel_resource::definition::{ResourceConfiguration, ResourceDefinitions};
/// use keel_resource::pipeline::{Pipeline, Stage, resolve};
/// use keel_resource::registries::Registries;
///
/// let registries = Registries::with_static_registrations();
/// let definitions = ResourceDefinitions::new()
///     .with(
///         "greeting",
///         ResourceConfiguration::new("text", "Inline", "hello", "Text"),
///     )
///     .unwrap();
///
/// let resolution = resolve(&registries, &definitions, "greeting", "greeting");
/// let located = Pipeline::new(&registries, "greeting").locate(resolution).unwrap();
/// assert_eq!(located.stage(), Stage::Located);
///
/// let streamed = located.stream().unwrap();
/// assert_eq!(streamed.stage(), Stage::Streamed);
///
/// // No "Text" loader is registered.
/// let error = streamed.load().unwrap_err();
/// assert_eq!(error.stage(), Stage::Loaded);
/// ```
#[derive(Debug)]
pub struct Pipeline<'r, S: PipelineState> {
    registries: &'r Registries,
    resource: String,
    state: S,
}

impl<'r, S: PipelineState> Pipeline<'r, S> {
    /// Returns the resource being constructed.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the stage reached so far.
    #[must_use]
    pub fn stage(&self) -> Stage {
        S::STAGE
    }

    fn at(registries: &'r Registries, resource: String, state: S) -> Self {
        tracing::debug!(resource = %resource, stage = %S::STAGE, "pipeline advanced");
        Self {
            registries,
            resource,
            state,
        }
    }
}

impl<'r> Pipeline<'r, Unresolved> {
    /// Starts a construction run for `resource`.
    #[must_use]
    pub fn new(registries: &'r Registries, resource: impl Into<String>) -> Self {
        Self {
            registries,
            resource: resource.into(),
            state: Unresolved,
        }
    }

    /// Decides locator, loader and options from a [`Resolution`].
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NoConfiguration`] for
    /// [`Resolution::Unresolved`].
    pub fn locate(
        self,
        resolution: Resolution<'_>,
    ) -> Result<Pipeline<'r, Located>, ConstructionError> {
        let plan = match resolution {
            Resolution::Explicit(configuration) => {
                tracing::debug!(
                    resource = %self.resource,
                    kind = %configuration.kind,
                    "using explicit configuration"
                );
                Plan {
                    locator_key: configuration.locator_key.clone(),
                    locator_identifier: configuration.locator_identifier.clone(),
                    locator_settings: configuration.locator_settings.clone(),
                    loader_key: configuration.loader_key.clone(),
                    options: OptionsSource::Configured {
                        key: configuration.options_key.clone(),
                        settings: configuration.options.clone(),
                    },
                }
            }
            Resolution::Fallback { kind, defaults } => {
                tracing::warn!(
                    resource = %self.resource,
                    kind = %kind,
                    locator = %defaults.locator_key,
                    loader = %defaults.loader_key,
                    "resource not configured, using fallback"
                );
                Plan {
                    locator_key: defaults.locator_key,
                    locator_identifier: defaults.locator_identifier,
                    locator_settings: defaults.locator_settings,
                    loader_key: defaults.loader_key,
                    options: OptionsSource::Provided(defaults.options),
                }
            }
            Resolution::Unresolved { kind, reason } => {
                return Err(ConstructionError::NoConfiguration {
                    resource: self.resource,
                    kind,
                    reason,
                });
            }
        };

        Ok(Pipeline::at(self.registries, self.resource, Located { plan }))
    }
}

impl<'r> Pipeline<'r, Located> {
    /// Returns the locator key that will be used.
    #[must_use]
    pub fn locator_key(&self) -> &str {
        &self.state.plan.locator_key
    }

    /// Returns the identifier handed to the locator.
    #[must_use]
    pub fn locator_identifier(&self) -> &str {
        &self.state.plan.locator_identifier
    }

    /// Returns the loader key that will be used.
    #[must_use]
    pub fn loader_key(&self) -> &str {
        &self.state.plan.loader_key
    }

    /// Creates and configures the locator and opens the stream.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::UnknownKey`] if the locator key is not registered
    /// - [`ConstructionError::LocatorFailure`] if configuring or locating fails
    pub fn stream(self) -> Result<Pipeline<'r, Streamed>, ConstructionError> {
        let Pipeline {
            registries,
            resource,
            state: Located { plan },
        } = self;

        let mut locator = registries
            .locators()
            .create(&plan.locator_key)
            .map_err(|source| ConstructionError::UnknownKey {
                resource: resource.clone(),
                stage: Stage::Streamed,
                source,
            })?;

        let locator_failure = |source| ConstructionError::LocatorFailure {
            resource: resource.clone(),
            locator_key: plan.locator_key.clone(),
            identifier: plan.locator_identifier.clone(),
            source,
        };

        locator
            .configure(&plan.locator_settings)
            .map_err(locator_failure)?;
        let stream = locator
            .locate(&plan.locator_identifier)
            .map_err(locator_failure)?;

        Ok(Pipeline::at(registries, resource, Streamed { plan, stream }))
    }
}

impl Pipeline<'_, Streamed> {
    /// Returns the identifier the stream was located from.
    #[must_use]
    pub fn stream_identifier(&self) -> &str {
        self.state.stream.identifier()
    }

    /// Creates the loader, builds the options and loads the resource.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::UnknownKey`] if the loader or options key is not
    ///   registered
    /// - [`ConstructionError::InvalidOptions`] if the settings do not apply
    /// - [`ConstructionError::LoaderFailure`] if the loader rejects the stream
    pub fn load(self) -> Result<Box<dyn Resource>, ConstructionError> {
        let Streamed { plan, stream } = self.state;
        let resource = self.resource;

        let loader = self
            .registries
            .loaders()
            .create(&plan.loader_key)
            .map_err(|source| ConstructionError::UnknownKey {
                resource: resource.clone(),
                stage: Stage::Loaded,
                source,
            })?;

        let mut options = match plan.options {
            OptionsSource::Configured { key, settings } => {
                let mut options = match key {
                    Some(key) => self.registries.options().create(&key).map_err(|source| {
                        ConstructionError::UnknownKey {
                            resource: resource.clone(),
                            stage: Stage::Loaded,
                            source,
                        }
                    })?,
                    None => loader.default_options(),
                };

                let name = settings.get(NAME_SETTING).unwrap_or(resource.as_str()).to_string();
                options.set_name(name);
                options
                    .apply(&settings.without(NAME_SETTING))
                    .map_err(|source| ConstructionError::InvalidOptions {
                        resource: resource.clone(),
                        loader_key: plan.loader_key.clone(),
                        source,
                    })?;
                options
            }
            OptionsSource::Provided(mut options) => {
                if options.name() == DEFAULT_OPTIONS_NAME {
                    options.set_name(resource.clone());
                }
                options
            }
        };

        let loaded = loader
            .load(&resource, stream, &mut *options)
            .map_err(|source| ConstructionError::LoaderFailure {
                resource: resource.clone(),
                loader_key: plan.loader_key.clone(),
                source,
            })?;

        tracing::debug!(
            resource = %resource,
            loader = %plan.loader_key,
            options = options.name(),
            resource_type = loaded.type_name(),
            "resource loaded"
        );
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LoaderError, LocatorError};
    use crate::fallback::FallbackConfiguration;
    use crate::loader::ResourceLoader;
    use crate::options::BasicResourceOptions;
    use keel_registry::{Creator, FnCreator};

    #[derive(Debug, PartialEq)]
    struct Echo {
        text: String,
        options_name: String,
        settings: Settings,
    }

    impl Resource for Echo {}

    struct EchoLoader;

    impl ResourceLoader for EchoLoader {
        fn load(
            &self,
            _resource_name: &str,
            stream: ResourceStream,
            options: &mut dyn ResourceOptions,
        ) -> Result<Box<dyn Resource>, LoaderError> {
            let settings = options
                .downcast_ref::<BasicResourceOptions>()
                .map(|o| o.settings().clone())
                .unwrap_or_default();
            Ok(Box::new(Echo {
                text: stream.into_string()?,
                options_name: options.name().to_string(),
                settings,
            }))
        }
    }

    fn echo_loader() -> Box<dyn ResourceLoader> {
        Box::new(EchoLoader)
    }

    struct TextFallback;

    impl FallbackConfiguration for TextFallback {
        fn provide_default(&self, resource_name: &str) -> Option<FallbackDefaults> {
            (resource_name != "declined").then(|| {
                FallbackDefaults::new(
                    "Inline",
                    format!("default {resource_name}"),
                    "Echo",
                    Box::new(BasicResourceOptions::new()),
                )
            })
        }

        fn explain(&self, resource_name: &str) -> String {
            format!("'{resource_name}' has no default text")
        }
    }

    struct TextFallbackCreator;

    impl Creator<dyn FallbackConfiguration> for TextFallbackCreator {
        fn key(&self) -> &str {
            "text"
        }

        fn create(&self) -> Box<dyn FallbackConfiguration> {
            Box::new(TextFallback)
        }
    }

    fn registries() -> Registries {
        let registries = Registries::with_static_registrations();
        registries
            .loaders()
            .register(FnCreator::new("Echo", echo_loader))
            .unwrap();
        registries.fallbacks().register(TextFallbackCreator).unwrap();
        registries
    }

    fn run(
        registries: &Registries,
        definitions: &ResourceDefinitions,
        resource: &str,
        kind: &str,
    ) -> Result<Box<dyn Resource>, ConstructionError> {
        let resolution = resolve(registries, definitions, resource, kind);
        Pipeline::new(registries, resource)
            .locate(resolution)?
            .stream()?
            .load()
    }

    fn inline(text: &str) -> ResourceConfiguration {
        ResourceConfiguration::new("text", "Inline", text, "Echo")
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Loaded.to_string(), "Loaded");
        assert_eq!(Stage::Unresolved.to_string(), "Unresolved");
        assert!(Stage::Located < Stage::Streamed);
    }

    #[test]
    fn explicit_record_wins_over_fallback() {
        let registries = registries();
        let definitions = ResourceDefinitions::new()
            .with("greeting", inline("explicit"))
            .unwrap();

        let resolution = resolve(&registries, &definitions, "greeting", "text");
        assert!(resolution.is_explicit());

        let echo = run(&registries, &definitions, "greeting", "text")
            .unwrap()
            .downcast::<Echo>()
            .unwrap();
        assert_eq!(echo.text, "explicit");
    }

    #[test]
    fn fallback_used_when_unconfigured() {
        let registries = registries();
        let definitions = ResourceDefinitions::new();

        assert!(resolve(&registries, &definitions, "motd", "text").is_fallback());

        let echo = run(&registries, &definitions, "motd", "text")
            .unwrap()
            .downcast::<Echo>()
            .unwrap();
        assert_eq!(echo.text, "default motd");
        assert_eq!(echo.options_name, "motd");
    }

    #[test]
    fn declined_fallback_reports_explanation() {
        let registries = registries();
        let error = run(&registries, &ResourceDefinitions::new(), "declined", "text").unwrap_err();

        assert_eq!(error.stage(), Stage::Located);
        assert!(error.to_string().contains("'declined' has no default text"));
    }

    #[test]
    fn missing_fallback_is_no_configuration() {
        let registries = registries();
        let error = run(&registries, &ResourceDefinitions::new(), "x", "unknown").unwrap_err();

        assert!(matches!(
            error,
            ConstructionError::NoConfiguration { ref kind, .. } if kind == "unknown"
        ));
    }

    #[test]
    fn options_named_after_resource_and_settings_applied() {
        let registries = registries();
        let definitions = ResourceDefinitions::new()
            .with("greeting", inline("hi").with_option("tone", "warm"))
            .unwrap();

        let echo = run(&registries, &definitions, "greeting", "text")
            .unwrap()
            .downcast::<Echo>()
            .unwrap();

        assert_eq!(echo.options_name, "greeting");
        assert_eq!(echo.settings.get("tone"), Some("warm"));
        assert!(!echo.settings.contains(NAME_SETTING));
    }

    #[test]
    fn name_setting_names_the_options() {
        let registries = registries();
        let definitions = ResourceDefinitions::new()
            .with(
                "greeting",
                inline("hi")
                    .with_options_key(BasicResourceOptions::KEY)
                    .with_option("name", "friendly"),
            )
            .unwrap();

        let echo = run(&registries, &definitions, "greeting", "text")
            .unwrap()
            .downcast::<Echo>()
            .unwrap();
        assert_eq!(echo.options_name, "friendly");
    }

    #[test]
    fn unknown_locator_fails_before_streamed() {
        let registries = registries();
        let definitions = ResourceDefinitions::new()
            .with("greeting", ResourceConfiguration::new("text", "Ftp", "x", "Echo"))
            .unwrap();

        let error = run(&registries, &definitions, "greeting", "text").unwrap_err();
        assert_eq!(error.stage(), Stage::Streamed);
        assert_eq!(error.key(), Some("Ftp"));
    }

    #[test]
    fn unknown_options_key_fails_before_loaded() {
        let registries = registries();
        let definitions = ResourceDefinitions::new()
            .with("greeting", inline("hi").with_options_key("Fancy"))
            .unwrap();

        let error = run(&registries, &definitions, "greeting", "text").unwrap_err();
        assert_eq!(error.stage(), Stage::Loaded);
        assert_eq!(error.key(), Some("Fancy"));
    }

    #[test]
    fn locator_settings_rejected_by_locator() {
        let registries = registries();
        let definitions = ResourceDefinitions::new()
            .with("greeting", inline("hi").with_locator_setting("base_path", "/"))
            .unwrap();

        let error = run(&registries, &definitions, "greeting", "text").unwrap_err();
        assert!(matches!(
            error,
            ConstructionError::LocatorFailure {
                source: LocatorError::InvalidSetting { .. },
                ..
            }
        ));
    }

    #[test]
    fn located_exposes_plan() {
        let registries = registries();
        let definitions = ResourceDefinitions::new()
            .with("greeting", inline("hi"))
            .unwrap();
        let resolution = resolve(&registries, &definitions, "greeting", "text");

        let located = Pipeline::new(&registries, "greeting")
            .locate(resolution)
            .unwrap();

        assert_eq!(located.resource(), "greeting");
        assert_eq!(located.locator_key(), "Inline");
        assert_eq!(located.locator_identifier(), "hi");
        assert_eq!(located.loader_key(), "Echo");

        let streamed = located.stream().unwrap();
        assert_eq!(streamed.stream_identifier(), "<inline>");
    }
}
