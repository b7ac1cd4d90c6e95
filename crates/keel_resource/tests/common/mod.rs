//! Shared products for `keel_resource` integration tests.
//!
//! Provides a small loop-definition format:
//!
//! ```text
//! # comment
//! LOOP <start> <stop> [cut] [skip_rate] [extend]
//! ```
//!
//! Import via `mod common;` in test files.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared test products, not all items used in every test binary"
)]

use keel_resource::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// LOOPS RESOURCE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub start: u32,
    pub stop: u32,
    pub cut: u32,
    pub skip_rate: f64,
    pub extended: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loops {
    pub loops: Vec<Loop>,
    pub options_name: String,
}

impl Resource for Loops {}

// ═══════════════════════════════════════════════════════════════════════════════
// LOOPS OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopsFileOptions {
    name: String,
    pub prohibit_single_residue_loops: bool,
}

impl LoopsFileOptions {
    pub const KEY: &'static str = "LoopsFile";
}

impl Default for LoopsFileOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_OPTIONS_NAME.to_string(),
            prohibit_single_residue_loops: true,
        }
    }
}

impl ResourceOptions for LoopsFileOptions {
    fn type_name(&self) -> &'static str {
        Self::KEY
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn apply(&mut self, settings: &Settings) -> Result<(), OptionsError> {
        for key in settings.keys() {
            if key != "prohibit_single_residue_loops" {
                return Err(OptionsError::UnknownSetting {
                    key: key.to_string(),
                    options_type: Self::KEY,
                });
            }
        }
        self.prohibit_single_residue_loops =
            settings.parse_or("prohibit_single_residue_loops", self.prohibit_single_residue_loops)?;
        Ok(())
    }
}

pub struct LoopsFileOptionsCreator;

impl Creator<dyn ResourceOptions> for LoopsFileOptionsCreator {
    fn key(&self) -> &str {
        LoopsFileOptions::KEY
    }

    fn create(&self) -> Box<dyn ResourceOptions> {
        Box::new(LoopsFileOptions::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOOPS LOADER
// ═══════════════════════════════════════════════════════════════════════════════

pub struct LoopsFileLoader;

impl LoopsFileLoader {
    pub const KEY: &'static str = "LoopsFile";
}

fn field<T: std::str::FromStr>(
    tokens: &[&str],
    index: usize,
    line: usize,
    what: &str,
) -> Result<Option<T>, LoaderError> {
    tokens
        .get(index)
        .map(|token| {
            token
                .parse()
                .map_err(|_| LoaderError::malformed(line, format!("invalid {what} '{token}'")))
        })
        .transpose()
}

impl ResourceLoader for LoopsFileLoader {
    fn load(
        &self,
        _resource_name: &str,
        stream: ResourceStream,
        options: &mut dyn ResourceOptions,
    ) -> Result<Box<dyn Resource>, LoaderError> {
        let options = expect_options::<LoopsFileOptions>(options)?;
        let content = stream.into_string()?;

        let mut loops = Vec::new();
        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = text.split_whitespace().collect();
            if tokens[0] != "LOOP" {
                return Err(LoaderError::malformed(line, "expected 'LOOP'"));
            }
            if tokens.len() > 6 {
                return Err(LoaderError::malformed(line, "too many fields"));
            }

            let start = field(&tokens, 1, line, "start")?
                .ok_or_else(|| LoaderError::malformed(line, "missing start"))?;
            let stop = field(&tokens, 2, line, "stop")?
                .ok_or_else(|| LoaderError::malformed(line, "missing stop"))?;
            let cut = field(&tokens, 3, line, "cut")?.unwrap_or(0);
            let skip_rate = field(&tokens, 4, line, "skip rate")?.unwrap_or(0.0);
            let extended = field::<u8>(&tokens, 5, line, "extend flag")?.is_some_and(|v| v != 0);

            if stop < start {
                return Err(LoaderError::validation(format!(
                    "loop {start}-{stop} ends before it starts"
                )));
            }
            if start == stop && options.prohibit_single_residue_loops {
                return Err(LoaderError::validation(format!(
                    "single residue loop at {start} is prohibited"
                )));
            }

            loops.push(Loop {
                start,
                stop,
                cut,
                skip_rate,
                extended,
            });
        }

        Ok(Box::new(Loops {
            loops,
            options_name: options.name().to_string(),
        }))
    }

    fn default_options(&self) -> Box<dyn ResourceOptions> {
        Box::new(LoopsFileOptions::default())
    }
}

pub struct LoopsFileLoaderCreator;

impl Creator<dyn ResourceLoader> for LoopsFileLoaderCreator {
    fn key(&self) -> &str {
        LoopsFileLoader::KEY
    }

    fn create(&self) -> Box<dyn ResourceLoader> {
        Box::new(LoopsFileLoader)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOOPS FALLBACK
// ═══════════════════════════════════════════════════════════════════════════════

/// Serves kind `"loops"` from `<dir>/<resource>.loops`.
pub struct LoopsFallback {
    dir: Option<PathBuf>,
}

impl FallbackConfiguration for LoopsFallback {
    fn provide_default(&self, resource_name: &str) -> Option<FallbackDefaults> {
        let dir = self.dir.as_ref()?;
        Some(
            FallbackDefaults::new(
                FileSystemLocator::KEY,
                format!("{resource_name}.loops"),
                LoopsFileLoader::KEY,
                Box::new(LoopsFileOptions::default()),
            )
            .with_locator_setting("base_path", dir.display().to_string()),
        )
    }

    fn explain(&self, resource_name: &str) -> String {
        format!("no loops directory was given, so '{resource_name}' has no default file")
    }
}

pub struct LoopsFallbackCreator {
    pub dir: Option<PathBuf>,
}

impl Creator<dyn FallbackConfiguration> for LoopsFallbackCreator {
    fn key(&self) -> &str {
        "loops"
    }

    fn create(&self) -> Box<dyn FallbackConfiguration> {
        Box::new(LoopsFallback {
            dir: self.dir.clone(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Registries with the built-ins plus the loops loader and options.
pub fn loops_registries() -> Registries {
    let registries = Registries::with_static_registrations();
    registries.loaders().register(LoopsFileLoaderCreator).unwrap();
    registries.options().register(LoopsFileOptionsCreator).unwrap();
    registries
}

/// Like [`loops_registries`], plus a fallback for kind `"loops"`.
pub fn loops_registries_with_fallback(dir: Option<&Path>) -> Registries {
    let registries = loops_registries();
    registries
        .fallbacks()
        .register(LoopsFallbackCreator {
            dir: dir.map(Path::to_path_buf),
        })
        .unwrap();
    registries
}

pub fn manager(definitions: ResourceDefinitions, registries: Registries) -> ResourceManager {
    ResourceManager::with_registries(definitions, Arc::new(registries))
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

pub const SAMPLE_LOOPS: &str = "\
# two loops
LOOP 10 18 14 0.0 1
LOOP 40 52
";

pub fn sample_loops() -> Vec<Loop> {
    vec![
        Loop {
            start: 10,
            stop: 18,
            cut: 14,
            skip_rate: 0.0,
            extended: true,
        },
        Loop {
            start: 40,
            stop: 52,
            cut: 0,
            skip_rate: 0.0,
            extended: false,
        },
    ]
}

pub fn my_loops_record(path: &Path) -> ResourceConfiguration {
    ResourceConfiguration::new(
        "loops",
        FileSystemLocator::KEY,
        path.display().to_string(),
        LoopsFileLoader::KEY,
    )
}
