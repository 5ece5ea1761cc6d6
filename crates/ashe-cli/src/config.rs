//! Run configuration: an optional TOML file overlaid with CLI flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ashe_model::{TableSpec, VariableSpec};
use chrono::Datelike;
use serde::Deserialize;

use crate::cli::RunArgs;

/// Used when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG: &str = "ashe.toml";

const DEFAULT_TEMPLATE_DIR: &str = "templates";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Contents of the configuration file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub year: Option<i32>,
    pub paths: PathsConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub csv: Option<PathBuf>,
    pub csv_previous_year: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub tables: Vec<String>,
    pub variables: Vec<String>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Reads `path`. A missing file is an error only when it was named
    /// explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG), false),
        };
        if !explicit && !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Everything a run needs, validated against the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub year: i32,
    pub csv_dir: PathBuf,
    pub previous_csv_dir: Option<PathBuf>,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub tables: Vec<&'static TableSpec>,
    pub variables: Vec<&'static VariableSpec>,
    pub dry_run: bool,
}

impl RunSettings {
    /// Overlays `args` on `file`. Fails before any work starts when a
    /// required path is missing or a table or variable is unknown.
    pub fn resolve(file: FileConfig, args: &RunArgs) -> Result<Self> {
        let year = args
            .year
            .or(file.year)
            .unwrap_or_else(|| chrono::Local::now().year());

        let Some(csv_dir) = args.csv_dir.clone().or(file.paths.csv) else {
            bail!("no extract directory: set paths.csv or pass --csv-dir");
        };
        let previous_csv_dir = args
            .previous_csv_dir
            .clone()
            .or(file.paths.csv_previous_year);
        let template_dir = args
            .template_dir
            .clone()
            .or(file.paths.templates)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        let output_dir = args
            .output_dir
            .clone()
            .or(file.paths.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let table_names = if args.tables.is_empty() {
            file.run.tables
        } else {
            args.tables.clone()
        };
        if table_names.is_empty() {
            bail!("no tables selected: set run.tables or pass --table");
        }
        let tables = table_names
            .iter()
            .map(|name| ashe_model::table(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let variable_names = if args.variables.is_empty() {
            file.run.variables
        } else {
            args.variables.clone()
        };
        let variables = if variable_names.is_empty() {
            ashe_model::variables().iter().collect()
        } else {
            variable_names
                .iter()
                .map(|name| ashe_model::variable(name))
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        Ok(Self {
            year,
            csv_dir,
            previous_csv_dir,
            template_dir,
            output_dir,
            tables,
            variables,
            dry_run: args.dry_run,
        })
    }
}
