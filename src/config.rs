use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use epics::DuplicatePolicy;
use serde::Deserialize;
use smart_default::SmartDefault;

const APP_NAME: &str = "epics";

/// Settings merged from defaults, the config file, `EPICS_*` env vars and CLI flags (later wins).
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct AppConfig {
	/// `owner/repo` passed to `gh -R`. When unset, gh picks the repository of the working directory.
	pub repo: Option<String>,
	#[default = "gh"]
	pub gh_path: String,
	/// How many existing issues to ask gh for when collecting titles.
	#[default = 1000]
	pub list_limit: usize,
	pub duplicate_policy: DuplicatePolicy,
}

impl AppConfig {
	/// Load from `path`, or from `$XDG_CONFIG_HOME/epics/config.toml` if it exists.
	/// An explicitly given file must exist; the XDG one is optional.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let mut builder = config::Config::builder();

		match path {
			Some(path) => builder = builder.add_source(config::File::from(path).required(true)),
			None => {
				if let Some(xdg_path) = xdg::BaseDirectories::with_prefix(APP_NAME).find_config_file("config.toml") {
					tracing::debug!(path = %xdg_path.display(), "using config file");
					builder = builder.add_source(config::File::from(xdg_path).required(false));
				}
			}
		}

		let settings = builder
			.add_source(config::Environment::with_prefix("EPICS").try_parsing(true))
			.build()
			.wrap_err("failed to read configuration")?;

		settings
			.try_deserialize()
			.wrap_err("The config is not correctly formatted TOML\nand/or\n has fields of the wrong type")
	}
}
