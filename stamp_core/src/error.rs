use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum StampError {
	#[error(transparent)]
	#[diagnostic(code(stamp::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to access `{path}`: {reason}")]
	#[diagnostic(
		code(stamp::file_access),
		help("check that the file exists and is readable and writable")
	)]
	FileAccess { path: String, reason: String },

	#[error("no configuration file found in `{root}`")]
	#[diagnostic(
		code(stamp::missing_config),
		help("run `stamp init` to create a stamp.toml, or pass `--path` to the project root")
	)]
	MissingConfig { root: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(stamp::config_parse),
		help("check that stamp.toml is valid TOML with `main_namespace` and a [paths] section")
	)]
	ConfigParse(String),

	#[error("missing configuration value: `{0}`")]
	#[diagnostic(
		code(stamp::missing_config_value),
		help("set `{0}` in stamp.toml")
	)]
	MissingConfigValue(String),
}

impl StampError {
	pub(crate) fn file_access(path: &std::path::Path, error: &std::io::Error) -> Self {
		Self::FileAccess {
			path: path.display().to_string(),
			reason: error.to_string(),
		}
	}
}

pub type StampResult<T> = Result<T, StampError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
