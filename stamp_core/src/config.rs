use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::StampError;
use crate::StampResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["stamp.toml", ".stamp.toml", ".config/stamp.toml"];

/// Location of the base script relative to the library root when `base_js`
/// is not configured.
pub const DEFAULT_BASE_JS: &str = "closure/goog/base.js";

/// Location of the dependencies script relative to the library root when
/// `deps_js` is not configured.
pub const DEFAULT_DEPS_JS: &str = "closure/goog/deps.js";

/// Location of the test-runner stylesheet relative to the library root when
/// `multitestrunner_css` is not configured.
pub const DEFAULT_MULTITESTRUNNER_CSS: &str = "closure/goog/css/multitestrunner.css";

/// Configuration loaded from a `stamp.toml` file.
///
/// ```toml
/// main_namespace = "app.Main"
///
/// [paths]
/// development_dir = "devel"
/// library_root = "closure-library"
/// compiler_root = "closure-compiler"
/// # base_js = "closure-library/closure/goog/base.js"
/// # deps_js = "closure-library/closure/goog/deps.js"
/// # multitestrunner_css = "closure-library/closure/goog/css/multitestrunner.css"
/// ```
///
/// Every path is relative to the project root unless it is already absolute.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StampConfig {
	/// The namespace of the application entry point, e.g. `app.Main`.
	#[serde(default)]
	pub main_namespace: Option<String>,
	/// Filesystem locations used by the updaters and the directory walk.
	#[serde(default)]
	pub paths: PathsConfig,
}

/// The `[paths]` section of `stamp.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
	/// Directory tree scanned for target files. Defaults to the project root.
	#[serde(default)]
	pub development_dir: Option<PathBuf>,
	/// Root of the script library. Never walked into.
	#[serde(default)]
	pub library_root: Option<PathBuf>,
	/// Root of the compiler distribution. Never walked into.
	#[serde(default)]
	pub compiler_root: Option<PathBuf>,
	/// The base script referenced by `<!--@base_js@-->`.
	#[serde(default)]
	pub base_js: Option<PathBuf>,
	/// The dependencies script referenced by `<!--@deps_js@-->`.
	#[serde(default)]
	pub deps_js: Option<PathBuf>,
	/// The stylesheet referenced by `<!--@multitestrunner_css@-->`.
	#[serde(default)]
	pub multitestrunner_css: Option<PathBuf>,
}

impl StampConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> StampResult<Option<StampConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		Self::parse(&content).map(Some)
	}

	/// Parse config file content.
	pub fn parse(content: &str) -> StampResult<StampConfig> {
		toml::from_str(content).map_err(|e| StampError::ConfigParse(e.to_string()))
	}

	/// Turn the raw config into absolute, normalized paths anchored at `root`.
	pub fn resolve(&self, root: &Path) -> StampResult<ResolvedConfig> {
		let root = normalize_path(&std::path::absolute(root)?);
		let anchor = |path: &Path| normalize_path(&root.join(path));

		let main_namespace = self
			.main_namespace
			.as_deref()
			.map(str::trim)
			.filter(|namespace| !namespace.is_empty())
			.ok_or_else(|| StampError::MissingConfigValue("main_namespace".to_string()))?
			.to_string();
		let library_root = self
			.paths
			.library_root
			.as_deref()
			.map(anchor)
			.ok_or_else(|| StampError::MissingConfigValue("paths.library_root".to_string()))?;
		let compiler_root = self
			.paths
			.compiler_root
			.as_deref()
			.map(anchor)
			.ok_or_else(|| StampError::MissingConfigValue("paths.compiler_root".to_string()))?;
		let development_dir = self
			.paths
			.development_dir
			.as_deref()
			.map_or_else(|| root.clone(), anchor);

		let base_js = self
			.paths
			.base_js
			.as_deref()
			.map_or_else(|| library_root.join(DEFAULT_BASE_JS), anchor);
		let deps_js = self
			.paths
			.deps_js
			.as_deref()
			.map_or_else(|| library_root.join(DEFAULT_DEPS_JS), anchor);
		let multitestrunner_css = self
			.paths
			.multitestrunner_css
			.as_deref()
			.map_or_else(|| library_root.join(DEFAULT_MULTITESTRUNNER_CSS), anchor);

		Ok(ResolvedConfig {
			main_namespace,
			development_dir,
			library_root,
			compiler_root,
			base_js,
			deps_js,
			multitestrunner_css,
		})
	}
}

/// An immutable configuration snapshot with every path absolute.
///
/// This is what the rewriter is constructed with. Nothing reads global state
/// after this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
	main_namespace: String,
	development_dir: PathBuf,
	library_root: PathBuf,
	compiler_root: PathBuf,
	base_js: PathBuf,
	deps_js: PathBuf,
	multitestrunner_css: PathBuf,
}

impl ResolvedConfig {
	/// Discover, parse and resolve the config for the project at `root`.
	pub fn load(root: &Path) -> StampResult<ResolvedConfig> {
		let Some(config) = StampConfig::load(root)? else {
			return Err(StampError::MissingConfig {
				root: root.display().to_string(),
			});
		};

		config.resolve(root)
	}

	pub fn main_namespace(&self) -> &str {
		&self.main_namespace
	}

	pub fn development_dir(&self) -> &Path {
		&self.development_dir
	}

	pub fn library_root(&self) -> &Path {
		&self.library_root
	}

	pub fn compiler_root(&self) -> &Path {
		&self.compiler_root
	}

	pub fn base_js(&self) -> &Path {
		&self.base_js
	}

	pub fn deps_js(&self) -> &Path {
		&self.deps_js
	}

	pub fn multitestrunner_css(&self) -> &Path {
		&self.multitestrunner_css
	}

	/// Directories the walk must never enter.
	pub fn ignore_dirs(&self) -> [&Path; 2] {
		[self.library_root.as_path(), self.compiler_root.as_path()]
	}
}

/// Lexically remove `.` and `..` components without touching the
/// filesystem. A `..` at the root of an absolute path is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				let last = normalized.components().next_back();

				match last {
					Some(Component::Normal(_)) => {
						normalized.pop();
					}
					Some(Component::RootDir | Component::Prefix(_)) => {}
					_ => normalized.push(".."),
				}
			}
			other => normalized.push(other.as_os_str()),
		}
	}

	normalized
}
