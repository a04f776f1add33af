use std::fmt;
use std::path::Component;
use std::path::Path;

use crate::config::ResolvedConfig;

/// A placeholder comment that marks where configuration-derived content is
/// inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
	/// `<!--@base_js@-->`: script tag for the library base script.
	BaseJs,
	/// `<!--@deps_js@-->`: script tag for the dependencies script.
	DepsJs,
	/// `/*@exec_main@*/`: a call to the main namespace.
	ExecMain,
	/// `/*@main_fn@*/`: assigns a function to the main namespace.
	MainFn,
	/// `/*@provide_main@*/`: declares the main namespace module.
	ProvideMain,
	/// `<!--@require_main@-->`: script tag requiring the main namespace.
	RequireMain,
	/// `<!--@multitestrunner_css@-->`: stylesheet link for the test runner.
	MultitestrunnerCss,
}

impl Marker {
	/// Every marker, in the order they are tested against a line.
	pub const ALL: [Marker; 7] = [
		Marker::BaseJs,
		Marker::DepsJs,
		Marker::ExecMain,
		Marker::MainFn,
		Marker::ProvideMain,
		Marker::RequireMain,
		Marker::MultitestrunnerCss,
	];

	/// The exact text searched for in each line.
	pub const fn literal(self) -> &'static str {
		match self {
			Self::BaseJs => "<!--@base_js@-->",
			Self::DepsJs => "<!--@deps_js@-->",
			Self::ExecMain => "/*@exec_main@*/",
			Self::MainFn => "/*@main_fn@*/",
			Self::ProvideMain => "/*@provide_main@*/",
			Self::RequireMain => "<!--@require_main@-->",
			Self::MultitestrunnerCss => "<!--@multitestrunner_css@-->",
		}
	}

	/// Whether the marker literal occurs anywhere in `line`.
	pub fn is_in(self, line: &[u8]) -> bool {
		let literal = self.literal().as_bytes();
		line.windows(literal.len()).any(|window| window == literal)
	}

	/// Every marker contained in `line`, in [`Marker::ALL`] order.
	pub fn all_in(line: &[u8]) -> impl Iterator<Item = Marker> + '_ {
		Self::ALL.into_iter().filter(move |marker| marker.is_in(line))
	}

	/// The text inserted in front of this marker for a file located in `dir`.
	pub fn replacement(self, config: &ResolvedConfig, dir: &Path) -> String {
		let namespace = config.main_namespace();

		match self {
			Self::BaseJs => script_tag(&relative_href(dir, config.base_js())),
			Self::DepsJs => script_tag(&relative_href(dir, config.deps_js())),
			Self::ExecMain => format!("{namespace}();"),
			Self::MainFn => format!("{namespace} = function() {{"),
			Self::ProvideMain => format!("goog.provide('{namespace}');"),
			Self::RequireMain => {
				format!("<script type=\"text/javascript\"> goog.require('{namespace}'); </script>")
			}
			Self::MultitestrunnerCss => {
				format!(
					"<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">",
					relative_href(dir, config.multitestrunner_css())
				)
			}
		}
	}
}

impl fmt::Display for Marker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.literal())
	}
}

fn script_tag(src: &str) -> String {
	format!("<script type=\"text/javascript\" src=\"{src}\"></script>")
}

/// Express `target` relative to `dir` using `/` as the separator on every
/// platform, so the result is usable as an HTML `src` or `href`.
///
/// Falls back to the full target path when no relative path exists, e.g.
/// across Windows drive letters.
pub fn relative_href(dir: &Path, target: &Path) -> String {
	let relative = pathdiff::diff_paths(target, dir).unwrap_or_else(|| target.to_path_buf());
	let parts: Vec<_> = relative
		.components()
		.filter_map(|component| {
			match component {
				Component::Normal(part) => Some(part.to_string_lossy()),
				Component::ParentDir => Some("..".into()),
				Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
			}
		})
		.collect();

	if parts.is_empty() {
		return ".".to_string();
	}

	let joined = parts.join("/");
	if relative.has_root() {
		format!("/{joined}")
	} else {
		joined
	}
}
