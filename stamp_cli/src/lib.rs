use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Fill marker comments in web assets with configuration-derived content.",
	long_about = "stamp rewrites marker comments such as `<!--@base_js@-->` and \
	              `/*@exec_main@*/` in the .html, .xhtml, .js and .css files of a development \
	              tree. Script tags, stylesheet links and main namespace references are \
	              generated from `stamp.toml` and inserted in front of each marker.\n\nQuick \
	              start:\n  stamp init   Create a stamp.toml\n  stamp list   Show every marker \
	              in the tree\n  stamp        Rewrite all markers"
)]
pub struct StampCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory containing `stamp.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Rewrite every marker in the development tree. This is the default
	/// when no subcommand is given.
	///
	/// Walks the configured development directory, skipping the library and
	/// compiler roots, and inserts generated content in front of each marker
	/// found in .html, .xhtml, .js and .css files. Files are overwritten in
	/// place.
	Apply {
		/// Report which files would change without writing them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// With `--dry-run`, print a unified diff for each file.
		#[arg(long, default_value_t = false, requires = "dry_run")]
		diff: bool,
	},
	/// List every marker found in the development tree.
	List,
	/// Create a sample `stamp.toml` in the project root.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
}
