use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use stamp_cli::Commands;
use stamp_cli::StampCli;
use stamp_core::ResolvedConfig;
use stamp_core::Rewriter;
use stamp_core::StampConfig;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = "# stamp configuration\n\n# Namespace of the application entry \
                             point, used by the\n# exec_main, main_fn, provide_main and \
                             require_main markers.\nmain_namespace = \"app.Main\"\n\n[paths]\n# \
                             Directory tree scanned for .html, .xhtml, .js and .css \
                             files.\ndevelopment_dir = \".\"\n# Never walked into, even when \
                             nested in development_dir.\nlibrary_root = \
                             \"closure-library\"\ncompiler_root = \"closure-compiler\"\n\n# \
                             Optional overrides (defaults are derived from library_root).\n# \
                             base_js = \"closure-library/closure/goog/base.js\"\n# deps_js = \
                             \"closure-library/closure/goog/deps.js\"\n# multitestrunner_css = \
                             \"closure-library/closure/goog/css/multitestrunner.css\"\n";

fn main() {
	let args = StampCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		None => run_apply(&args, false, false),
		Some(Commands::Apply { dry_run, diff }) => run_apply(&args, *dry_run, *diff),
		Some(Commands::List) => run_list(&args),
		Some(Commands::Init) => run_init(&args),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<stamp_core::StampError>() {
			Ok(stamp_err) => {
				let report: miette::Report = (*stamp_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &StampCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_rewriter(args: &StampCli) -> Result<Rewriter, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = ResolvedConfig::load(&root)?;

	if args.verbose {
		println!("Development dir: {}", config.development_dir().display());
		println!("Main namespace:  {}", config.main_namespace());
		for ignored in config.ignore_dirs() {
			println!("Ignoring:        {}", ignored.display());
		}
	}

	Ok(Rewriter::new(config))
}

fn run_apply(args: &StampCli, dry_run: bool, diff: bool) -> Result<(), Box<dyn std::error::Error>> {
	let rewriter = load_rewriter(args)?;
	let development_dir = rewriter.config().development_dir();

	let report = if dry_run {
		rewriter.preview_all()?
	} else {
		rewriter.rewrite_all()?
	};

	let changed: Vec<_> = report.changed_files().collect();
	if changed.is_empty() {
		println!(
			"Nothing to rewrite: {} file(s) already up to date.",
			report.files.len()
		);
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would rewrite {} marker(s) in {} file(s):",
			report.replaced_count(),
			changed.len()
		);
		for file in &changed {
			println!("  {}", make_relative(&file.path, development_dir));
			if diff {
				print_diff(
					&String::from_utf8_lossy(&file.original),
					&String::from_utf8_lossy(&file.content),
				);
			}
		}
	} else {
		println!(
			"{} {} marker(s) in {} file(s).",
			colored!("Rewrote", green),
			report.replaced_count(),
			changed.len()
		);

		if args.verbose {
			for file in &changed {
				println!("  {}", make_relative(&file.path, development_dir));
			}
		}
	}

	Ok(())
}

fn run_list(args: &StampCli) -> Result<(), Box<dyn std::error::Error>> {
	let rewriter = load_rewriter(args)?;
	let development_dir = rewriter.config().development_dir();
	let occurrences = rewriter.scan_markers()?;

	if occurrences.is_empty() {
		println!("No markers found.");
		return Ok(());
	}

	println!("{}", colored!("Markers:", bold));
	for occurrence in &occurrences {
		println!(
			"  {}:{} {}",
			make_relative(&occurrence.file, development_dir),
			occurrence.line,
			occurrence.marker
		);
	}

	Ok(())
}

fn run_init(args: &StampCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = StampConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("stamp.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created config file: {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Point library_root and compiler_root at your checkouts");
	println!("  2. Add markers to your pages, e.g. <!--@base_js@-->");
	println!("  3. Run `stamp` to fill them in");

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("    {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("    {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("     {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
