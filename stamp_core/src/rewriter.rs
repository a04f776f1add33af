use std::path::Path;
use std::path::PathBuf;

use crate::Marker;
use crate::StampError;
use crate::StampResult;
use crate::config::ResolvedConfig;
use crate::config::normalize_path;
use crate::walk::collect_target_files;

/// The result of rewriting content in memory.
///
/// Content is handled as raw bytes: markers are ASCII, and everything outside
/// a marker line is copied through whatever its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRewrite {
	/// The rewritten content.
	pub content: Vec<u8>,
	/// Number of marker substitutions performed.
	pub replaced: usize,
}

/// The outcome of processing a single target file.
#[derive(Debug, Clone)]
pub struct FileRewrite {
	/// Path of the target file.
	pub path: PathBuf,
	/// Content read from disk.
	pub original: Vec<u8>,
	/// Content after all substitutions.
	pub content: Vec<u8>,
	/// Number of marker substitutions performed.
	pub replaced: usize,
}

impl FileRewrite {
	/// Returns true if the rewritten content differs from the original.
	pub fn is_changed(&self) -> bool {
		self.original != self.content
	}
}

/// Result of rewriting (or previewing) a whole tree.
#[derive(Debug, Default)]
pub struct RewriteReport {
	/// Every target file visited, in walk order.
	pub files: Vec<FileRewrite>,
}

impl RewriteReport {
	/// Files whose content changed.
	pub fn changed_files(&self) -> impl Iterator<Item = &FileRewrite> {
		self.files.iter().filter(|file| file.is_changed())
	}

	/// Total marker substitutions across all files.
	pub fn replaced_count(&self) -> usize {
		self.files.iter().map(|file| file.replaced).sum()
	}
}

/// A marker found in a target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerOccurrence {
	pub file: PathBuf,
	/// 1-indexed line number.
	pub line: usize,
	pub marker: Marker,
}

/// Rewrites marker lines using an injected configuration snapshot.
#[derive(Debug, Clone)]
pub struct Rewriter {
	config: ResolvedConfig,
}

impl Rewriter {
	pub fn new(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ResolvedConfig {
		&self.config
	}

	/// Rewrite a single line for a file located in `dir`.
	///
	/// Every marker is tested in [`Marker::ALL`] order against the line as
	/// left by the previous match. A match replaces the whole line with its
	/// indentation, the generated text, the marker, and a `\n`. Returns the
	/// new line and the number of matches.
	pub fn rewrite_line(&self, line: &[u8], dir: &Path) -> (Vec<u8>, usize) {
		let mut current = line.to_vec();
		let mut replaced = 0;

		for marker in Marker::ALL {
			if !marker.is_in(&current) {
				continue;
			}

			let mut next = leading_whitespace(&current).to_vec();
			next.extend_from_slice(marker.replacement(&self.config, dir).as_bytes());
			next.extend_from_slice(marker.literal().as_bytes());
			next.push(b'\n');
			current = next;
			replaced += 1;
		}

		(current, replaced)
	}

	/// Rewrite every line of `content` for a file located in `dir`. Lines
	/// without a marker keep their original terminators.
	pub fn rewrite_content(&self, content: &[u8], dir: &Path) -> ContentRewrite {
		let mut output = Vec::with_capacity(content.len());
		let mut replaced = 0;

		for line in content.split_inclusive(|&byte| byte == b'\n') {
			let (line, count) = self.rewrite_line(line, dir);
			output.extend_from_slice(&line);
			replaced += count;
		}

		ContentRewrite {
			content: output,
			replaced,
		}
	}

	/// Compute the rewrite of a single file without writing it.
	pub fn preview_file(&self, path: &Path) -> StampResult<FileRewrite> {
		let dir = containing_dir(path)?;
		let original = std::fs::read(path).map_err(|e| StampError::file_access(path, &e))?;
		let ContentRewrite { content, replaced } = self.rewrite_content(&original, &dir);

		Ok(FileRewrite {
			path: path.to_path_buf(),
			original,
			content,
			replaced,
		})
	}

	/// Rewrite a single file in place. The file is left untouched when no
	/// line changed.
	pub fn rewrite_file(&self, path: &Path) -> StampResult<FileRewrite> {
		tracing::debug!(path = %path.display(), "processing file");
		let rewrite = self.preview_file(path)?;

		if rewrite.is_changed() {
			std::fs::write(path, &rewrite.content).map_err(|e| StampError::file_access(path, &e))?;
			tracing::info!(
				path = %path.display(),
				replaced = rewrite.replaced,
				"rewrote file"
			);
		}

		Ok(rewrite)
	}

	/// Rewrite every target file below `root`, skipping `ignore_dirs`.
	///
	/// The first error aborts the walk. Files already rewritten keep their
	/// new content.
	pub fn rewrite_tree(&self, root: &Path, ignore_dirs: &[&Path]) -> StampResult<RewriteReport> {
		let mut report = RewriteReport::default();

		for file in collect_target_files(root, ignore_dirs)? {
			report.files.push(self.rewrite_file(&file)?);
		}

		Ok(report)
	}

	/// Rewrite the configured development directory, skipping the library
	/// and compiler roots.
	pub fn rewrite_all(&self) -> StampResult<RewriteReport> {
		self.rewrite_tree(self.config.development_dir(), &self.config.ignore_dirs())
	}

	/// Same walk and transformation as [`Rewriter::rewrite_all`] without
	/// writing anything.
	pub fn preview_all(&self) -> StampResult<RewriteReport> {
		let files = collect_target_files(self.config.development_dir(), &self.config.ignore_dirs())?
			.iter()
			.map(|file| self.preview_file(file))
			.collect::<StampResult<Vec<_>>>()?;

		Ok(RewriteReport { files })
	}

	/// List every marker in every target file of the development directory.
	pub fn scan_markers(&self) -> StampResult<Vec<MarkerOccurrence>> {
		let mut occurrences = Vec::new();

		for file in collect_target_files(self.config.development_dir(), &self.config.ignore_dirs())? {
			let content = std::fs::read(&file).map_err(|e| StampError::file_access(&file, &e))?;

			for (index, line) in content.split(|&byte| byte == b'\n').enumerate() {
				occurrences.extend(Marker::all_in(line).map(|marker| {
					MarkerOccurrence {
						file: file.clone(),
						line: index + 1,
						marker,
					}
				}));
			}
		}

		Ok(occurrences)
	}
}

/// The run of ASCII whitespace (space, tab, CR, LF, vertical tab, form feed)
/// at the start of `line`.
pub fn leading_whitespace(line: &[u8]) -> &[u8] {
	let end = line
		.iter()
		.position(|byte| !matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b'\x0b' | b'\x0c'))
		.unwrap_or(line.len());

	&line[..end]
}

/// Absolute directory containing `path`, used as the base for relative
/// links.
fn containing_dir(path: &Path) -> StampResult<PathBuf> {
	let absolute =
		normalize_path(&std::path::absolute(path).map_err(|e| StampError::file_access(path, &e))?);
	Ok(absolute
		.parent()
		.map_or_else(|| absolute.clone(), Path::to_path_buf))
}
