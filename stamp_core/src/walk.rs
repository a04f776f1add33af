use std::path::Path;
use std::path::PathBuf;

use crate::StampError;
use crate::StampResult;

/// File extensions, without the leading dot, that are rewritten.
/// Matching is case-sensitive.
pub const TARGET_EXTENSIONS: [&str; 4] = ["html", "xhtml", "js", "css"];

/// Check if a file is a rewrite target based on its extension.
pub fn is_target_file(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| TARGET_EXTENSIONS.contains(&ext))
}

/// Collect every target file below `root`, never entering a directory whose
/// full path equals one of `ignore_dirs`.
///
/// Files in a directory come before the contents of its subdirectories, and
/// entries are sorted by name at each level. Symlinked directories are not
/// followed; symlinked files are included.
pub fn collect_target_files(root: &Path, ignore_dirs: &[&Path]) -> StampResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	walk_dir(root, ignore_dirs, &mut files)?;
	Ok(files)
}

fn walk_dir(dir: &Path, ignore_dirs: &[&Path], files: &mut Vec<PathBuf>) -> StampResult<()> {
	let entries = std::fs::read_dir(dir).map_err(|e| StampError::file_access(dir, &e))?;
	let mut subdirs = Vec::new();
	let mut dir_files = Vec::new();

	for entry in entries {
		let entry = entry.map_err(|e| StampError::file_access(dir, &e))?;
		let path = entry.path();
		let file_type = entry
			.file_type()
			.map_err(|e| StampError::file_access(&path, &e))?;

		if file_type.is_dir() {
			subdirs.push(path);
		} else if (file_type.is_file() || (file_type.is_symlink() && path.is_file()))
			&& is_target_file(&path)
		{
			dir_files.push(path);
		}
	}

	dir_files.sort();
	subdirs.sort();
	files.append(&mut dir_files);

	for subdir in subdirs {
		if ignore_dirs.iter().any(|ignored| *ignored == subdir.as_path()) {
			tracing::debug!(path = %subdir.display(), "skipping ignored directory");
			continue;
		}

		walk_dir(&subdir, ignore_dirs, files)?;
	}

	Ok(())
}
