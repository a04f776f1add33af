mod common;

use stamp_core::AnyEmptyResult;

#[test]
fn apply_rewrites_markers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(&tmp.path().join("stamp.toml"), common::CONFIG)?;
	common::write(
		&tmp.path().join("app/index.html"),
		"<head>\n  <!--@base_js@-->\n</head>\n",
	)?;

	common::stamp_cmd()
		.arg("apply")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Rewrote 1 marker(s) in 1 file(s)."));

	let content = std::fs::read_to_string(tmp.path().join("app/index.html"))?;
	assert_eq!(
		content,
		"<head>\n  <script type=\"text/javascript\" \
		 src=\"../lib/base.js\"></script><!--@base_js@-->\n</head>\n"
	);

	Ok(())
}

#[test]
fn apply_is_the_default_command() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(&tmp.path().join("stamp.toml"), common::CONFIG)?;
	common::write(&tmp.path().join("main.js"), "/*@exec_main@*/\n")?;

	common::stamp_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let content = std::fs::read_to_string(tmp.path().join("main.js"))?;
	assert_eq!(content, "app.Main();/*@exec_main@*/\n");

	Ok(())
}

#[test]
fn apply_skips_library_and_other_extensions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(&tmp.path().join("stamp.toml"), common::CONFIG)?;
	common::write(&tmp.path().join("lib/base.js"), "/*@exec_main@*/\n")?;
	common::write(&tmp.path().join("compiler/test.html"), "<!--@deps_js@-->\n")?;
	common::write(&tmp.path().join("notes.md"), "/*@exec_main@*/\n")?;

	common::stamp_cmd()
		.arg("apply")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Nothing to rewrite: 0 file(s) already up to date."));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("lib/base.js"))?,
		"/*@exec_main@*/\n"
	);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("compiler/test.html"))?,
		"<!--@deps_js@-->\n"
	);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("notes.md"))?,
		"/*@exec_main@*/\n"
	);

	Ok(())
}

#[test]
fn apply_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(&tmp.path().join("stamp.toml"), common::CONFIG)?;
	common::write(&tmp.path().join("main.js"), "/*@provide_main@*/\n")?;

	common::stamp_cmd()
		.arg("apply")
		.arg("--dry-run")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("would rewrite 1 marker(s) in 1 file(s)"))
		.stdout(predicates::str::contains("main.js"))
		.stdout(predicates::str::contains(
			"+goog.provide('app.Main');/*@provide_main@*/",
		));

	let content = std::fs::read_to_string(tmp.path().join("main.js"))?;
	assert_eq!(content, "/*@provide_main@*/\n");

	Ok(())
}

#[test]
fn apply_diff_requires_dry_run() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::stamp_cmd()
		.arg("apply")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure();

	Ok(())
}

#[test]
fn apply_without_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::stamp_cmd()
		.arg("apply")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no configuration file found"));

	Ok(())
}

#[test]
fn apply_with_incomplete_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		&tmp.path().join("stamp.toml"),
		"[paths]\nlibrary_root = \"lib\"\ncompiler_root = \"compiler\"\n",
	)?;

	common::stamp_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("main_namespace"));

	Ok(())
}

#[test]
fn apply_dry_run_diff_handles_latin1_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(&tmp.path().join("stamp.toml"), common::CONFIG)?;
	let path = tmp.path().join("legacy.js");
	std::fs::write(&path, b"// caf\xe9\n/*@exec_main@*/\n")?;

	common::stamp_cmd()
		.args(["apply", "--dry-run", "--diff", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("+app.Main();/*@exec_main@*/"));

	assert_eq!(std::fs::read(&path)?, b"// caf\xe9\n/*@exec_main@*/\n".to_vec());

	Ok(())
}
