mod common;

use stamp_core::AnyEmptyResult;
use stamp_core::StampConfig;

#[test]
fn init_creates_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::stamp_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created config file"));

	let config = StampConfig::load(tmp.path())?.ok_or("config should exist")?;
	let resolved = config.resolve(tmp.path())?;
	assert_eq!(resolved.main_namespace(), "app.Main");
	assert_eq!(
		resolved.library_root(),
		tmp.path().join("closure-library").as_path()
	);

	Ok(())
}

#[test]
fn init_keeps_existing_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(&tmp.path().join(".stamp.toml"), common::CONFIG)?;

	common::stamp_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Config file already exists"));

	assert!(!tmp.path().join("stamp.toml").exists());

	Ok(())
}
