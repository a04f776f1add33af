#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub const CONFIG: &str = r#"main_namespace = "app.Main"

[paths]
library_root = "lib"
compiler_root = "compiler"
base_js = "lib/base.js"
deps_js = "lib/deps.js"
multitestrunner_css = "lib/css/multitestrunner.css"
"#;

pub fn stamp_cmd() -> Command {
	let mut cmd = Command::cargo_bin("stamp").unwrap_or_else(|e| panic!("binary should build: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

pub fn write(path: &Path, content: &str) -> std::io::Result<()> {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}
