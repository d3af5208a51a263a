use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

struct Workspace {
	dir: TempDir,
}

impl Workspace {
	fn new() -> Self {
		Self {
			dir: tempdir().unwrap(),
		}
	}

	fn path(&self, name: &str) -> PathBuf {
		self.dir.path().join(name)
	}

	fn write(&self, name: &str, content: &str) -> PathBuf {
		let path = self.path(name);
		fs::write(&path, content).unwrap();
		path
	}

	fn script(&self, name: &str, body: &str) -> PathBuf {
		let path = self.write(name, &format!("#!/bin/sh\n{body}\n"));
		fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
		path
	}

	fn config(&self, json: &str) -> PathBuf {
		self.write("config.json", json)
	}

	fn cache_dir(&self) -> PathBuf {
		self.path("cache")
	}

	fn tview(&self, config: &Path) -> Command {
		let mut cmd = Command::cargo_bin("tview").unwrap();
		cmd.env_remove("TVIEW_LOG")
			.env_remove("TVIEW_CONFIG")
			.env("TVIEW_CONFIG_DIR", self.path("config-home"))
			.arg("--config")
			.arg(config)
			.arg("--cache-dir")
			.arg(self.cache_dir())
			.args(["--width", "80", "--height", "24"]);
		cmd
	}
}

#[test]
fn skips_missing_programs_and_renders_with_the_next() {
	let ws = Workspace::new();
	let config = ws.config(r#"{"text/plain": ["tview-missing-renderer {}", "cat"]}"#);
	let file = ws.write("notes.txt", "hello world\n");

	ws.tview(&config)
		.arg(&file)
		.assert()
		.success()
		.stdout("hello world\n")
		.stderr(predicate::str::contains(
			"tview-missing-renderer: cannot locate program",
		));
}

#[test]
fn second_preview_comes_from_the_cache() {
	let ws = Workspace::new();
	let counter = ws.path("runs");
	let renderer = ws.script(
		"count-and-cat",
		&format!("echo run >> '{}'\ncat", counter.display()),
	);
	let config = ws.config(&format!(r#"{{"text/plain": ["{}"]}}"#, renderer.display()));
	let file = ws.write("notes.txt", "cached words\n");

	for _ in 0..2 {
		ws.tview(&config)
			.arg(&file)
			.assert()
			.success()
			.stdout("cached words\n");
	}

	assert_eq!(fs::read_to_string(&counter).unwrap(), "run\n");
	assert_eq!(fs::read_dir(ws.cache_dir()).unwrap().count(), 1);
}

#[test]
fn no_cache_renders_every_time() {
	let ws = Workspace::new();
	let counter = ws.path("runs");
	let renderer = ws.script(
		"count-and-cat",
		&format!("echo run >> '{}'\ncat", counter.display()),
	);
	let config = ws.config(&format!(r#"{{"text/plain": ["{}"]}}"#, renderer.display()));
	let file = ws.write("notes.txt", "fresh words\n");

	for _ in 0..2 {
		ws.tview(&config)
			.arg("--no-cache")
			.arg(&file)
			.assert()
			.success()
			.stdout("fresh words\n");
	}

	assert_eq!(fs::read_to_string(&counter).unwrap(), "run\nrun\n");
	assert!(!ws.cache_dir().exists());
}

#[test]
fn reads_the_target_from_stdin() {
	let ws = Workspace::new();
	let config = ws.config(r#"{"text/plain": ["cat"]}"#);

	ws.tview(&config)
		.write_stdin("piped text\n")
		.assert()
		.success()
		.stdout("piped text\n");
}

#[test]
fn exhausted_chain_exits_with_failure() {
	let ws = Workspace::new();
	let config = ws.config(
		r#"{"text/plain": ["tview-missing-renderer"], "application/octet-stream": ["tview-missing-renderer"]}"#,
	);
	let file = ws.write("notes.txt", "nobody can show this\n");

	ws.tview(&config)
		.arg(&file)
		.assert()
		.code(1)
		.stdout("")
		.stderr(predicate::str::contains("text/plain: no usable renderer"));
}

#[test]
fn malformed_config_falls_back_to_defaults() {
	let ws = Workspace::new();
	let config = ws.config("{ definitely not json");
	let file = ws.write("notes.txt", "default renderers\n");

	ws.tview(&config)
		.arg(&file)
		.assert()
		.success()
		.stdout(predicate::str::contains("default renderers"))
		.stderr(predicate::str::contains("ignoring renderer overrides"));
}

#[test]
fn unreadable_target_exits_with_failure() {
	let ws = Workspace::new();
	let config = ws.config("{}");

	ws.tview(&config)
		.arg(ws.path("missing.txt"))
		.assert()
		.code(1)
		.stderr(predicate::str::contains("cannot read"));
}

#[test]
fn print_config_reports_the_effective_settings() {
	let ws = Workspace::new();
	let config = ws.config("{}");

	ws.tview(&config)
		.args(["-x", "5", "--print-config", "notes.txt"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Effective configuration:"))
		.stdout(predicate::str::contains("Geometry: 80x24"))
		.stdout(predicate::str::contains("Offset x: 5"));
}

#[test]
fn without_path_only_absolute_renderers_run() {
	let ws = Workspace::new();
	let renderer = ws.script(
		"builtin-cat",
		r#"while IFS= read -r line; do printf '%s\n' "$line"; done"#,
	);
	let config = ws.config(&format!(
		r#"{{"text/plain": ["cat", "{}"]}}"#,
		renderer.display()
	));
	let file = ws.write("notes.txt", "no search path\n");

	ws.tview(&config)
		.env_remove("PATH")
		.arg(&file)
		.assert()
		.success()
		.stdout("no search path\n")
		.stderr(predicate::str::contains("cat: cannot locate program"));
}
