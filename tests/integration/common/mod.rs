#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;

pub fn write_unit(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).expect("failed to write unit file");
    path
}

pub fn translate_cmd(unit: &Path, out: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("unitscript"));
    cmd.arg("--unit").arg(unit).arg("--out").arg(out);
    cmd
}

pub fn translate(unit: &Path, out: &Path) -> String {
    translate_cmd(unit, out).assert().success();
    fs::read_to_string(out).expect("failed to read generated script")
}

/// Lines of `script` after the last occurrence of `marker`.
pub fn lines_after<'a>(script: &'a str, marker: &str) -> Vec<&'a str> {
    let start = script
        .rfind(marker)
        .unwrap_or_else(|| panic!("marker {marker:?} not found in script"));
    script[start + marker.len()..].lines().collect()
}
