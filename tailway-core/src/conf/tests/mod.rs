
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A config directory with `tailway.hcl` and an empty `logs/` directory.
pub fn config_dir(hcl: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("logs")).unwrap();
    write_config(dir.path(), hcl);
    dir
}

pub fn write_config(root: &Path, hcl: &str) {
    fs::write(root.join(crate::conf::ENTRYPOINT_FILE), hcl).unwrap();
}

pub fn minimal_hcl(tail: &str) -> String {
    format!(
        r#"
server = {{
  version = 1
}}

listener = {{
  addr = "127.0.0.1:8080"
}}

{tail}
"#
    )
}
