use std::io;
use std::path::{Path, PathBuf};

pub const DATA_FILE: &str = "posts.json";

/// `<root>/build/release/data/posts.json`, where `<root>` is the parent of
/// the directory holding `exe`.
pub fn canonical_path_for(exe: &Path) -> PathBuf {
    let root = exe
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    root.join("build").join("release").join("data").join(DATA_FILE)
}

pub fn canonical_path() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(canonical_path_for(&exe))
}
