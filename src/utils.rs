use log::info;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "gardenbot";

/// Per-user data directory for gardenbot, e.g. `~/.local/share/gardenbot` on Linux.
pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(DATA_DIR_NAME))
}

pub fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating directory: {}", path.display());
            std::fs::create_dir_all(path)
        }
        Err(e) => Err(e),
    }
}
