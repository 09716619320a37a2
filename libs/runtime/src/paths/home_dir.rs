use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomeDirError {
    #[error("environment variable {0} is not set; cannot resolve home directory")]
    MissingEnv(&'static str),

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to create home directory '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(target_os = "windows")]
const HOME_ENV: &str = "APPDATA";
#[cfg(not(target_os = "windows"))]
const HOME_ENV: &str = "HOME";

fn platform_home() -> Result<PathBuf, HomeDirError> {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or(HomeDirError::MissingEnv(HOME_ENV))
}

/// Expand a leading `~` (alone or followed by a separator) to the platform home.
fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return platform_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_home()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the application home directory to an absolute path.
///
/// - `configured = None` → `<platform home>/<default_subdir>`
/// - `configured = Some("~/x")` → `<platform home>/x`
/// - relative paths are resolved against the current directory
///
/// When `create` is set the directory (and parents) is created.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match configured {
        Some(raw) => expand_tilde(raw.trim())?,
        None => platform_home()?.join(default_subdir),
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(HomeDirError::CurrentDir)?
            .join(path)
    };

    if create {
        ensure_dir(&path)?;
    }
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<(), HomeDirError> {
    std::fs::create_dir_all(path).map_err(|source| HomeDirError::Create {
        path: path.to_path_buf(),
        source,
    })
}
