use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum HomeDirError {
    #[error("HOME environment variable is not set")]
    HomeMissing,
    #[error("APPDATA environment variable is not set")]
    AppDataMissing,
    #[error("home_dir must be an absolute path (after ~ expansion): {0}")]
    AbsoluteRequired(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Expand a leading `~` to the user home directory.
pub fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw != "~" && !raw.starts_with("~/") && !raw.starts_with("~\\") {
        return Ok(PathBuf::from(raw));
    }
    let home = user_home()?;
    let rest = raw.trim_start_matches('~').trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}

fn user_home() -> Result<PathBuf, HomeDirError> {
    #[cfg(target_os = "windows")]
    let home = env::var("USERPROFILE").or_else(|_| env::var("HOME"));
    #[cfg(not(target_os = "windows"))]
    let home = env::var("HOME");

    home.map(PathBuf::from).map_err(|_| HomeDirError::HomeMissing)
}

fn platform_base() -> Result<PathBuf, HomeDirError> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .map(PathBuf::from)
            .map_err(|_| HomeDirError::AppDataMissing)
    }
    #[cfg(not(target_os = "windows"))]
    {
        user_home()
    }
}

/// Resolve the application home directory.
///
/// - `config_home` given: `~` is expanded and the result must be absolute.
/// - otherwise: `%APPDATA%/<default_subdir>` on Windows, `$HOME/<default_subdir>` elsewhere.
///
/// The directory is created when `create` is true.
pub fn resolve_home_dir(
    config_home: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match config_home {
        Some(raw) => {
            let expanded = expand_tilde(&raw)?;
            if !expanded.is_absolute() {
                return Err(HomeDirError::AbsoluteRequired(raw));
            }
            expanded
        }
        None => platform_base()?.join(default_subdir),
    };

    if create {
        fs::create_dir_all(&path)?;
    }
    Ok(path)
}

/// Join `rel` onto `base` unless it is already absolute.
pub fn resolve_under(base: &Path, rel: &str) -> PathBuf {
    let p = Path::new(rel);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
