use std::path::PathBuf;

use spotifriend_common::PlatformError;

pub(super) const APP_NAME: &str = "spotifriend";

/// Returns the platform-specific configuration directory.
///
/// - macOS: `~/Library/Application Support/spotifriend`
/// - Linux: `$XDG_CONFIG_HOME/spotifriend` (defaults to `~/.config/spotifriend`)
/// - Windows: `%APPDATA%\spotifriend`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/spotifriend`
/// - Linux: `$XDG_DATA_HOME/spotifriend` (defaults to `~/.local/share/spotifriend`)
/// - Windows: `%APPDATA%\spotifriend`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path of the key-value store shared by the app and the widget.
///
/// Located at `data_dir()/store.json`.
pub fn store_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("store.json"))
}
