//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific log directory for the client
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/pve/logs`
/// - Linux: `~/.local/share/pve/logs` (or `$XDG_DATA_HOME/pve/logs`)
/// - Windows: `%APPDATA%\pve\logs`
/// - Fallback: `/tmp/pve/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "pve")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/pve"))
        .join("logs")
}
