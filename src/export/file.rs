//! Local download of the drawing.

use super::types::ExportError;
use crate::config::ExportConfig;
use crate::draw::{ImageFormat, RasterSurface};
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Where and under which name the save control writes the drawing.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Directory the drawing is written to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            save_directory: PathBuf::from("."),
            filename_template: "drawing".to_string(),
            format: "png".to_string(),
        }
    }
}

impl From<&ExportConfig> for DownloadConfig {
    fn from(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.save_directory),
            filename_template: config.filename_template.clone(),
            format: config.format.extension().to_string(),
        }
    }
}

/// True when chrono understands every `%` specifier in `template`.
pub fn is_valid_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Generate a filename based on the template and current time.
///
/// A template without format specifiers yields a fixed name, so the default
/// `drawing` template always writes `drawing.png`. Unknown specifiers such as
/// `%Q` or a trailing `%` are reported as [`ExportError::InvalidTemplate`].
pub fn generate_filename(template: &str, format: &str) -> Result<String, ExportError> {
    let now = Local::now();
    let mut filename = String::new();
    write!(filename, "{}", now.format(template))
        .map_err(|_| ExportError::InvalidTemplate(template.to_string()))?;
    Ok(format!("{}.{}", filename, format))
}

/// Ensure the save directory exists, creating it if necessary.
///
/// Returns the canonicalized path to the directory.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating drawing directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Write encoded image bytes under the configured directory and name.
///
/// An existing file with the same name is overwritten.
pub fn save_drawing(image_data: &[u8], config: &DownloadConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&config.save_directory)?;

    let filename = generate_filename(&config.filename_template, &config.format)?;
    let file_path = directory.join(&filename);

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, image_data)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// PNG-encodes the surface and saves it. The surface is left untouched.
pub fn to_download(
    surface: &RasterSurface,
    config: &DownloadConfig,
) -> Result<PathBuf, ExportError> {
    let png = surface.export_image(ImageFormat::Png)?;
    save_drawing(&png, config)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
