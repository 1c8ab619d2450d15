use crate::error::CombineError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `bytes` to `dest` through a temp file in the same directory, then
/// rename it into place. A failed run leaves any previous `dest` untouched.
pub fn publish_bytes(dest: &Path, bytes: &[u8]) -> Result<(), CombineError> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = output_permissions(dest);

    let mut staged = tempfile::Builder::new()
        .prefix(".combine-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|source| write_error(dest, source))?;
    staged
        .write_all(bytes)
        .map_err(|source| write_error(dest, source))?;
    staged
        .as_file()
        .sync_all()
        .map_err(|source| write_error(dest, source))?;
    if let Some(permissions) = permissions {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|source| write_error(dest, source))?;
    }
    staged
        .persist(dest)
        .map_err(|err| write_error(dest, err.error))?;

    tracing::debug!(path = %dest.display(), bytes = bytes.len(), "published output");
    Ok(())
}

fn write_error(dest: &Path, source: std::io::Error) -> CombineError {
    CombineError::Write {
        path: dest.to_path_buf(),
        source,
    }
}

// Temp files are created owner-only; keep an overwritten file's mode, or
// fall back to the usual mode for a fresh file.
fn output_permissions(dest: &Path) -> Option<fs::Permissions> {
    match fs::metadata(dest) {
        Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
