//! Atomic rename helper.
//! - Refuses to replace an existing destination (std rename overwrites on Unix).
//! - On Linux the refusal is atomic (`renameat2` with `RENAME_NOREPLACE`);
//!   filesystems without it fall back to check-then-rename.
//! - Errors keep their io::ErrorKind and gain op/path context.
//! - Best-effort fsync of the parent directory after rename (no-op off Unix).

use std::fs;
use std::io;
use std::path::Path;

use super::helpers::io_error_with_help_io;

/// Rename `src` to `dst` unless something already exists at `dst`.
///
/// Outside Linux, or when the filesystem rejects `RENAME_NOREPLACE`, the
/// existence check and the rename are two steps.
pub fn rename_no_clobber(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(target_os = "linux")]
    let done = rename_noreplace(src, dst).map_err(io_error_with_help_io("rename", src))?;
    #[cfg(not(target_os = "linux"))]
    let done = false;

    if !done {
        check_then_rename(src, dst)?;
    }

    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}

/// `Ok(false)` when the kernel or filesystem does not support the flag.
#[cfg(target_os = "linux")]
fn rename_noreplace(src: &Path, dst: &Path) -> io::Result<bool> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = |p: &Path| {
        CString::new(p.as_os_str().as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"))
    };
    let (from, to) = (c_path(src)?, c_path(dst)?);

    // SAFETY: both pointers come from live CStrings; AT_FDCWD resolves relative paths.
    let rc = unsafe {
        libc::renameat2(
            libc::AT_FDCWD,
            from.as_ptr(),
            libc::AT_FDCWD,
            to.as_ptr(),
            libc::RENAME_NOREPLACE,
        )
    };
    if rc == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::EINVAL) | Some(libc::ENOSYS) => Ok(false),
        _ => Err(err),
    }
}

fn check_then_rename(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::symlink_metadata(dst) {
        Ok(_) => {
            return Err(io_error_with_help_io("rename onto", dst)(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination exists (source '{}')", src.display()),
            )));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_error_with_help_io("inspect rename target", dst)(e)),
    }
    fs::rename(src, dst).map_err(io_error_with_help_io("rename", src))
}
