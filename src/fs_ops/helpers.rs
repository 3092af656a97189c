//! I/O helper utilities.
//!
//! Adapters that enrich io::Error with the failed operation, the path and a
//! platform-aware hint, usable with map_err in io::Result and anyhow::Result code.
//!
//! Usage:
//!   fs::read_dir(dir).map_err(io_error_with_help("list directory", dir))?;
//!   fs::rename(a, b).map_err(io_error_with_help_io("rename", a))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; names can only change within one directory"),
            libc::EBUSY => Some("resource busy; another process is using it"),
            libc::ENOENT => Some("path not found; it may have been moved while you were editing"),
            libc::EEXIST | libc::ENOTEMPTY => Some("already exists; pick another name"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("name too long for this filesystem"),
            libc::EILSEQ => Some("name is not valid for this filesystem's encoding"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            5 => Some("access denied; check permissions"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found"),
            80 | 183 => Some("already exists; pick another name"),
            123 => Some("name contains characters not allowed on Windows"),
            206 => Some("filename or path too long"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved while you were editing"),
        io::ErrorKind::AlreadyExists => Some("already exists; pick another name"),
        io::ErrorKind::InvalidInput => Some("invalid name"),
        _ => None,
    }
}

/// Format a human-friendly message with op/path plus hint and OS code.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; preserves the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_op_path_and_hint() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let mapped = io_error_with_help_io("rename", Path::new("/x/a.txt"))(e);
        assert_eq!(mapped.kind(), io::ErrorKind::NotFound);
        let msg = mapped.to_string();
        assert!(msg.starts_with("rename '/x/a.txt': gone"), "{msg}");
        assert!(msg.contains("path not found"), "{msg}");
    }
}
