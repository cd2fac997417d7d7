use log::debug;
use std::{ffi::CString, io, os::unix::ffi::OsStrExt, path::Path};

/// Answers whether the current process may write into a directory.
pub trait PermissionProbe {
    /// `Ok(false)` means access is denied, `Err` means the check itself failed.
    fn can_write(&self, dir: &Path) -> io::Result<bool>;
}

/// Checks access against the real user and group of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessProbe;

impl PermissionProbe for AccessProbe {
    fn can_write(&self, dir: &Path) -> io::Result<bool> {
        let c_path = CString::new(dir.as_os_str().as_bytes())
            .map_err(|why| io::Error::new(io::ErrorKind::InvalidInput, why))?;

        debug!(
            "Checking write access to {} as {:?}",
            dir.display(),
            users::get_current_username().unwrap_or_default()
        );

        // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
        if unsafe { libc::access(c_path.as_ptr(), libc::W_OK) } == 0 {
            return Ok(true);
        }

        let why = io::Error::last_os_error();
        match why.raw_os_error() {
            Some(libc::EACCES | libc::EPERM | libc::EROFS) => Ok(false),
            _ => Err(why),
        }
    }
}
