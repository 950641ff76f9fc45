//! Locating the running executable on disk.

use std::path::PathBuf;

/// Resolves the directory containing the running executable.
///
/// The production implementation asks the operating system; tests substitute
/// fixed answers so path resolution can be exercised without touching the
/// real binary location.
pub trait ExeLocator {
    /// The directory holding the executable, or `None` when the platform
    /// cannot report it.
    fn exe_dir(&self) -> Option<PathBuf>;
}

/// Queries the host OS for the executable location.
pub struct OsExeLocator;

impl ExeLocator for OsExeLocator {
    fn exe_dir(&self) -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.to_path_buf())
    }
}

/// Always reports a fixed directory.
#[cfg(test)]
pub struct FixedExeLocator(pub PathBuf);

#[cfg(test)]
impl ExeLocator for FixedExeLocator {
    fn exe_dir(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Never finds the executable.
#[cfg(test)]
pub struct NoExeLocator;

#[cfg(test)]
impl ExeLocator for NoExeLocator {
    fn exe_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_locator_finds_the_test_binary() {
        let dir = OsExeLocator.exe_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
    }
}
