//! Replacement of the installed executable
//!
//! Unix: the running binary is renamed to `<path>.old`, the verified binary is
//! moved (or copied) into place and the backup is removed. If the new binary
//! cannot be put in place, the backup is renamed back.
//!
//! Windows: a running executable cannot be replaced, so the verified binary is
//! staged as `<path>.new` and a detached `update.bat` beside the executable
//! finishes the swap once this process has exited.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::download::VerifiedBinary;
use crate::error::{Result, UpdateError};

/// Suffix of the backup kept while the new binary is put in place
pub const BACKUP_SUFFIX: &str = ".old";

/// Suffix of the binary staged for the deferred swap
pub const STAGED_SUFFIX: &str = ".new";

/// Name of the deferred swap script
pub const SWAP_SCRIPT_NAME: &str = "update.bat";

/// Filesystem and process operations used during replacement
pub trait FileOps {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copy `from` over `to` and make the result executable
    fn copy_executable(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove(&self, path: &Path) -> io::Result<()>;

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Start `script` in the background without waiting for it
    fn spawn_detached(&self, script: &Path) -> io::Result<()>;
}

/// [`FileOps`] backed by `std::fs` and `std::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileOps;

impl FileOps for StdFileOps {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy_executable(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(to, fs::Permissions::from_mode(0o755))?;
        }

        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn spawn_detached(&self, script: &Path) -> io::Result<()> {
        std::process::Command::new("cmd")
            .args(["/c", "start", "/b"])
            .arg(script)
            .spawn()
            .map(|_| ())
    }
}

/// How the installed executable gets replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceStrategy {
    /// Rename aside, move the new binary in, drop the backup
    RenameSwap,

    /// Stage `<path>.new` and hand the swap to a script that runs after exit
    DeferredScript,
}

impl ReplaceStrategy {
    /// Strategy for the platform this binary was built for
    pub fn for_current_platform() -> Self {
        if cfg!(windows) {
            Self::DeferredScript
        } else {
            Self::RenameSwap
        }
    }
}

/// How the new binary reached the target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMethod {
    /// Moved into place after backing up the old binary
    Renamed,

    /// Copied into place after backing up the old binary
    CopiedAfterBackup,

    /// Copied over the old binary, which could not be moved aside
    CopiedWithoutBackup,
}

/// Result of an installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The new binary is at `path`
    Installed { path: PathBuf, method: InstallMethod },

    /// The swap script at `script` will finish the job after this process exits
    HandedOff { script: PathBuf },
}

/// Puts verified binaries in place of the installed executable
#[derive(Debug, Clone)]
pub struct Installer<F = StdFileOps> {
    ops: F,
    strategy: ReplaceStrategy,
}

impl Installer<StdFileOps> {
    pub fn new(strategy: ReplaceStrategy) -> Self {
        Self::with_file_ops(StdFileOps, strategy)
    }
}

impl<F: FileOps> Installer<F> {
    /// Installer using custom filesystem operations
    pub fn with_file_ops(ops: F, strategy: ReplaceStrategy) -> Self {
        Self { ops, strategy }
    }

    pub fn strategy(&self) -> ReplaceStrategy {
        self.strategy
    }

    /// Replace `target` with `binary`
    ///
    /// The temporary download is removed when `binary` is dropped at the end
    /// of this call, whatever the outcome.
    pub fn install(&self, binary: VerifiedBinary, target: &Path) -> Result<InstallOutcome> {
        info!("Installing {} over {}", binary.path().display(), target.display());

        match self.strategy {
            ReplaceStrategy::RenameSwap => {
                let method = self.replace_with_backup(binary.path(), target)?;
                Ok(InstallOutcome::Installed {
                    path: target.to_path_buf(),
                    method,
                })
            }
            ReplaceStrategy::DeferredScript => {
                let script = self.stage_deferred(binary.path(), target)?;
                Ok(InstallOutcome::HandedOff { script })
            }
        }
    }

    /// Rename-based swap with rollback
    pub fn replace_with_backup(&self, staged: &Path, target: &Path) -> Result<InstallMethod> {
        let backup = append_suffix(target, BACKUP_SUFFIX);

        if let Err(e) = self.ops.rename(target, &backup) {
            debug!(
                "Cannot move {} aside ({}), copying over it instead",
                target.display(),
                e
            );
            self.ops
                .copy_executable(staged, target)
                .map_err(|source| UpdateError::PermissionDenied {
                    path: target.to_path_buf(),
                    source,
                })?;
            return Ok(InstallMethod::CopiedWithoutBackup);
        }

        let method = match self.ops.rename(staged, target) {
            Ok(()) => InstallMethod::Renamed,
            Err(e) => {
                debug!("Rename into place failed ({}), copying instead", e);
                if let Err(source) = self.ops.copy_executable(staged, target) {
                    let rolled_back = match self.ops.rename(&backup, target) {
                        Ok(()) => {
                            warn!("Restored previous binary at {}", target.display());
                            true
                        }
                        Err(restore) => {
                            error!(
                                "Failed to restore {} from {}: {}",
                                target.display(),
                                backup.display(),
                                restore
                            );
                            false
                        }
                    };
                    return Err(UpdateError::PartialInstall {
                        path: target.to_path_buf(),
                        source,
                        rolled_back,
                    });
                }
                InstallMethod::CopiedAfterBackup
            }
        };

        if let Err(e) = self.ops.remove(&backup) {
            warn!("Failed to remove backup {}: {}", backup.display(), e);
        }

        Ok(method)
    }

    fn stage_deferred(&self, staged: &Path, target: &Path) -> Result<PathBuf> {
        let new_path = append_suffix(target, STAGED_SUFFIX);
        let old_path = append_suffix(target, BACKUP_SUFFIX);
        let script = target
            .parent()
            .map_or_else(|| PathBuf::from(SWAP_SCRIPT_NAME), |dir| dir.join(SWAP_SCRIPT_NAME));

        self.ops
            .copy_executable(staged, &new_path)
            .map_err(|source| UpdateError::PermissionDenied {
                path: new_path.clone(),
                source,
            })?;

        let contents = render_swap_script(target, &old_path, &new_path);
        self.ops
            .write(&script, contents.as_bytes())
            .map_err(|source| UpdateError::PermissionDenied {
                path: script.clone(),
                source,
            })?;

        debug!("Launching {}", script.display());
        self.ops.spawn_detached(&script)?;

        Ok(script)
    }
}

/// Batch script that swaps `exe` for `new` once the caller has exited
pub fn render_swap_script(exe: &Path, old: &Path, new: &Path) -> String {
    let (exe, old, new) = (exe.display(), old.display(), new.display());
    [
        "@echo off".to_string(),
        "timeout /t 1 /nobreak >nul".to_string(),
        format!("move /y \"{exe}\" \"{old}\" >nul 2>&1"),
        format!("move /y \"{new}\" \"{exe}\" >nul 2>&1"),
        format!("del \"{old}\" >nul 2>&1"),
        "del \"%~f0\"".to_string(),
        String::new(),
    ]
    .join("\r\n")
}

/// `path` with `suffix` appended to its file name (`cc` -> `cc.old`)
fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
