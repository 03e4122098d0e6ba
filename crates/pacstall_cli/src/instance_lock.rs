//! Single-instance lock.
//!
//! Commands that change the system hold an exclusive advisory lock on
//! [`LOCK_PATH`] for as long as they run. The holder writes its PID into the
//! file so that a waiting instance can tell the user who it is waiting for.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use tracing::{debug, warn};

use crate::errors::Error;

#[cfg(test)]
#[path = "instance_lock_tests.rs"]
mod tests;

/// Location of the lock file.
pub const LOCK_PATH: &str = "/var/lock/pacstall.lock";

/// How long and how often to retry a held lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOptions {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_attempts: 600,
        }
    }
}

/// An acquired instance lock. Dropping it releases the lock.
pub struct InstanceLock {
    path: PathBuf,
    _file: Flock<File>,
}

impl fmt::Debug for InstanceLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceLock").field("path", &self.path).finish()
    }
}

impl InstanceLock {
    /// Acquires the lock at `path`, creating the file when it is missing.
    ///
    /// While another process holds the lock, this warns once per distinct
    /// holder and retries every `options.poll_interval`. After
    /// `options.max_attempts` failed attempts it gives up with
    /// [`Error::LockTimeout`].
    pub async fn acquire(path: impl AsRef<Path>, options: &LockOptions) -> Result<Self, Error> {
        let path = path.as_ref();
        let lock_error = |reason: String| Error::Lock {
            path: path.display().to_string(),
            reason,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| lock_error(e.to_string()))?;

        let mut last_holder: Option<String> = None;
        let mut attempts = 0;
        loop {
            match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
                Ok(mut locked) => {
                    write_pid(&mut locked).map_err(|e| lock_error(e.to_string()))?;
                    debug!(message = "Acquired instance lock", path = ?path);
                    return Ok(Self {
                        path: path.to_path_buf(),
                        _file: locked,
                    });
                }
                Err((returned, errno)) if errno == Errno::EWOULDBLOCK => {
                    file = returned;
                    attempts += 1;
                    if attempts >= options.max_attempts {
                        return Err(Error::LockTimeout {
                            path: path.display().to_string(),
                        });
                    }

                    let holder = read_holder(path);
                    if last_holder.as_deref() != Some(holder.as_str()) {
                        warn!("Pacstall is already running another instance ({})", holder);
                        last_holder = Some(holder);
                    }
                    tokio::time::sleep(options.poll_interval).await;
                }
                Err((_, errno)) => return Err(lock_error(errno.desc().to_string())),
            }
        }
    }

    /// Path of the held lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        debug!(message = "Releasing instance lock", path = ?self.path);
    }
}

fn write_pid(file: &mut File) -> std::io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    write!(file, "{}", std::process::id())?;
    file.flush()
}

fn read_holder(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        _ => "unknown".to_string(),
    }
}
