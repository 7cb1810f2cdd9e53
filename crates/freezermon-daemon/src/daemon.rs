//! Detaching from the terminal.
//!
//! Must run before the tokio runtime or any other thread is started.

use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;

const UMASK: libc::mode_t = 0o027;
const LOG_FILE_MODE: u32 = 0o640;
const PID_FILE_MODE: u32 = 0o644;

/// PID file that is removed again when dropped.
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Writes the current process ID to `path`.
    ///
    /// Fails if the file names a process that is still alive. A stale file
    /// is replaced.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(pid) = read_pid(&path) {
            if process_alive(pid) {
                bail!(
                    "Another instance is running (PID {}, {})",
                    pid,
                    path.display()
                );
            }
        }
        if path.exists() {
            let _ = std::fs::remove_file(&path);
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(PID_FILE_MODE)
            .open(&path)
            .with_context(|| format!("Failed to create PID file {}", path.display()))?;
        writeln!(file, "{}", std::process::id())?;
        file.sync_all()?;

        debug!("PID file written: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove PID file {}: {}", self.path.display(), e);
        }
    }
}

fn read_pid(path: &Path) -> Option<libc::pid_t> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

fn process_alive(pid: libc::pid_t) -> bool {
    // SAFETY: signal 0 only checks that the process exists.
    pid > 0 && unsafe { libc::kill(pid, 0) } == 0
}

/// Forks into the background.
///
/// The parent exits with status 0. The child starts a new session, redirects
/// stdin to `/dev/null` and stdout/stderr to the configured log file, and
/// records its PID.
pub fn daemonize(config: &Config) -> Result<PidFile> {
    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(LOG_FILE_MODE)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
    let dev_null = File::open("/dev/null").context("Failed to open /dev/null")?;

    // SAFETY: called before any other thread exists.
    match unsafe { libc::fork() } {
        -1 => return Err(std::io::Error::last_os_error()).context("fork failed"),
        0 => {}
        _ => std::process::exit(0),
    }

    // SAFETY: plain syscalls on descriptors owned by this process.
    unsafe {
        if libc::setsid() == -1 {
            return Err(std::io::Error::last_os_error()).context("setsid failed");
        }
        libc::umask(UMASK);
        redirect(dev_null.as_raw_fd(), libc::STDIN_FILENO)?;
        redirect(log.as_raw_fd(), libc::STDOUT_FILENO)?;
        redirect(log.as_raw_fd(), libc::STDERR_FILENO)?;
    }

    let pid_file = PidFile::create(&config.pid_file)?;
    info!("- - - - - - - - - - - - - - -");
    info!(
        "Daemon started (PID {}, PID file {})",
        std::process::id(),
        pid_file.path().display()
    );
    Ok(pid_file)
}

unsafe fn redirect(from: libc::c_int, to: libc::c_int) -> Result<()> {
    if libc::dup2(from, to) == -1 {
        return Err(std::io::Error::last_os_error())
            .with_context(|| format!("Failed to redirect fd {}", to));
    }
    Ok(())
}
