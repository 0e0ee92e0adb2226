use std::fs::File;
use std::io;
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

/// Exclusive advisory lock on an open file, released on drop.
///
/// The lock is taken with `flock`, so it excludes other processes as well
/// as other handles opened by this process. The file must outlive the guard.
pub struct ExclusiveLock<'a> {
    file: &'a File,
}

impl<'a> ExclusiveLock<'a> {
    /// Block until the exclusive lock on `file` is held.
    ///
    /// There is no timeout: a writer waits as long as another holder keeps
    /// the lock. Interrupted waits are retried.
    pub fn acquire(file: &'a File) -> io::Result<Self> {
        loop {
            match flock(file, LockOp::Exclusive) {
                Ok(()) => return Ok(Self { file }),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Release the lock now, reporting any error.
    pub fn release(self) -> io::Result<()> {
        let result = flock(self.file, LockOp::Unlock);
        std::mem::forget(self);
        result
    }
}

impl Drop for ExclusiveLock<'_> {
    fn drop(&mut self) {
        let _ = flock(self.file, LockOp::Unlock);
    }
}

enum LockOp {
    Exclusive,
    Unlock,
}

#[cfg(unix)]
fn flock(file: &File, op: LockOp) -> io::Result<()> {
    let fd = file.as_raw_fd();
    let operation = match op {
        LockOp::Exclusive => libc::LOCK_EX,
        LockOp::Unlock => libc::LOCK_UN,
    };
    // SAFETY: `fd` is a valid descriptor owned by `file`, which is borrowed
    // for the duration of this call. `LOCK_EX` and `LOCK_UN` are valid
    // `flock` operations.
    let rc = unsafe { libc::flock(fd, operation) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Advisory locking is unavailable here; appends rely on append-mode
/// writes alone.
#[cfg(not(unix))]
fn flock(_: &File, _: LockOp) -> io::Result<()> {
    Ok(())
}
