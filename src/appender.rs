//! The append-with-rotation primitive.
//!
//! [`append_all_text`] is the single point where bytes reach disk. It holds
//! an exclusive advisory lock on a sidecar file for the whole
//! size-check/rotate/append sequence. Concurrent writers, whether threads
//! or separate processes sharing the same root directory, therefore cannot
//! interleave a record mid-buffer, overshoot the size threshold together,
//! or rotate the same file twice.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use fs2::FileExt;
use log::debug;
use log::info;

use crate::Config;

/// Exclusive advisory lock keyed by a log file path.
///
/// The lock lives in a `{file}.lock` sidecar next to the log file. The
/// sidecar is never renamed during rotation, so writers blocked on it always
/// wake up holding the lock for the original path.
#[derive(Debug)]
pub(crate) struct PathLock {
    path: PathBuf,
    f: File,
}

impl PathLock {
    pub(crate) fn acquire(log_path: &Path) -> Result<Self, io::Error> {
        let path = Self::lock_path(log_path);

        let f = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;

        // Blocks until any other writer of this path releases the lock.
        f.lock_exclusive()?;

        debug!("File lock acquired: {}", path.display());

        Ok(Self { path, f })
    }

    fn lock_path(log_path: &Path) -> PathBuf {
        let mut p = log_path.as_os_str().to_os_string();
        p.push(".lock");
        PathBuf::from(p)
    }
}

impl Drop for PathLock {
    fn drop(&mut self) {
        let _ = self.f.unlock();
        debug!("File lock released: {}", self.path.display());
    }
}

/// Appends `text` (UTF-8) to the file at `path`, rotating first if the
/// append would push the file past `max_bytes`.
///
/// Creates the parent directory if absent. The whole buffer is written with
/// one `write_all`, so a record is never split across a rotation boundary.
///
/// A missing or empty file is never rotated, even when `text` alone exceeds
/// `max_bytes`: there is no prior content to preserve, and renaming an
/// empty file aside would only leave an empty rotation artifact. An
/// oversized buffer is written whole in that case.
pub(crate) fn append_all_text(
    path: &str,
    text: &str,
    max_bytes: u64,
) -> Result<(), io::Error> {
    let path = Path::new(path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let _lock = PathLock::acquire(path)?;

    let current_size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
        Err(e) => return Err(e),
    };

    // An empty file has nothing worth rotating, even for an oversized
    // buffer.
    if current_size > 0 && current_size + text.len() as u64 > max_bytes {
        rotate(path)?;
    }

    let mut f = OpenOptions::new().append(true).create(true).open(path)?;
    f.write_all(text.as_bytes())?;

    Ok(())
}

/// Moves the full file at `path` aside to the next free rotated name.
///
/// Called with the path lock held, so only one rotation can happen per
/// overflow even with concurrent writers.
fn rotate(path: &Path) -> Result<(), io::Error> {
    let seq = next_rotation_seq(path)?;
    let target = rotated_path(path, seq);

    fs::rename(path, &target)?;

    info!(
        "Rotated full log file: {} -> {}",
        path.display(),
        target.display()
    );

    Ok(())
}

/// Returns one greater than the highest rotation sequence already present
/// next to `path`, starting at 1.
fn next_rotation_seq(path: &Path) -> Result<u64, io::Error> {
    let stem = file_stem(path);

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut max_seq = 0;
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if let Ok(seq) = Config::parse_rotated_file_name(name, stem) {
            max_seq = max_seq.max(seq);
        }
    }

    Ok(max_seq + 1)
}

fn rotated_path(path: &Path, seq: u64) -> PathBuf {
    let file_name = Config::rotated_file_name(file_stem(path), seq);
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// The file name without its ".log" suffix.
fn file_stem(path: &Path) -> &str {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    name.strip_suffix(".log").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::append_all_text;
    use super::next_rotation_seq;
    use super::rotated_path;
    use super::PathLock;

    #[test]
    fn test_append_creates_parent_dir_and_file() -> Result<(), std::io::Error>
    {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir
            .path()
            .join("RequestInfo/RequestInfo_2024-03-01.log");
        let path_str = path.to_str().unwrap();

        append_all_text(path_str, "hello", 1024)?;
        assert_eq!(fs::read_to_string(&path)?, "hello");

        append_all_text(path_str, " world", 1024)?;
        assert_eq!(fs::read_to_string(&path)?, "hello world");

        Ok(())
    }

    #[test]
    fn test_append_rotates_at_threshold() -> Result<(), std::io::Error> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("a/a_2024-03-01.log");
        let path_str = path.to_str().unwrap();

        append_all_text(path_str, &"x".repeat(10), 16)?;
        // 10 + 10 > 16: the first file moves aside, the new file holds only
        // the second buffer
        append_all_text(path_str, &"y".repeat(10), 16)?;

        let rotated = temp_dir.path().join("a/a_2024-03-01.000000001.log");
        assert_eq!(fs::read_to_string(&rotated)?, "x".repeat(10));
        assert_eq!(fs::read_to_string(&path)?, "y".repeat(10));

        // a second overflow picks the next sequence
        append_all_text(path_str, &"z".repeat(10), 16)?;
        let rotated2 = temp_dir.path().join("a/a_2024-03-01.000000002.log");
        assert_eq!(fs::read_to_string(&rotated2)?, "y".repeat(10));
        assert_eq!(fs::read_to_string(&path)?, "z".repeat(10));

        Ok(())
    }

    #[test]
    fn test_oversized_first_append_does_not_rotate(
    ) -> Result<(), std::io::Error> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("big.log");
        let path_str = path.to_str().unwrap();

        append_all_text(path_str, &"x".repeat(100), 16)?;

        assert_eq!(fs::read_to_string(&path)?.len(), 100);
        assert_eq!(next_rotation_seq(&path)?, 1);

        Ok(())
    }

    #[test]
    fn test_next_rotation_seq_skips_foreign_files(
    ) -> Result<(), std::io::Error> {
        let temp_dir = tempfile::tempdir()?;
        let dir = temp_dir.path();
        let path = dir.join("a_2024-03-01.log");

        fs::write(dir.join("a_2024-03-01.000000002.log"), "")?;
        fs::write(dir.join("a_2024-03-01.000000005.log"), "")?;
        fs::write(dir.join("a_2024-03-02.000000009.log"), "")?;
        fs::write(dir.join("a_2024-03-01.log.lock"), "")?;

        assert_eq!(next_rotation_seq(&path)?, 6);

        Ok(())
    }

    #[test]
    fn test_rotated_path() {
        let p = rotated_path(Path::new("/logs/a/a_2024-03-01.log"), 7);
        assert_eq!(p, Path::new("/logs/a/a_2024-03-01.000000007.log"));

        let p = rotated_path(Path::new("bare.log"), 1);
        assert_eq!(p, Path::new("bare.000000001.log"));
    }

    #[test]
    fn test_path_lock_excludes_second_locker() -> Result<(), std::io::Error> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("x.log");

        let lock = PathLock::acquire(&path)?;

        let path2 = path.clone();
        let held = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(
            true,
        ));
        let held2 = held.clone();
        let handle = std::thread::spawn(move || {
            // blocks until the first lock drops
            let _l = PathLock::acquire(&path2).unwrap();
            held2.load(std::sync::atomic::Ordering::SeqCst)
        });

        std::thread::sleep(std::time::Duration::from_millis(50));
        held.store(false, std::sync::atomic::Ordering::SeqCst);
        drop(lock);

        // the second locker must have acquired only after the drop
        assert!(!handle.join().unwrap());

        Ok(())
    }
}
