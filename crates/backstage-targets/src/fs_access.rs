use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// An open targets file. Dropping the handle closes it.
pub trait TargetFile {
    fn read_all(&mut self) -> io::Result<Vec<u8>>;

    /// Writes as much of `bytes` as the file accepts and returns that count.
    /// A count below `bytes.len()` means the write stopped early.
    fn write_all_counted(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

/// Opens the backing file of a target registry.
pub trait TargetFs {
    /// Read/write, created if missing, existing content kept.
    fn open_read_write(&self, path: &Path) -> io::Result<Box<dyn TargetFile>>;

    /// Read/write, created if missing, existing content truncated.
    fn open_read_write_truncate(&self, path: &Path) -> io::Result<Box<dyn TargetFile>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    fn open(path: &Path, truncate: bool) -> io::Result<Box<dyn TargetFile>> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(truncate);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options.open(path)?;
        Ok(Box::new(OsFile { file }))
    }
}

impl TargetFs for OsFs {
    fn open_read_write(&self, path: &Path) -> io::Result<Box<dyn TargetFile>> {
        Self::open(path, false)
    }

    fn open_read_write_truncate(&self, path: &Path) -> io::Result<Box<dyn TargetFile>> {
        Self::open(path, true)
    }
}

struct OsFile {
    file: File,
}

impl TargetFile for OsFile {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut content = Vec::new();
        self.file.read_to_end(&mut content)?;
        Ok(content)
    }

    fn write_all_counted(&mut self, bytes: &[u8]) -> io::Result<usize> {
        write_counted(&mut self.file, bytes)
    }
}

fn write_counted<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => break,
            Ok(count) => written += count,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    writer.flush()?;
    Ok(written)
}

/// In-memory filesystem for exercising the registry without touching disk.
///
/// Clones share the same files, so a test can keep one handle to inspect
/// what a registry persisted through another.
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    inner: Arc<Mutex<MemFsInner>>,
}

#[derive(Debug, Default)]
struct MemFsInner {
    files: HashMap<PathBuf, Vec<u8>>,
    write_limit: Option<usize>,
    open_error: Option<io::ErrorKind>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.lock().files.insert(path.into(), content.into());
        self
    }

    /// Caps every subsequent write at `limit` bytes.
    pub fn with_write_limit(self, limit: usize) -> Self {
        self.lock().write_limit = Some(limit);
        self
    }

    /// Makes every subsequent open fail with `kind`.
    pub fn with_open_error(self, kind: io::ErrorKind) -> Self {
        self.lock().open_error = Some(kind);
        self
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }

    fn lock(&self) -> MutexGuard<'_, MemFsInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn open(&self, path: &Path, truncate: bool) -> io::Result<Box<dyn TargetFile>> {
        let mut inner = self.lock();
        if let Some(kind) = inner.open_error {
            return Err(io::Error::new(
                kind,
                format!("cannot open {}", path.display()),
            ));
        }

        let content = inner.files.entry(path.to_path_buf()).or_default();
        if truncate {
            content.clear();
        }

        Ok(Box::new(MemFile {
            fs: self.clone(),
            path: path.to_path_buf(),
        }))
    }
}

impl TargetFs for MemFs {
    fn open_read_write(&self, path: &Path) -> io::Result<Box<dyn TargetFile>> {
        self.open(path, false)
    }

    fn open_read_write_truncate(&self, path: &Path) -> io::Result<Box<dyn TargetFile>> {
        self.open(path, true)
    }
}

struct MemFile {
    fs: MemFs,
    path: PathBuf,
}

impl TargetFile for MemFile {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.fs.contents(&self.path).unwrap_or_default())
    }

    fn write_all_counted(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut inner = self.fs.lock();
        let accepted = match inner.write_limit {
            Some(limit) => bytes.len().min(limit),
            None => bytes.len(),
        };
        inner
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(&bytes[..accepted]);
        Ok(accepted)
    }
}
