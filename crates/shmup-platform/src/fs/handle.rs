use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::FsError;

/// An open file, optionally buffered whole in memory.
///
/// Once [`upload_to_ram`](Self::upload_to_ram) succeeds every read is served
/// from the buffer: the cursor only moves forward, and a read asking for more
/// than what is left gets the remainder instead of an error.
#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    file: Option<File>,
    data: Option<Vec<u8>>,
    cursor: usize,
}

impl FileHandle {
    pub(super) fn open(path: &Path) -> Result<Self, FsError> {
        let file = File::open(path).map_err(|source| FsError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            data: None,
            cursor: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Buffers the whole file into memory, from offset 0 regardless of any
    /// earlier unbuffered reads. A second call is a no-op.
    pub fn upload_to_ram(&mut self) -> Result<(), FsError> {
        if self.data.is_some() {
            return Ok(());
        }

        let Some(file) = self.file.as_mut() else {
            return Err(FsError::Read {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::NotConnected, "file descriptor released"),
            });
        };

        let mut buf = Vec::new();
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_end(&mut buf))
            .map_err(|source| FsError::Read {
                path: self.path.clone(),
                source,
            })?;

        log::debug!("buffered {} bytes from '{}'", buf.len(), self.path.display());

        self.data = Some(buf);
        self.cursor = 0;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Size of the in-memory copy, or 0 when not loaded.
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cursor into the in-memory copy.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The whole in-memory copy, independent of the cursor.
    pub fn loaded_bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Bytes between the cursor and the end of the in-memory copy.
    pub fn remaining(&self) -> &[u8] {
        match &self.data {
            Some(data) => &data[self.cursor..],
            None => &[],
        }
    }

    /// Reads whole `size`-byte records into `buf` and returns how many were
    /// copied. A short tail is still consumed, matching `fread` on a buffer.
    pub fn read_records(&mut self, buf: &mut [u8], size: usize) -> usize {
        if size == 0 {
            return 0;
        }
        match self.read(buf) {
            Ok(n) => n / size,
            Err(e) => {
                log::warn!("read from '{}' failed: {e}", self.path.display());
                0
            }
        }
    }

    /// Releases the buffer and the descriptor.
    ///
    /// Dropping the handle does the same; this exists so call sites can make
    /// the release explicit.
    pub fn close(mut self) {
        self.data = None;
        self.file = None;
    }
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(data) = &self.data {
            let remaining = &data[self.cursor..];
            let n = buf.len().min(remaining.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.cursor += n;
            return Ok(n);
        }

        match self.file.as_mut() {
            Some(file) => file.read(buf),
            None => Ok(0),
        }
    }
}
