//! The store file: a JSON array mirroring the whole record collection
//!
//! The file is read once when a store opens and rewritten in full after
//! mutations. A rewrite goes to a sibling `*.tmp` file first and is then
//! renamed over the target, so a reader sees either the old or the new
//! document, never a truncated one.
//!
//! Records are decoded one by one. A record without a usable identifier is
//! reported back instead of failing the whole document. A file that can not
//! be used at all can be moved aside to `<name>.corrupt` before the first
//! rewrite would replace it.

use crate::error::{Error, Result};
use rolodex_core::Contact;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Outcome of reading the store file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    /// Records that decoded, in file order
    pub records: Vec<Contact>,
    /// Position in the array and reason for every record that did not
    pub rejected: Vec<(usize, String)>,
}

impl LoadedRecords {
    /// True when every record of the file was decoded
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Handle on the store file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    /// Point at a store file; nothing is touched on disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Where [`quarantine`](Self::quarantine) and
    /// [`preserve_copy`](Self::preserve_copy) put the current file
    pub fn corrupt_path(&self) -> PathBuf {
        self.sibling(".corrupt")
    }

    /// Move the file to [`corrupt_path`](Self::corrupt_path)
    pub fn quarantine(&self) -> Result<PathBuf> {
        let target = self.corrupt_path();
        fs::rename(&self.path, &target).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(target)
    }

    /// Copy the file to [`corrupt_path`](Self::corrupt_path), leaving it in place
    pub fn preserve_copy(&self) -> Result<PathBuf> {
        let target = self.corrupt_path();
        fs::copy(&self.path, &target).map_err(|source| Error::Io {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }

    /// Create the directory holding the store file if needed
    pub fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|source| Error::Io {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    /// Read and parse the whole collection
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file is missing or unreadable
    /// - [`Error::Parse`] if it is not a JSON array
    pub fn load(&self) -> Result<LoadedRecords> {
        let file = File::open(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        let values: Vec<Value> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Parse {
                path: self.path.clone(),
                source,
            })?;

        let mut loaded = LoadedRecords::default();
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<Contact>(value) {
                Ok(contact) => loaded.records.push(contact),
                Err(e) => loaded.rejected.push((index, e.to_string())),
            }
        }
        Ok(loaded)
    }

    /// Replace the file with `contacts`
    ///
    /// The document is pretty-printed with two-space indentation. With
    /// `sync` set, file data is fsynced before the rename.
    pub fn write(&self, contacts: &[Contact], sync: bool) -> Result<()> {
        let tmp = self.temp_path();
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| Error::Io { path, source }
        };

        let file = File::create(&tmp).map_err(io_err(&tmp))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, contacts).map_err(Error::Encode)?;
        writer.flush().map_err(io_err(&tmp))?;
        if sync {
            writer.get_ref().sync_all().map_err(io_err(&tmp))?;
        }
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))
    }
}
