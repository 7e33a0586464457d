//! Append-only manifest log recording where trashed items came from.
//!
//! The manifest is a tab-separated text file inside the trash directory:
//!
//! ```text
//! # epoch	trashed_path	original_abs_path
//! 1700000000	1700000000_notes.txt	/tmp/ws/notes.txt
//! ```
//!
//! Every operation goes back to disk; there is no in-memory cache shared
//! between calls.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{io_to_core, CoreError, CoreResult};
use crate::trash::paths::trash_dir_for;

/// File name of the manifest inside the trash directory.
pub const MANIFEST_NAME: &str = "manifest.tsv";

/// First line of every manifest. Readers skip it.
pub const MANIFEST_HEADER: &str = "# epoch\ttrashed_path\toriginal_abs_path";

/// One line of the manifest: when an item was trashed, under which name,
/// and where it used to live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    epoch: u64,
    trashed_name: String,
    original_path: PathBuf,
}

impl ManifestRecord {
    pub fn new(epoch: u64, trashed_name: impl Into<String>, original_path: PathBuf) -> Self {
        Self {
            epoch,
            trashed_name: trashed_name.into(),
            original_path,
        }
    }

    /// Unix seconds at which the item was trashed.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Name of the item inside the trash directory.
    ///
    /// Older manifests may store a path here instead of a bare name; see
    /// [`ManifestRecord::trashed_path_in`].
    pub fn trashed_name(&self) -> &str {
        &self.trashed_name
    }

    /// Absolute path the item was trashed from.
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Location of the trashed item. Relative entries are resolved against
    /// `trash_dir`, absolute ones are returned unchanged.
    pub fn trashed_path_in(&self, trash_dir: &Path) -> PathBuf {
        let recorded = Path::new(&self.trashed_name);
        if recorded.is_absolute() {
            recorded.to_path_buf()
        } else {
            trash_dir.join(recorded)
        }
    }

    /// Serializes the record as one newline-terminated manifest line.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\n",
            self.epoch,
            self.trashed_name,
            self.original_path.display()
        )
    }

    /// Parses a manifest line. Returns `None` unless the line has exactly
    /// three tab-separated fields and the first is an integer.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut fields = line.split('\t');
        let epoch = fields.next()?.trim().parse().ok()?;
        let trashed_name = fields.next()?;
        let original = fields.next()?;
        if fields.next().is_some() || trashed_name.is_empty() || original.is_empty() {
            return None;
        }
        Some(Self::new(epoch, trashed_name, PathBuf::from(original)))
    }

    /// Returns `true` if the original path ends with `name` on a component
    /// boundary: `notes.txt` and `docs/notes.txt` both match
    /// `/ws/docs/notes.txt`, `otes.txt` does not.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim_end_matches(['/', MAIN_SEPARATOR]);
        if name.is_empty() {
            return false;
        }
        if self
            .original_path
            .file_name()
            .is_some_and(|f| f.to_string_lossy() == name)
        {
            return true;
        }
        let original = self.original_path.to_string_lossy();
        original.ends_with(&format!("{MAIN_SEPARATOR}{name}"))
    }
}

/// Handle on the manifest of one trash directory.
#[derive(Debug, Clone)]
pub struct Manifest {
    trash_dir: PathBuf,
    file: PathBuf,
}

impl Manifest {
    /// Binds to the manifest under `root` without touching the filesystem.
    pub fn open(root: &Path) -> Self {
        let trash_dir = trash_dir_for(root);
        let file = trash_dir.join(MANIFEST_NAME);
        Self { trash_dir, file }
    }

    /// Creates the trash directory and a header-only manifest if they are
    /// missing. Safe to call before every operation.
    ///
    /// # Errors
    ///
    /// - [`CoreError::PermissionDenied`] if the directory or file cannot be created.
    /// - [`CoreError::Io`] for any other I/O failure.
    pub fn ensure(root: &Path) -> CoreResult<Self> {
        let manifest = Self::open(root);
        fs::create_dir_all(&manifest.trash_dir)
            .map_err(|e| io_to_core(e, &manifest.trash_dir))?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&manifest.file)
        {
            Ok(mut file) => {
                writeln!(file, "{MANIFEST_HEADER}").map_err(|e| io_to_core(e, &manifest.file))?;
                tracing::debug!("created manifest at {}", manifest.file.display());
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(io_to_core(e, &manifest.file)),
        }

        Ok(manifest)
    }

    /// The trash directory this manifest lives in.
    pub fn trash_dir(&self) -> &Path {
        &self.trash_dir
    }

    /// Path of the manifest file itself.
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Returns `true` if the manifest file is present on disk.
    pub fn exists(&self) -> bool {
        self.file.is_file()
    }

    /// Appends one record. Prior content is never read or rewritten.
    ///
    /// # Errors
    ///
    /// [`CoreError::ManifestWrite`] for any I/O failure; by the time this is
    /// called the item has already been moved.
    pub fn append(&self, record: &ManifestRecord) -> CoreResult<()> {
        let write = || -> io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file)?;
            file.write_all(record.to_line().as_bytes())?;
            file.flush()
        };
        write().map_err(|source| CoreError::ManifestWrite {
            trashed: record.trashed_path_in(&self.trash_dir),
            manifest: self.file.clone(),
            source,
        })
    }

    /// Returns every non-header, non-blank line in file order.
    ///
    /// A missing manifest yields an empty list.
    pub fn read_lines(&self) -> CoreResult<Vec<String>> {
        let content = match fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_to_core(e, &self.file)),
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect())
    }

    /// Parses every line, oldest first. Malformed lines are skipped.
    pub fn records(&self) -> CoreResult<Vec<ManifestRecord>> {
        let lines = self.read_lines()?;
        let mut records = Vec::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            match ManifestRecord::parse(line) {
                Some(record) => records.push(record),
                None => tracing::debug!(
                    "skipping malformed manifest entry #{} in {}",
                    idx + 1,
                    self.file.display()
                ),
            }
        }
        Ok(records)
    }

    /// Returns every record matching `name`, most recently appended first.
    ///
    /// This is the backward scan restore walks; callers decide which of the
    /// matches is still usable.
    pub fn matching_newest_first(&self, name: &str) -> CoreResult<Vec<ManifestRecord>> {
        let mut matches: Vec<ManifestRecord> = self
            .records()?
            .into_iter()
            .filter(|record| record.matches_name(name))
            .collect();
        matches.reverse();
        Ok(matches)
    }
}
