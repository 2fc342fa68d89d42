use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SessionStoreError;
use crate::schema::Entry;

/// Result of a successful [`SessionStore::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Both fields were blank; neither memory nor disk was touched.
    Skipped,
    /// The entry is in memory and written to the backing file as record `record` (1-based).
    Persisted { record: usize },
}

#[derive(Debug)]
pub struct SessionStore {
    pub(crate) path: PathBuf,
    pub(crate) history: Vec<Entry>,
}

impl SessionStore {
    /// Opens the session backed by `path`, loading every persisted entry in write order.
    ///
    /// Missing parent directories are created. A missing file is a fresh session.
    /// Any record that fails to decode aborts the load; no partial history is returned.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionStoreError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SessionStoreError::EmptyPath);
        }
        let path = path.to_path_buf();

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| {
                SessionStoreError::io("creating session directory", dir, source)
            })?;
        }

        let read_file = match File::open(&path) {
            Ok(file) => file,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no session file yet; starting empty history");
                return Ok(Self {
                    path,
                    history: Vec::new(),
                });
            }
            Err(source) => {
                return Err(SessionStoreError::io("opening session file", &path, source));
            }
        };

        let history = read_records(&path, BufReader::new(read_file))?;
        debug!(path = %path.display(), entries = history.len(), "loaded session history");

        Ok(Self { path, history })
    }

    /// Records `(input, output)` as the next entry unless both are blank after trimming.
    ///
    /// The in-memory history is extended before the file is touched. An `Err`
    /// therefore always means the entry was accepted in memory but not
    /// persisted; later requests in this process still see it.
    pub fn append(
        &mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<AppendOutcome, SessionStoreError> {
        let entry = Entry::new(input, output);
        if entry.is_blank() {
            return Ok(AppendOutcome::Skipped);
        }

        self.history.push(entry);
        let record = self.history.len();
        let entry = &self.history[record - 1];

        let mut line = serde_json::to_vec(entry)
            .map_err(|source| SessionStoreError::serialize(&self.path, record, source))?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| {
                SessionStoreError::io("opening session file for append", &self.path, source)
            })?;
        file.write_all(&line).map_err(|source| {
            SessionStoreError::io("appending session record", &self.path, source)
        })?;
        file.sync_data()
            .map_err(|source| SessionStoreError::io("syncing session file", &self.path, source))?;

        debug!(path = %self.path.display(), record, "persisted session record");
        Ok(AppendOutcome::Persisted { record })
    }

    #[must_use]
    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// Decodes concatenated JSON records until end of input.
pub(crate) fn read_records<R: io::Read>(
    path: &Path,
    reader: R,
) -> Result<Vec<Entry>, SessionStoreError> {
    let mut records = serde_json::Deserializer::from_reader(reader).into_iter::<Entry>();
    let mut history = Vec::new();

    loop {
        let offset = records.byte_offset();
        match records.next() {
            None => break,
            Some(Ok(entry)) => history.push(entry),
            Some(Err(source)) if source.is_io() => {
                return Err(SessionStoreError::io(
                    "reading session file",
                    path,
                    io::Error::from(source),
                ));
            }
            Some(Err(source)) => {
                return Err(SessionStoreError::decode(
                    path,
                    history.len() + 1,
                    offset,
                    source,
                ));
            }
        }
    }

    Ok(history)
}
