use ligdom::core::models::xref::CrossReference;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// On-disk store of verbatim Pfam documents, one file per
/// (structure, chain, accession).
///
/// Reads are lock-free. Writes go to a temporary file that is renamed into
/// place while holding a store-wide lock, so concurrent readers never see a
/// partially written document.
#[derive(Debug)]
pub struct DocumentCache {
    directory: PathBuf,
    write_lock: Mutex<()>,
}

impl DocumentCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, structure_id: &str, xref: &CrossReference) -> PathBuf {
        self.directory.join(format!(
            "{}_{}_{}.xml",
            structure_id, xref.chain_id, xref.accession
        ))
    }

    /// Returns the cached document, or `None` on a cache miss.
    pub fn load(&self, structure_id: &str, xref: &CrossReference) -> io::Result<Option<String>> {
        let path = self.path_for(structure_id, xref);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "Pfam cache hit.");
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn store(&self, structure_id: &str, xref: &CrossReference, text: &str) -> io::Result<PathBuf> {
        let path = self.path_for(structure_id, xref);
        let staging = path.with_extension("xml.part");

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| io::Error::other("cache write lock was poisoned"))?;
        fs::create_dir_all(&self.directory)?;
        fs::write(&staging, text)?;
        fs::rename(&staging, &path)?;

        debug!(path = %path.display(), bytes = text.len(), "Stored Pfam document.");
        Ok(path)
    }
}
