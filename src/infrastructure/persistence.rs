use crate::application::SessionStore;
use crate::domain::{mime_for_path, Attachment};
use std::fs;
use std::path::{Path, PathBuf};

/// Session store backed by one file per key in a per-process directory.
/// The directory lives in the system temp dir, so drafts survive screen
/// navigation within a run but not a new session.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn for_current_session() -> Result<Self, String> {
        let dir = std::env::temp_dir().join(format!("devis-session-{}", std::process::id()));
        Self::at(dir)
    }

    pub fn at(dir: PathBuf) -> Result<Self, String> {
        fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        fs::write(self.key_path(key), value).map_err(|e| e.to_string())
    }

    fn clear(&mut self, key: &str) {
        let _ = fs::remove_file(self.key_path(key));
    }
}

/// Stats a file selected for attachment. Size and MIME checks happen in
/// the application layer; this only gathers the facts.
pub fn load_attachment(path: &str) -> Result<Attachment, String> {
    let metadata = fs::metadata(path).map_err(|e| format!("{}: {}", path, e))?;
    if !metadata.is_file() {
        return Err(format!("{} is not a file", path));
    }
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let mime = mime_for_path(path)
        .unwrap_or("application/octet-stream")
        .to_string();
    Ok(Attachment {
        name,
        path: path.to_string(),
        size: metadata.len(),
        mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{DraftStore, DESIGNS_KEY};
    use crate::domain::Design;
    use std::io::Write;

    #[test]
    fn test_write_read_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::at(dir.path().join("session")).unwrap();

        assert!(store.read(DESIGNS_KEY).is_none());
        store.write(DESIGNS_KEY, "[1,2,3]").unwrap();
        assert_eq!(store.read(DESIGNS_KEY).unwrap(), "[1,2,3]");

        store.clear(DESIGNS_KEY);
        assert!(store.read(DESIGNS_KEY).is_none());
        // Clearing an absent key is a no-op.
        store.clear(DESIGNS_KEY);
    }

    #[test]
    fn test_drafts_survive_a_new_store_over_the_same_dir() {
        let dir = tempfile::tempdir().unwrap();
        let session_dir = dir.path().join("session");

        let store = FileSessionStore::at(session_dir.clone()).unwrap();
        let mut drafts = DraftStore::new(Box::new(store));
        drafts.insert(Design {
            design_number: "PACK-hotel-1".to_string(),
            product_name: "Pack Hotel".to_string(),
            quantity: 3,
            selected_size: "Standard".to_string(),
            items: Vec::new(),
        });

        // A fresh store over the same directory sees the persisted list,
        // the way a page refresh re-reads session storage.
        let reopened = FileSessionStore::at(session_dir).unwrap();
        let drafts = DraftStore::new(Box::new(reopened));
        let designs = drafts.designs();
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].design_number, "PACK-hotel-1");
        assert_eq!(drafts.total_quantity(), 3);
    }

    #[test]
    fn test_load_attachment_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 2048]).unwrap();

        let attachment = load_attachment(path.to_str().unwrap()).unwrap();
        assert_eq!(attachment.name, "logo.png");
        assert_eq!(attachment.size, 2048);
        assert_eq!(attachment.mime, "image/png");
    }

    #[test]
    fn test_load_attachment_unknown_extension_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let attachment = load_attachment(path.to_str().unwrap()).unwrap();
        assert_eq!(attachment.mime, "application/octet-stream");
    }

    #[test]
    fn test_load_attachment_missing_file_fails() {
        assert!(load_attachment("/no/such/file.pdf").is_err());
    }

    #[test]
    fn test_load_attachment_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_attachment(dir.path().to_str().unwrap()).is_err());
    }
}
