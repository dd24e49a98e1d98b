#![allow(dead_code)]

use gallery_core::{
    Artwork, ArtworkId, ArtworkRepository, GalleryService, NewArtwork, ObjectStore, RepoError,
    RepoResult, StorageError, StorageResult,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const PUBLIC_BASE: &str = "https://cdn.test/public/artworks";

/// One backend call, in the order it reached either store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Put(String),
    Remove(String),
    Insert(String),
    List,
    Delete(ArtworkId),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct RecordingObjectStore {
    log: CallLog,
    objects: RefCell<BTreeMap<String, Vec<u8>>>,
    pub fail_put: Cell<bool>,
    pub fail_remove: Cell<bool>,
}

impl RecordingObjectStore {
    pub fn contains(&self, key: &str) -> bool {
        self.objects.borrow().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.borrow().keys().cloned().collect()
    }
}

impl ObjectStore for RecordingObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        self.log.borrow_mut().push(Call::Put(key.to_string()));
        if self.fail_put.get() {
            return Err(StorageError::Backend("bucket unavailable".to_string()));
        }
        let mut objects = self.objects.borrow_mut();
        if objects.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{PUBLIC_BASE}/{key}")
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.log.borrow_mut().push(Call::Remove(key.to_string()));
        if self.fail_remove.get() {
            return Err(StorageError::Backend("remove timed out".to_string()));
        }
        self.objects.borrow_mut().remove(key);
        Ok(())
    }
}

pub struct RecordingRepository {
    log: CallLog,
    rows: RefCell<Vec<Artwork>>,
    next_id: Cell<ArtworkId>,
    pub fail_insert: Cell<bool>,
    pub fail_list: Cell<bool>,
    pub fail_delete: Cell<bool>,
}

impl RecordingRepository {
    pub fn row_ids(&self) -> Vec<ArtworkId> {
        self.rows.borrow().iter().map(|row| row.id).collect()
    }

    /// Inserts a row without logging a call, for test setup.
    pub fn seed(&self, handle: &str, image_reference: &str) -> Artwork {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let artwork = NewArtwork::new(handle, image_reference).into_artwork(id);
        self.rows.borrow_mut().push(artwork.clone());
        artwork
    }

    /// Removes a row without logging a call, for test setup.
    pub fn delete_artwork_for_setup(&self, id: ArtworkId) {
        self.rows.borrow_mut().retain(|row| row.id != id);
    }
}

impl ArtworkRepository for RecordingRepository {
    fn insert_artwork(&self, artwork: &NewArtwork) -> RepoResult<Artwork> {
        self.log
            .borrow_mut()
            .push(Call::Insert(artwork.owner_handle.clone()));
        if self.fail_insert.get() {
            return Err(RepoError::Backend("insert rejected".to_string()));
        }
        artwork.validate()?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = artwork.clone().into_artwork(id);
        self.rows.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn list_artworks(&self) -> RepoResult<Vec<Artwork>> {
        self.log.borrow_mut().push(Call::List);
        if self.fail_list.get() {
            return Err(RepoError::Backend("select failed".to_string()));
        }
        let mut rows = self.rows.borrow().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    fn delete_artwork(&self, id: ArtworkId) -> RepoResult<()> {
        self.log.borrow_mut().push(Call::Delete(id));
        if self.fail_delete.get() {
            return Err(RepoError::Backend("delete rejected".to_string()));
        }
        self.rows.borrow_mut().retain(|row| row.id != id);
        Ok(())
    }
}

pub type RecordingService = GalleryService<RecordingRepository, RecordingObjectStore>;

/// Service over fresh recording stores sharing one call log.
pub fn recording_service() -> (RecordingService, CallLog) {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    let records = RecordingRepository {
        log: Rc::clone(&log),
        rows: RefCell::new(Vec::new()),
        next_id: Cell::new(1),
        fail_insert: Cell::new(false),
        fail_list: Cell::new(false),
        fail_delete: Cell::new(false),
    };
    let objects = RecordingObjectStore {
        log: Rc::clone(&log),
        objects: RefCell::new(BTreeMap::new()),
        fail_put: Cell::new(false),
        fail_remove: Cell::new(false),
    };
    (GalleryService::new(records, objects), log)
}

pub fn calls(log: &CallLog) -> Vec<Call> {
    log.borrow().clone()
}

pub fn clear(log: &CallLog) {
    log.borrow_mut().clear();
}
