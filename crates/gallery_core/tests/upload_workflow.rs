mod common;

use common::{calls, clear, recording_service, Call, PUBLIC_BASE};
use gallery_core::db::open_db_in_memory;
use gallery_core::{
    normalize_handle, FileSystemObjectStore, GalleryPage, GalleryService, SelectedFile,
    SqliteArtworkRepository, UploadError, UploadForm,
};

fn cat_png() -> SelectedFile {
    SelectedFile::new("cat.png", vec![0x89, b'P', b'N', b'G'])
}

#[test]
fn blank_handle_fails_without_backend_calls() {
    let (service, log) = recording_service();

    for handle in ["", "   ", "\t\n"] {
        let err = service
            .upload_artwork(handle, Some(&cat_png()))
            .unwrap_err();
        assert!(matches!(err, UploadError::MissingHandle), "{handle:?}");
    }
    assert!(calls(&log).is_empty());
}

#[test]
fn missing_file_fails_without_backend_calls() {
    let (service, log) = recording_service();

    let err = service.upload_artwork("alice", None).unwrap_err();

    assert!(matches!(err, UploadError::MissingFile));
    assert!(calls(&log).is_empty());
}

#[test]
fn handle_check_runs_before_file_check() {
    let (service, _log) = recording_service();
    let err = service.upload_artwork(" ", None).unwrap_err();
    assert!(matches!(err, UploadError::MissingHandle));
}

#[test]
fn upload_writes_object_then_record_with_normalized_handle() {
    let (service, log) = recording_service();

    let created = service
        .upload_artwork_at("alice", Some(&cat_png()), 1_700_000_000_000)
        .unwrap();

    assert_eq!(created.owner_handle, "@alice");
    assert_eq!(
        created.image_reference,
        format!("{PUBLIC_BASE}/1700000000000-cat.png")
    );
    assert_eq!(
        calls(&log),
        vec![
            Call::Put("1700000000000-cat.png".to_string()),
            Call::Insert("@alice".to_string()),
        ]
    );
    assert!(service.objects().contains("1700000000000-cat.png"));
    assert_eq!(service.records().row_ids(), vec![created.id]);
}

#[test]
fn prefixed_handle_is_stored_once_prefixed() {
    let (service, _log) = recording_service();

    let prefixed = service
        .upload_artwork_at("@bob", Some(&cat_png()), 1)
        .unwrap();

    assert_eq!(prefixed.owner_handle, "@bob");
}

#[test]
fn padded_handle_is_stored_as_entered_with_prefix() {
    let (service, log) = recording_service();

    let trailing = service
        .upload_artwork_at("alice ", Some(&cat_png()), 1)
        .unwrap();
    let padded = service
        .upload_artwork_at("  carol ", Some(&cat_png()), 2)
        .unwrap();

    assert_eq!(trailing.owner_handle, normalize_handle("alice "));
    assert_eq!(trailing.owner_handle, "@alice ");
    assert_eq!(padded.owner_handle, "@  carol ");
    assert_eq!(
        calls(&log),
        vec![
            Call::Put("1-cat.png".to_string()),
            Call::Insert("@alice ".to_string()),
            Call::Put("2-cat.png".to_string()),
            Call::Insert("@  carol ".to_string()),
        ]
    );
}

#[test]
fn object_write_failure_writes_no_record() {
    let (service, log) = recording_service();
    service.objects().fail_put.set(true);

    let err = service
        .upload_artwork_at("alice", Some(&cat_png()), 5)
        .unwrap_err();

    assert!(matches!(err, UploadError::ObjectWriteFailed { .. }));
    assert_eq!(err.user_message(), "Upload failed: bucket unavailable");
    assert_eq!(calls(&log), vec![Call::Put("5-cat.png".to_string())]);
    assert!(service.records().row_ids().is_empty());
}

#[test]
fn record_write_failure_leaves_object_orphaned() {
    let (service, _log) = recording_service();
    service.records().fail_insert.set(true);

    let err = service
        .upload_artwork_at("alice", Some(&cat_png()), 9)
        .unwrap_err();

    assert!(matches!(err, UploadError::RecordWriteFailed { .. }));
    assert_eq!(
        err.user_message(),
        "Could not save artwork. Please try again."
    );
    assert!(service.objects().contains("9-cat.png"));
    assert!(service.records().row_ids().is_empty());
}

#[test]
fn same_key_collision_is_reported_not_overwritten() {
    let (service, log) = recording_service();
    service
        .upload_artwork_at("alice", Some(&cat_png()), 42)
        .unwrap();
    clear(&log);

    let err = service
        .upload_artwork_at("bob", Some(&cat_png()), 42)
        .unwrap_err();

    assert!(matches!(err, UploadError::ObjectWriteFailed { .. }));
    assert_eq!(calls(&log), vec![Call::Put("42-cat.png".to_string())]);
    assert_eq!(service.records().row_ids().len(), 1);
}

#[test]
fn form_clears_input_after_success() {
    let (service, _log) = recording_service();
    let mut form = UploadForm::new();
    form.set_handle("alice");
    form.select_file(Some(cat_png()));

    let created = form.submit(&service).unwrap();

    assert_eq!(created.owner_handle, "@alice");
    assert!(created.image_reference.ends_with("-cat.png"));
    assert_eq!(form.handle(), "");
    assert!(form.selected_file().is_none());
    assert!(form.error_message().is_none());
}

#[test]
fn form_keeps_input_and_shows_message_after_failure() {
    let (service, _log) = recording_service();
    let mut form = UploadForm::new();
    form.set_handle("alice");

    form.submit(&service).unwrap_err();
    assert_eq!(
        form.error_message(),
        Some("Please select an image file to upload.")
    );
    assert_eq!(form.handle(), "alice");

    form.drop_files(vec![cat_png()]);
    form.submit(&service).unwrap();
    assert!(form.error_message().is_none());
}

#[test]
fn submit_while_upload_in_flight_makes_no_backend_calls() {
    let (service, log) = recording_service();
    let mut form = UploadForm::new();
    form.set_handle("alice");
    form.select_file(Some(cat_png()));

    assert!(form.start_upload());
    let err = form.submit(&service).unwrap_err();

    assert!(matches!(err, UploadError::InProgress));
    assert!(calls(&log).is_empty());
    assert!(form.is_uploading());
    assert_eq!(form.handle(), "alice");

    let result = service.upload_artwork(form.handle(), form.selected_file());
    form.finish_upload(&result);

    assert!(!form.is_uploading());
    assert_eq!(form.handle(), "");
    assert!(form.selected_file().is_none());
    assert_eq!(service.records().row_ids().len(), 1);
}

#[test]
fn page_upload_refreshes_gallery_with_new_artwork_first() {
    let (service, log) = recording_service();
    service.records().seed("@old", &format!("{PUBLIC_BASE}/1-old.png"));
    let mut page = GalleryPage::new();
    assert!(page.activate(&service));
    clear(&log);

    page.upload.set_handle("alice");
    page.upload.select_file(Some(cat_png()));
    let created = page.submit_upload(&service).unwrap();

    assert_eq!(calls(&log).last(), Some(&Call::List));
    let ids: Vec<_> = page.gallery.artworks().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![created.id, 1]);
}

#[test]
fn failed_page_upload_does_not_refresh() {
    let (service, log) = recording_service();
    let mut page = GalleryPage::new();
    page.upload.set_handle("alice");

    page.submit_upload(&service).unwrap_err();

    assert!(calls(&log).is_empty());
}

#[test]
fn sqlite_and_filesystem_backend_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let objects =
        FileSystemObjectStore::new(dir.path(), "http://localhost:8080/storage/artworks").unwrap();
    let service = GalleryService::new(SqliteArtworkRepository::new(&conn), objects);

    let created = service
        .upload_artwork_at("alice", Some(&cat_png()), 123)
        .unwrap();

    assert_eq!(
        created.image_reference,
        "http://localhost:8080/storage/artworks/123-cat.png"
    );
    assert_eq!(
        std::fs::read(dir.path().join("123-cat.png")).unwrap(),
        cat_png().bytes
    );
    assert_eq!(service.list_artworks().unwrap(), vec![created]);
}
