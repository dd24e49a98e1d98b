use gallery_core::db::open_db_in_memory;
use gallery_core::{ArtworkRepository, NewArtwork, RepoError, SqliteArtworkRepository};

#[test]
fn insert_assigns_increasing_ids_and_returns_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);

    let first = repo
        .insert_artwork(&NewArtwork::new("alice", "https://cdn/1-a.png"))
        .unwrap();
    let second = repo
        .insert_artwork(&NewArtwork::new("@bob", "https://cdn/2-b.png"))
        .unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.owner_handle, "@alice");
    assert_eq!(second.owner_handle, "@bob");
    assert_eq!(first.image_reference, "https://cdn/1-a.png");
}

#[test]
fn list_is_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);

    let ids: Vec<_> = (0..3)
        .map(|n| {
            repo.insert_artwork(&NewArtwork::new("alice", format!("https://cdn/{n}.png")))
                .unwrap()
                .id
        })
        .collect();

    let listed: Vec<_> = repo.list_artworks().unwrap().iter().map(|a| a.id).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(listed, expected);
}

#[test]
fn gaps_left_by_deletion_keep_descending_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);
    for n in 1..=3 {
        repo.insert_artwork(&NewArtwork::new("alice", format!("https://cdn/{n}.png")))
            .unwrap();
    }

    repo.delete_artwork(2).unwrap();

    let listed: Vec<_> = repo.list_artworks().unwrap().iter().map(|a| a.id).collect();
    assert_eq!(listed, vec![3, 1]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);

    let first = repo
        .insert_artwork(&NewArtwork::new("alice", "https://cdn/1.png"))
        .unwrap();
    repo.delete_artwork(first.id).unwrap();
    let second = repo
        .insert_artwork(&NewArtwork::new("alice", "https://cdn/2.png"))
        .unwrap();

    assert!(second.id > first.id);
}

#[test]
fn delete_missing_id_is_ok() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);

    repo.delete_artwork(42).unwrap();
    assert!(repo.list_artworks().unwrap().is_empty());
}

#[test]
fn invalid_row_is_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);

    let unprefixed = NewArtwork {
        owner_handle: "bob".to_string(),
        image_reference: "https://cdn/1.png".to_string(),
    };
    let err = repo.insert_artwork(&unprefixed).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_artworks().unwrap().is_empty());
}

#[test]
fn invalid_persisted_row_fails_listing() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO artworks (username, image_url) VALUES ('bob', 'https://cdn/1.png');",
        [],
    )
    .unwrap();
    let repo = SqliteArtworkRepository::new(&conn);

    let err = repo.list_artworks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
