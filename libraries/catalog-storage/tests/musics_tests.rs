//! Integration tests for the musics vertical slice
//!
//! Tests record persistence including:
//! - Insert defaults and timestamps
//! - Full-field updates and deletes
//! - Filtering, escaping and paging
//! - Atomic play count increments
//! - The unique url constraint


use catalog_core::{types::*, CatalogError};
use test_helpers::*;

// ============================================================================
// Create / Read
// ============================================================================

#[tokio::test]
async fn test_create_and_get_music() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created = create_full_music(
        pool,
        "Bohemian Rhapsody",
        "Queen",
        Some("A Night at the Opera"),
        Some("Rock"),
        Some(354),
        Some(1975),
    )
    .await;

    assert!(created.id > 0);
    assert_eq!(created.play_count, 0);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.formatted_duration(), "05:54");

    let retrieved = catalog_storage::musics::get_by_id(pool, created.id)
        .await
        .expect("Failed to get music")
        .expect("Music not found");

    assert_eq!(retrieved, created);
    assert_eq!(retrieved.album.as_deref(), Some("A Night at the Opera"));
}

#[tokio::test]
async fn test_get_missing_music_returns_none() {
    let test_db = TestDb::new().await;

    let missing = catalog_storage::musics::get_by_id(test_db.pool(), 999)
        .await
        .expect("Query failed");

    assert!(missing.is_none());
}

#[tokio::test]
async fn test_existence_checks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let music = CreateMusic {
        url: Some("https://example.com/song.mp3".to_string()),
        ..CreateMusic::new("Song", "Band")
    };
    catalog_storage::musics::create(pool, music).await.unwrap();

    assert!(
        catalog_storage::musics::exists_by_title_and_artist(pool, "Song", "Band")
            .await
            .unwrap()
    );
    assert!(
        !catalog_storage::musics::exists_by_title_and_artist(pool, "Song", "Other")
            .await
            .unwrap()
    );
    assert!(
        catalog_storage::musics::exists_by_url(pool, "https://example.com/song.mp3")
            .await
            .unwrap()
    );

    let by_url = catalog_storage::musics::find_by_url(pool, "https://example.com/song.mp3")
        .await
        .unwrap()
        .expect("Music not found by url");
    assert_eq!(by_url.title, "Song");
}

#[tokio::test]
async fn test_duplicate_url_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = CreateMusic {
        url: Some("https://example.com/a.mp3".to_string()),
        ..CreateMusic::new("First", "Band")
    };
    catalog_storage::musics::create(pool, first).await.unwrap();

    let second = CreateMusic {
        url: Some("https://example.com/a.mp3".to_string()),
        ..CreateMusic::new("Second", "Band")
    };
    let result = catalog_storage::musics::create(pool, second).await;

    match result {
        Err(CatalogError::Duplicate(msg)) => {
            assert_eq!(msg, "Music with url 'https://example.com/a.mp3' already exists");
        }
        other => panic!("expected duplicate error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_to_taken_url_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let taken = CreateMusic {
        url: Some("https://example.com/taken.mp3".to_string()),
        ..CreateMusic::new("First", "Band")
    };
    catalog_storage::musics::create(pool, taken).await.unwrap();
    let other = create_test_music(pool, "Second", "Band").await;

    let change = CreateMusic {
        url: Some("https://example.com/taken.mp3".to_string()),
        ..CreateMusic::new("Second", "Band")
    };
    let err = catalog_storage::musics::update(pool, other.id, change)
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(matches!(err, CatalogError::Duplicate(_)));
    assert!(msg.contains("already exists"));
    assert!(!msg.contains("UNIQUE constraint"));
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_play_count() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created = create_full_music(pool, "Old", "Artist", Some("Album"), None, None, None).await;
    play_times(pool, created.id, 2).await;

    let updated = catalog_storage::musics::update(
        pool,
        created.id,
        CreateMusic {
            genre: Some("Jazz".to_string()),
            ..CreateMusic::new("New", "Artist")
        },
    )
    .await
    .unwrap()
    .expect("Music not found");

    assert_eq!(updated.title, "New");
    assert_eq!(updated.album, None);
    assert_eq!(updated.genre.as_deref(), Some("Jazz"));
    assert_eq!(updated.play_count, 2);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_missing_music_returns_none() {
    let test_db = TestDb::new().await;

    let result = catalog_storage::musics::update(test_db.pool(), 42, CreateMusic::new("T", "A"))
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_music() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let music = create_test_music(pool, "Gone", "Soon").await;

    assert!(catalog_storage::musics::delete(pool, music.id).await.unwrap());
    assert!(!catalog_storage::musics::delete(pool, music.id).await.unwrap());
    assert!(catalog_storage::musics::get_by_id(pool, music.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = create_test_music(pool, "One", "A").await;
    catalog_storage::musics::delete(pool, first.id).await.unwrap();
    let second = create_test_music(pool, "Two", "A").await;

    assert!(second.id > first.id);
}

// ============================================================================
// Play count
// ============================================================================

#[tokio::test]
async fn test_increment_play_count() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let music = create_test_music(pool, "Hit", "Star").await;

    let played = catalog_storage::musics::increment_play_count(pool, music.id)
        .await
        .unwrap()
        .expect("Music not found");
    assert_eq!(played.play_count, 1);

    play_times(pool, music.id, 4).await;
    let reloaded = catalog_storage::musics::get_by_id(pool, music.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.play_count, 5);
}

#[tokio::test]
async fn test_concurrent_plays_are_not_lost() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();

    let music = create_test_music(&pool, "Anthem", "Crowd").await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            catalog_storage::musics::increment_play_count(&pool, music.id)
                .await
                .expect("Failed to play music")
        }));
    }
    for handle in handles {
        handle.await.expect("Task panicked");
    }

    let reloaded = catalog_storage::musics::get_by_id(&pool, music.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.play_count, 10);
}

#[tokio::test]
async fn test_increment_missing_music_returns_none() {
    let test_db = TestDb::new().await;

    let result = catalog_storage::musics::increment_play_count(test_db.pool(), 7)
        .await
        .unwrap();

    assert!(result.is_none());
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
async fn test_search_matches_title_artist_or_album() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_full_music(pool, "Love Song", "Alpha", None, None, None, None).await;
    create_full_music(pool, "Other", "Lovers", None, None, None, None).await;
    create_full_music(pool, "Third", "Beta", Some("Glove Box"), None, None, None).await;
    create_full_music(pool, "Nothing", "Gamma", None, None, None, None).await;

    let found = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::search("LOVE"),
        Sort::default(),
        None,
    )
    .await
    .unwrap();

    let titles: Vec<_> = found.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Love Song", "Other", "Third"]);
}

#[tokio::test]
async fn test_substring_filters_fold_non_ascii_case() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_full_music(
        pool,
        "Águas de Março",
        "Élis Regina",
        Some("Elis & Tom"),
        Some("Música Popular"),
        None,
        None,
    )
    .await;
    create_test_music(pool, "Garota de Ipanema", "Tom Jobim").await;

    let count_for = |filter: MusicFilter| async move {
        catalog_storage::musics::find_all(pool, &filter, Sort::default(), None)
            .await
            .unwrap()
            .len()
    };

    assert_eq!(count_for(MusicFilter::by_artist("élis")).await, 1);
    assert_eq!(count_for(MusicFilter::by_artist("ÉLIS")).await, 1);
    assert_eq!(count_for(MusicFilter::search("águas")).await, 1);
    assert_eq!(count_for(MusicFilter::search("MARÇO")).await, 1);
    assert_eq!(count_for(MusicFilter::by_title("ÁGUAS DE")).await, 1);
    assert_eq!(count_for(MusicFilter::by_genre("MÚSICA")).await, 1);
    assert_eq!(count_for(MusicFilter::by_album("elis &")).await, 1);
}

#[tokio::test]
async fn test_update_refreshes_folded_values() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let music = create_test_music(pool, "Old Title", "Band").await;
    catalog_storage::musics::update(pool, music.id, CreateMusic::new("Ça Plane Pour Moi", "Band"))
        .await
        .unwrap()
        .expect("Music not found");

    let by_new = catalog_storage::musics::count(pool, &MusicFilter::search("ÇA PLANE"))
        .await
        .unwrap();
    let by_old = catalog_storage::musics::count(pool, &MusicFilter::search("old title"))
        .await
        .unwrap();

    assert_eq!(by_new, 1);
    assert_eq!(by_old, 0);
}

#[tokio::test]
async fn test_wildcards_in_search_are_literal() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_music(pool, "100% Pure", "A").await;
    create_test_music(pool, "1000 Pure", "A").await;
    create_test_music(pool, "snake_case", "B").await;
    create_test_music(pool, "snakeXcase", "B").await;

    let percent = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::search("100%"),
        Sort::default(),
        None,
    )
    .await
    .unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "100% Pure");

    let underscore = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::search("e_c"),
        Sort::default(),
        None,
    )
    .await
    .unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].title, "snake_case");
}

#[tokio::test]
async fn test_artist_and_album_pair_is_exact() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_full_music(pool, "A", "Queen", Some("Jazz"), None, None, None).await;
    create_full_music(pool, "B", "Queen", Some("Jazz Live"), None, None, None).await;
    create_full_music(pool, "C", "Queens", Some("Jazz"), None, None, None).await;

    let found = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::by_artist_and_album("Queen", "Jazz"),
        Sort::default(),
        None,
    )
    .await
    .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "A");
}

#[tokio::test]
async fn test_range_filters() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_full_music(pool, "Short 70s", "A", None, None, Some(120), Some(1975)).await;
    create_full_music(pool, "Long 70s", "A", None, None, Some(600), Some(1979)).await;
    create_full_music(pool, "Short 90s", "A", None, None, Some(150), Some(1995)).await;
    create_full_music(pool, "Unknown", "A", None, None, None, None).await;

    let seventies = MusicFilter::default().released_between(Some(1970), Some(1979));
    let found = catalog_storage::musics::find_all(pool, &seventies, Sort::default(), None)
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let short_seventies = seventies.duration_between(None, Some(300));
    let found = catalog_storage::musics::find_all(pool, &short_seventies, Sort::default(), None)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Short 70s");

    let exact_year = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::by_release_year(1995),
        Sort::default(),
        None,
    )
    .await
    .unwrap();
    assert_eq!(exact_year.len(), 1);
}

#[tokio::test]
async fn test_url_and_play_count_filters() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let streamed = CreateMusic {
        url: Some("https://example.com/s.mp3".to_string()),
        ..CreateMusic::new("Streamed", "A")
    };
    let streamed = catalog_storage::musics::create(pool, streamed).await.unwrap();
    create_test_music(pool, "Local", "A").await;
    play_times(pool, streamed.id, 3).await;

    let with_url = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::default().with_url(true),
        Sort::default(),
        None,
    )
    .await
    .unwrap();
    assert_eq!(with_url.len(), 1);
    assert_eq!(with_url[0].title, "Streamed");

    let without_url = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::default().with_url(false),
        Sort::default(),
        None,
    )
    .await
    .unwrap();
    assert_eq!(without_url.len(), 1);
    assert_eq!(without_url[0].title, "Local");

    let played = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::default().min_plays(2),
        Sort::default(),
        None,
    )
    .await
    .unwrap();
    assert_eq!(played.len(), 1);
}

// ============================================================================
// Paging and sorting
// ============================================================================

#[tokio::test]
async fn test_find_page_reports_totals() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 0..25 {
        create_test_music(pool, &format!("Song {i:02}"), "Band").await;
    }

    let first = catalog_storage::musics::find_page(
        pool,
        &MusicFilter::default(),
        PageRequest::new(0, 10),
        Sort::asc(SortField::Title),
    )
    .await
    .unwrap();

    assert_eq!(first.total_elements, 25);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.content.len(), 10);
    assert_eq!(first.content[0].title, "Song 00");

    let last = catalog_storage::musics::find_page(
        pool,
        &MusicFilter::default(),
        PageRequest::new(2, 10),
        Sort::asc(SortField::Title),
    )
    .await
    .unwrap();
    assert_eq!(last.content.len(), 5);
    assert!(!last.has_next());

    let beyond = catalog_storage::musics::find_page(
        pool,
        &MusicFilter::default(),
        PageRequest::new(9, 10),
        Sort::asc(SortField::Title),
    )
    .await
    .unwrap();
    assert!(beyond.content.is_empty());
    assert_eq!(beyond.total_elements, 25);
}

#[tokio::test]
async fn test_sort_by_play_count_desc_breaks_ties_by_id() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_music(pool, "A", "X").await;
    let b = create_test_music(pool, "B", "X").await;
    let c = create_test_music(pool, "C", "X").await;
    play_times(pool, b.id, 3).await;
    play_times(pool, a.id, 1).await;
    play_times(pool, c.id, 1).await;

    let popular = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::default(),
        Sort::desc(SortField::PlayCount),
        Some(10),
    )
    .await
    .unwrap();

    let ids: Vec<_> = popular.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![b.id, c.id, a.id]);
}

#[tokio::test]
async fn test_find_all_respects_limit() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 0..5 {
        create_test_music(pool, &format!("T{i}"), "A").await;
    }

    let recent = catalog_storage::musics::find_all(
        pool,
        &MusicFilter::default(),
        Sort::desc(SortField::CreatedAt),
        Some(3),
    )
    .await
    .unwrap();

    let titles: Vec<_> = recent.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["T4", "T3", "T2"]);
}
