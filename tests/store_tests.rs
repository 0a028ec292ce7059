//! Integration tests for the record store.
//!
//! Tests cover:
//! - Save/load of full and partial records
//! - The "-" and "unknown" on-disk sentinels
//! - Catalog index persistence

use movie_catalog::core::store::{self, INDEX_FILE, RECORD_FILE};
use movie_catalog::models::record::{
    CastMember, Gender, MovieRecord, ProviderMetadata, Year,
};
use movie_catalog::Error;
use std::fs;
use tempfile::TempDir;

fn enriched_record(folder: &std::path::Path) -> MovieRecord {
    let mut record = MovieRecord::new("Ringu", Year::Known(1998), "720p", folder.to_path_buf());
    record.director = Some("Hideo Nakata".to_string());
    record.screenplay = Some(vec!["Hiroshi Takahashi".to_string()]);
    record.cast = Some(vec![CastMember {
        name: "Nanako Matsushima".to_string(),
        role: "Reiko Asakawa".to_string(),
        gender: Gender::Female,
    }]);
    record.provider_metadata = Some(ProviderMetadata {
        id: 2671,
        genre_ids: vec![27, 9648],
        poster_path: Some("/ringu.jpg".to_string()),
        imdb_id: Some("tt0178868".to_string()),
    });
    record
}

#[test]
fn test_save_then_load_full_record() {
    let temp_dir = TempDir::new().unwrap();
    let record = enriched_record(temp_dir.path());

    store::save_record(&record).unwrap();
    let loaded = store::load_record(temp_dir.path()).unwrap();

    assert_eq!(loaded, record);
}

#[test]
fn test_save_then_load_bare_record() {
    let temp_dir = TempDir::new().unwrap();
    let record = MovieRecord::new("Ringu", Year::Unknown, "-", temp_dir.path().to_path_buf());

    store::save_record(&record).unwrap();
    let loaded = store::load_record(temp_dir.path()).unwrap();

    assert_eq!(loaded, record);
    assert!(loaded.director.is_none());
    assert!(loaded.provider_metadata.is_none());
}

#[test]
fn test_unknown_year_is_written_as_text() {
    let temp_dir = TempDir::new().unwrap();
    let record = MovieRecord::new("Ringu", Year::Unknown, "-", temp_dir.path().to_path_buf());
    store::save_record(&record).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join(RECORD_FILE)).unwrap())
            .unwrap();

    assert_eq!(raw["year"], "unknown");
    assert_eq!(raw["resolution"], "-");
    assert_eq!(raw["title"], "Ringu");
}

#[test]
fn test_load_record_written_by_hand() {
    let temp_dir = TempDir::new().unwrap();
    let content = format!(
        r#"{{
            "title": "Audition",
            "year": 1999,
            "resolution": "1080p",
            "path": "{}",
            "director": "-",
            "screenplay": "-",
            "cast": "-",
            "api": "-",
            "rating": 5
        }}"#,
        temp_dir.path().display()
    );
    fs::write(temp_dir.path().join(RECORD_FILE), content).unwrap();

    let loaded = store::load_record(temp_dir.path()).unwrap();

    assert_eq!(loaded.title, "Audition");
    assert_eq!(loaded.year, Year::Known(1999));
    assert!(loaded.director.is_none());
    assert!(loaded.screenplay.is_none());
    assert!(loaded.cast.is_none());
    assert!(loaded.provider_metadata.is_none());
    assert_eq!(loaded.extra.get("rating"), Some(&serde_json::json!(5)));
}

#[test]
fn test_truncated_record_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(RECORD_FILE), r#"{"title": "Ringu", "ye"#).unwrap();

    let result = store::load_record(temp_dir.path());
    assert!(matches!(result, Err(Error::RecordCorrupt { .. })));
}

#[test]
fn test_catalog_index_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("Ringu (1998) [720p]");
    fs::create_dir(&folder).unwrap();
    let records = vec![enriched_record(&folder)];

    assert!(store::load_catalog_index(temp_dir.path()).is_none());

    store::save_catalog_index(temp_dir.path(), &records).unwrap();
    assert!(temp_dir.path().join(INDEX_FILE).is_file());

    let index = store::load_catalog_index(temp_dir.path()).unwrap();
    assert_eq!(index.root, temp_dir.path());
    assert_eq!(index.records, records);
}

#[test]
fn test_invalid_catalog_index_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(INDEX_FILE), "not json").unwrap();

    assert!(store::load_catalog_index(temp_dir.path()).is_none());
}

#[test]
fn test_save_poster_creates_image_directory() {
    let temp_dir = TempDir::new().unwrap();
    let record = MovieRecord::new("Ringu", Year::Known(1998), "-", temp_dir.path().to_path_buf());
    assert!(!record.has_poster());

    let path = store::save_poster(&record, b"jpeg bytes").unwrap();

    assert_eq!(path, record.poster_path());
    assert!(record.has_poster());
    assert_eq!(record.image_path(), Some(path));
}
