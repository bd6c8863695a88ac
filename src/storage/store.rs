use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::link::{Category, Link, default_categories};

/// Storage key for the link collection document
pub const LINKS_KEY: &str = "links";
/// Storage key for the category list document
pub const CATEGORIES_KEY: &str = "categories";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt document '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed key/value store. Each logical document is a single JSON file
/// under the data directory; writes replace the whole document.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Store { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn read_document<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.document_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        let value = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn write_document<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        std::fs::write(self.document_path(key), json)?;
        Ok(())
    }

    /// Load the link collection, empty if none has been saved yet
    pub fn load_links(&self) -> Result<Vec<Link>, StoreError> {
        Ok(self.read_document(LINKS_KEY)?.unwrap_or_default())
    }

    pub fn save_links(&self, links: &[Link]) -> Result<(), StoreError> {
        self.write_document(LINKS_KEY, &links)
    }

    /// Load the category list, seeding and persisting the default set on first run
    pub fn load_categories(&self) -> Result<Vec<Category>, StoreError> {
        match self.read_document(CATEGORIES_KEY)? {
            Some(categories) => Ok(categories),
            None => {
                let categories = default_categories();
                self.save_categories(&categories)?;
                Ok(categories)
            }
        }
    }

    pub fn save_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        self.write_document(CATEGORIES_KEY, &categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> Store {
        Store::open(dir.path()).unwrap()
    }

    #[test]
    fn fresh_store_has_no_links() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.load_links().unwrap().is_empty());
    }

    #[test]
    fn fresh_store_seeds_default_categories() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let categories = store.load_categories().unwrap();
        assert_eq!(categories.len(), 10);

        // The seed is persisted, not just returned
        assert!(dir.path().join("categories.json").exists());
        let again = store.load_categories().unwrap();
        assert_eq!(categories, again);
    }

    #[test]
    fn links_round_trip_whole_document() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        // empty collection
        store.save_links(&[]).unwrap();
        assert!(store.load_links().unwrap().is_empty());

        // one record with no optional fields, one fully populated
        let bare = Link {
            id: "a1".to_string(),
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            description: String::new(),
            category: "other".to_string(),
            tags: Vec::new(),
            favicon: String::new(),
            created_at: 1000,
            last_visited: None,
            visit_count: 0,
        };
        let full = Link {
            id: "b2".to_string(),
            url: "https://rust-lang.org".to_string(),
            title: "Rust".to_string(),
            description: "The Rust language".to_string(),
            category: "education".to_string(),
            tags: vec!["rust".to_string(), "systems".to_string()],
            favicon: "https://rust-lang.org/favicon.ico".to_string(),
            created_at: 2000,
            last_visited: Some(3000),
            visit_count: 9,
        };
        let links = vec![bare, full];
        store.save_links(&links).unwrap();
        assert_eq!(store.load_links().unwrap(), links);
    }

    #[test]
    fn persisted_layout_uses_original_field_names() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut link = Link::new();
        link.url = "https://example.com".to_string();
        link.title = "Example".to_string();
        store.save_links(&[link]).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("links.json")).unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"visitCount\""));
    }

    #[test]
    fn reading_data_saved_by_the_original_app() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let raw = r#"[{
            "id": "3f2b",
            "url": "https://github.com",
            "title": "GitHub",
            "description": "",
            "category": "work",
            "tags": ["development", "code"],
            "favicon": "https://github.com/favicon.ico",
            "createdAt": 1717171717000,
            "lastVisited": 1717181818000,
            "visitCount": 12
        }]"#;
        std::fs::write(dir.path().join("links.json"), raw).unwrap();

        let links = store.load_links().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].created_at, 1_717_171_717_000);
        assert_eq!(links[0].last_visited, Some(1_717_181_818_000));
        assert_eq!(links[0].visit_count, 12);
    }

    #[test]
    fn malformed_document_is_a_corrupt_error() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        std::fs::write(dir.path().join("links.json"), "{not json").unwrap();
        match store.load_links() {
            Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, "links"),
            other => panic!("expected corrupt error, got {:?}", other.map(|v| v.len())),
        }
    }
}
