//! The categorized listing catalog and its file-backed snapshot.
//!
//! In-memory state is authoritative for the process lifetime. The
//! snapshot file is best-effort durability: rewritten wholesale after
//! each mutation, and a write failure never rolls the mutation back.

use std::path::PathBuf;

use chrono::Utc;
use indexmap::IndexMap;

use crate::error::CoreError;
use crate::types::{Listing, ListingId, NewListing};

/// Category keys seeded into an empty catalog.
pub const DEFAULT_CATEGORIES: &[&str] = &["freshporkcuts", "processedPork", "internationalPork"];

/// Category key -> listings in insertion order. Category iteration
/// order is itself insertion order, so delete scans are deterministic.
pub type Catalog = IndexMap<String, Vec<Listing>>;

/// Single source of truth for categorized listings.
pub struct CatalogStore {
    snapshot_path: PathBuf,
    categories: Catalog,
    last_id: ListingId,
}

impl CatalogStore {
    /// Load the catalog from `snapshot_path`.
    ///
    /// A missing snapshot yields an empty catalog with the default
    /// categories. An unreadable or unparseable snapshot does the same
    /// after logging a warning; startup never fails on snapshot state.
    pub fn load(snapshot_path: impl Into<PathBuf>) -> Self {
        let snapshot_path = snapshot_path.into();

        let categories = match std::fs::read_to_string(&snapshot_path) {
            Ok(raw) => match serde_json::from_str::<Catalog>(&raw) {
                Ok(catalog) => {
                    tracing::info!(path = %snapshot_path.display(), "Catalog snapshot loaded");
                    catalog
                }
                Err(e) => {
                    tracing::warn!(
                        path = %snapshot_path.display(),
                        error = %e,
                        "Ignoring unparseable catalog snapshot"
                    );
                    empty_catalog()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => empty_catalog(),
            Err(e) => {
                tracing::warn!(
                    path = %snapshot_path.display(),
                    error = %e,
                    "Failed to read catalog snapshot"
                );
                empty_catalog()
            }
        };

        // Seed the id generator past everything already in the catalog.
        let last_id = categories
            .values()
            .flatten()
            .map(|listing| listing.id)
            .max()
            .unwrap_or(0);

        Self {
            snapshot_path,
            categories,
            last_id,
        }
    }

    /// Full catalog view, no side effects.
    pub fn all(&self) -> &Catalog {
        &self.categories
    }

    /// Validate and append a new listing, then rewrite the snapshot.
    ///
    /// An unknown category key creates that category lazily.
    pub fn insert(&mut self, input: NewListing) -> Result<Listing, CoreError> {
        let name = require(input.name, "name")?;
        let description = require(input.description, "description")?;
        let category = require(input.category, "category")?;
        let image = require(input.image, "image")?;
        let price = input
            .price
            .ok_or_else(|| CoreError::Validation("Field 'price' is required".into()))?
            .parse()?;

        let listing = Listing {
            id: self.next_id(),
            name,
            description,
            price,
            category: category.clone(),
            image,
            created_at: Utc::now(),
        };

        self.categories
            .entry(category)
            .or_default()
            .push(listing.clone());
        self.persist();

        Ok(listing)
    }

    /// Remove the listing with `id`, scanning categories in catalog
    /// order, and return it. Blob cleanup for the listing's image is
    /// the caller's concern; catalog consistency never depends on it.
    pub fn delete(&mut self, id: ListingId) -> Result<Listing, CoreError> {
        for listings in self.categories.values_mut() {
            if let Some(index) = listings.iter().position(|listing| listing.id == id) {
                let removed = listings.remove(index);
                self.persist();
                return Ok(removed);
            }
        }

        Err(CoreError::NotFound {
            entity: "Menu item",
            id: id.to_string(),
        })
    }

    /// Millisecond timestamp id, bumped monotonically so two inserts in
    /// the same millisecond still get distinct ids.
    fn next_id(&mut self) -> ListingId {
        let candidate = Utc::now().timestamp_millis();
        self.last_id = candidate.max(self.last_id + 1);
        self.last_id
    }

    /// Rewrite the whole snapshot file. I/O failures are logged and
    /// swallowed; the in-memory catalog stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.write_snapshot() {
            tracing::error!(
                path = %self.snapshot_path.display(),
                error = %e,
                "Failed to write catalog snapshot"
            );
        }
    }

    fn write_snapshot(&self) -> std::io::Result<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.categories).map_err(std::io::Error::other)?;
        std::fs::write(&self.snapshot_path, json)
    }
}

fn empty_catalog() -> Catalog {
    DEFAULT_CATEGORIES
        .iter()
        .map(|category| (category.to_string(), Vec::new()))
        .collect()
}

fn require(field: Option<String>, name: &str) -> Result<String, CoreError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CoreError::Validation(format!("Field '{name}' is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn store(dir: &tempfile::TempDir) -> CatalogStore {
        CatalogStore::load(dir.path().join("menu-items.json"))
    }

    fn pork_belly() -> NewListing {
        NewListing {
            name: Some("Pork Belly".into()),
            description: Some("Fresh cut".into()),
            price: Some(Price::Text("12.50".into())),
            category: Some("freshporkcuts".into()),
            image: Some("https://host/uploads/x.jpg".into()),
        }
    }

    #[test]
    fn fresh_store_has_default_categories() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let keys: Vec<_> = store.all().keys().cloned().collect();
        assert_eq!(keys, DEFAULT_CATEGORIES);
        assert!(store.all().values().all(Vec::is_empty));
    }

    #[test]
    fn insert_appends_to_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let listing = store.insert(pork_belly()).unwrap();

        assert_eq!(listing.name, "Pork Belly");
        assert_eq!(listing.price, 12.5);
        assert_eq!(listing.category, "freshporkcuts");
        assert_eq!(listing.image, "https://host/uploads/x.jpg");
        assert!(listing.id > 0);

        let bucket = &store.all()["freshporkcuts"];
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0], listing);
    }

    #[test]
    fn insert_requires_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        for strip in ["name", "description", "price", "category", "image"] {
            let mut input = pork_belly();
            match strip {
                "name" => input.name = None,
                "description" => input.description = None,
                "price" => input.price = None,
                "category" => input.category = None,
                _ => input.image = None,
            }
            let err = store.insert(input).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "missing {strip}");
        }

        // Whitespace-only text fields count as missing.
        let mut input = pork_belly();
        input.name = Some("   ".into());
        assert!(matches!(
            store.insert(input),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn insert_rejects_bad_price() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let mut input = pork_belly();
        input.price = Some(Price::Text("free".into()));
        assert!(matches!(store.insert(input), Err(CoreError::Validation(_))));

        let mut input = pork_belly();
        input.price = Some(Price::Number(-1.0));
        assert!(matches!(store.insert(input), Err(CoreError::Validation(_))));
    }

    #[test]
    fn unknown_category_is_created_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let mut input = pork_belly();
        input.category = Some("seasonal".into());
        let listing = store.insert(input).unwrap();

        assert_eq!(store.all()["seasonal"], vec![listing]);
    }

    #[test]
    fn ids_are_unique_within_a_millisecond() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let first = store.insert(pork_belly()).unwrap();
        let second = store.insert(pork_belly()).unwrap();
        let third = store.insert(pork_belly()).unwrap();

        assert!(first.id < second.id);
        assert!(second.id < third.id);
    }

    #[test]
    fn delete_removes_first_match_and_repeat_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let listing = store.insert(pork_belly()).unwrap();

        let removed = store.delete(listing.id).unwrap();
        assert_eq!(removed, listing);
        assert!(store.all()["freshporkcuts"].is_empty());

        assert!(matches!(
            store.delete(listing.id),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_scans_every_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let mut input = pork_belly();
        input.category = Some("internationalPork".into());
        let listing = store.insert(input).unwrap();

        store.delete(listing.id).unwrap();
        assert!(store.all().values().all(Vec::is_empty));
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu-items.json");

        let mut store = CatalogStore::load(path.clone());
        let first = store.insert(pork_belly()).unwrap();
        let mut input = pork_belly();
        input.category = Some("seasonal".into());
        let second = store.insert(input).unwrap();
        let before = store.all().clone();
        drop(store);

        let reloaded = CatalogStore::load(path);
        assert_eq!(reloaded.all(), &before);
        assert_eq!(reloaded.all()["freshporkcuts"], vec![first]);
        assert_eq!(reloaded.all()["seasonal"], vec![second]);
    }

    #[test]
    fn reload_continues_id_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu-items.json");

        let mut store = CatalogStore::load(path.clone());
        let existing = store.insert(pork_belly()).unwrap();
        drop(store);

        let mut reloaded = CatalogStore::load(path);
        let fresh = reloaded.insert(pork_belly()).unwrap();
        assert!(fresh.id > existing.id);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu-items.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = CatalogStore::load(path);
        let keys: Vec<_> = store.all().keys().cloned().collect();
        assert_eq!(keys, DEFAULT_CATEGORIES);
    }

    #[test]
    fn snapshot_write_failure_does_not_fail_the_mutation() {
        let dir = tempfile::tempdir().unwrap();
        // The snapshot path is a directory, so every write fails.
        let mut store = CatalogStore::load(dir.path());

        let listing = store.insert(pork_belly()).unwrap();
        assert_eq!(store.all()["freshporkcuts"], vec![listing.clone()]);

        store.delete(listing.id).unwrap();
        assert!(store.all()["freshporkcuts"].is_empty());
    }
}
