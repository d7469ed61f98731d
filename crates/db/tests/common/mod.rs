use std::path::Path;

use anidex_db::{Catalog, StoreOptions};
use tempfile::TempDir;

/// A catalog over a fresh temporary data directory, with every backing
/// file seeded from `(file, json)` pairs and the rest created empty.
pub async fn seeded_catalog(options: StoreOptions, seeds: &[(&str, &str)]) -> (TempDir, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    for (file, json) in seeds {
        std::fs::write(dir.path().join(file), json).unwrap();
    }
    let catalog = Catalog::open(dir.path(), options);
    catalog.bootstrap().await.unwrap();
    (dir, catalog)
}

pub fn read(dir: &Path, file: &str) -> String {
    std::fs::read_to_string(dir.join(file)).unwrap()
}
