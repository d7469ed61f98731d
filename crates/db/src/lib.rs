//! File-backed document store for the anime catalog.
//!
//! Each entity kind lives in one JSON file under a data directory. The
//! [`Catalog`] wires one [`CollectionStore`] per kind into the entity
//! services that enforce references between them.

pub mod collection;
pub mod error;
pub mod integrity;
pub mod models;
pub mod services;
pub mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use error::{DbError, DbResult};
pub use store::{CollectionStore, IdStrategy, WriteStrategy};

use models::anime::Anime;
use models::character::Character;
use models::director::Director;
use models::studio::Studio;
use models::Record;
use services::{AnimeService, CharacterService, DirectorService, StudioService};

pub const ANIMES_FILE: &str = "animes.json";
pub const STUDIOS_FILE: &str = "studios.json";
pub const DIRECTORS_FILE: &str = "directors.json";
pub const CHARACTERS_FILE: &str = "characters.json";

/// Store-wide options applied to every collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    pub write_strategy: WriteStrategy,
    pub id_strategy: IdStrategy,
}

/// The four collections of the catalog and their services.
///
/// Backing paths are fixed at construction for the life of the process.
pub struct Catalog {
    pub animes: AnimeService,
    pub studios: StudioService,
    pub directors: DirectorService,
    pub characters: CharacterService,
    data_dir: PathBuf,
    anime_store: Arc<CollectionStore<Anime>>,
    studio_store: Arc<CollectionStore<Studio>>,
    director_store: Arc<CollectionStore<Director>>,
    character_store: Arc<CollectionStore<Character>>,
}

impl Catalog {
    /// Build a catalog over `data_dir`. No I/O happens until first use.
    pub fn open(data_dir: impl Into<PathBuf>, options: StoreOptions) -> Self {
        let data_dir = data_dir.into();
        let anime_store = Arc::new(store_at(&data_dir, ANIMES_FILE, options));
        let studio_store = Arc::new(store_at(&data_dir, STUDIOS_FILE, options));
        let director_store = Arc::new(store_at(&data_dir, DIRECTORS_FILE, options));
        let character_store = Arc::new(store_at(&data_dir, CHARACTERS_FILE, options));

        Self {
            animes: AnimeService::new(Arc::clone(&anime_store), Arc::clone(&studio_store)),
            studios: StudioService::new(Arc::clone(&studio_store)),
            directors: DirectorService::new(Arc::clone(&director_store)),
            characters: CharacterService::new(
                Arc::clone(&character_store),
                Arc::clone(&anime_store),
            ),
            data_dir,
            anime_store,
            studio_store,
            director_store,
            character_store,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create any missing backing file as an empty collection.
    pub async fn bootstrap(&self) -> DbResult<()> {
        self.anime_store.collection().ensure_exists().await?;
        self.studio_store.collection().ensure_exists().await?;
        self.director_store.collection().ensure_exists().await?;
        self.character_store.collection().ensure_exists().await?;
        Ok(())
    }

    /// Verify that every backing file can be read and parsed.
    pub async fn health_check(&self) -> DbResult<()> {
        check_readable(&self.anime_store).await?;
        check_readable(&self.studio_store).await?;
        check_readable(&self.director_store).await?;
        check_readable(&self.character_store).await?;
        Ok(())
    }
}

fn store_at<T: Record>(data_dir: &Path, file: &str, options: StoreOptions) -> CollectionStore<T> {
    CollectionStore::new(data_dir.join(file))
        .with_write_strategy(options.write_strategy)
        .with_id_strategy(options.id_strategy)
}

async fn check_readable<T: Record>(store: &CollectionStore<T>) -> DbResult<()> {
    store.list().await.map(|_| ())
}
