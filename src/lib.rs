//! Recipe browser: search, filter, sort and favorite a fixed recipe catalog.
//!
//! The visible list is derived by [`visible_recipes`] (search, then filter,
//! then sort) and shown on a [`RenderSurface`] by [`RecipeBrowser`].
//!
//! # Example
//! ```
//! use recipe_browser::{Catalog, FavoritesStore, Filter, HtmlSurface, MemoryStore, RecipeBrowser};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let favorites = FavoritesStore::new(Box::new(MemoryStore::new()), "recipeFavorites");
//! let mut browser = RecipeBrowser::new(Catalog::builtin()?, favorites, HtmlSurface::new());
//! browser.init().await;
//!
//! browser.set_filter(Filter::Quick);
//! assert_eq!(browser.surface().counter(), "Showing 3 of 8 recipes");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod events;
pub mod favorites;
pub mod model;
pub mod query;
pub mod render;
pub mod state;

pub use catalog::Catalog;
pub use config::BrowserConfig;
pub use debounce::Debouncer;
pub use display::{DisplayFrame, HtmlSurface, RecipeBrowser, RenderSurface, TerminalSurface};
pub use error::BrowserError;
pub use events::{parse_command, run_event_loop, UiEvent};
pub use favorites::{Favorites, FavoritesStore, FileStore, KeyValueStore, MemoryStore};
pub use model::{Difficulty, Recipe, Step};
pub use query::{apply_filter, apply_search, apply_sort, visible_recipes, Filter, FilterContext, SortOrder};
pub use render::Section;
pub use state::AppState;

use log::warn;

/// Load the catalog named by the configuration, or the built-in one
pub async fn load_catalog(config: &BrowserConfig) -> Result<Catalog, BrowserError> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path).await,
        None => Catalog::builtin(),
    }
}

/// Build a browser over a file-backed favorites store as configured
pub async fn browser_from_config<S: RenderSurface>(
    config: &BrowserConfig,
    surface: S,
) -> Result<RecipeBrowser<S>, BrowserError> {
    let catalog = load_catalog(config).await?;
    if catalog.is_empty() {
        warn!("Catalog is empty; nothing will be shown");
    }
    let favorites = FavoritesStore::new(
        Box::new(FileStore::new(&config.favorites_path)),
        config.favorites_key.clone(),
    );
    Ok(RecipeBrowser::new(catalog, favorites, surface).with_quick_max_minutes(config.quick_max_minutes))
}
