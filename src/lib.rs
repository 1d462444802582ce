//! Xsolla Utils - image loading and theme registries for UI builders
//!
//! Two independent pieces make up the crate:
//!
//! - An asynchronous image loader that downloads each URL at most once,
//!   decodes it into a brush and keeps it in a content-addressed cache.
//!   Concurrent requests for the same URL share one download.
//! - Registry lookups for themes and widget libraries: typed name-to-value
//!   maps that answer a miss with a default value, one shared instance per
//!   registry id, and a current selection that wrappers follow.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use xsolla_utils::{config::ImageLoaderConfig, CacheKey, HttpFetcher, ImageLoader};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Arc::new(HttpFetcher::new(&ImageLoaderConfig::default())?);
//! let mut images = ImageLoader::images(fetcher);
//!
//! let brush = images.load("https://example.com/logo.png").await?;
//! println!("{} is {}x{}", brush.resource_name, brush.width, brush.height);
//!
//! let key = CacheKey::normalize("https://example.com/logo.png")?;
//! assert!(images.is_cached("https://example.com/logo.png"));
//! assert_eq!(brush.resource_name, key.as_str());
//! # Ok(())
//! # }
//! ```
//!
//! ```no_run
//! use xsolla_utils::{registry::resolve, Color, Config, Theme};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let theme = config.themes.get("default");
//!
//! // Unknown names resolve to the zero color
//! let main: Color = resolve(theme, "Main");
//! println!("Main = {}", main);
//! # let _: Option<&Theme> = theme;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`cache_key`] - Cache keys derived from resource URLs
//! - [`fetch`] - Byte fetching over HTTP and from local files
//! - [`decode`] - Turning fetched bytes into images
//! - [`loader`] - Deduplicating asynchronous loader and its cache
//! - [`registry`] - Typed lookups with defaults and per-id instances
//! - [`selection`] - Currently selected theme and widget library
//! - [`theme`] - Themes, widget libraries and theme parameters
//! - [`entity_types`] - Named slots for widget, color, font and brush types
//! - [`wrapper`] - Themeable widget slots
//! - [`context`] - Application context tying everything together
//! - [`config`] - User configuration management
//! - [`error`] - Error types and result handling

pub mod cache_key;
pub mod config;
pub mod context;
pub mod decode;
pub mod entity_types;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod registry;
pub mod selection;
pub mod theme;
pub mod types;
pub mod wrapper;

pub use cache_key::{CacheKey, CACHE_KEY_PREFIX};
pub use config::Config;
pub use context::XsollaContext;
pub use decode::{BytesDecoder, Decoder, ImageBrush, ImageDecoder};
pub use entity_types::{EntityKind, EntityTypeName, EntityTypes};
pub use error::{DecodeError, Error, LoadError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use loader::{ImageLoader, LoaderStats, ResourceLoader};
pub use registry::{lookup, resolve, Lookup, RegistryKind, RegistryResolver, RegistrySource};
pub use selection::RegistrySelection;
pub use theme::{merge_theme_parameters, Theme, ThemeParameters, WidgetsLibrary};
pub use types::{Brush, BrushDraw, Color, FontInfo, WidgetClass};
pub use wrapper::GenericWrapper;
