//! User and project configuration management
//!
//! Configuration is stored in TOML format at `~/.xsolla-utils/config.toml`.
//! It selects the current theme and widgets library, defines the themes and
//! libraries themselves, names the entity type slots, and tunes the image
//! loader.
//!
//! # Examples
//!
//! ```no_run
//! use xsolla_utils::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::load()?;
//!
//! println!("Current theme: {:?}", config.ui_builder.interface_theme());
//! println!("Image timeout: {}s", config.image_loader.timeout_seconds);
//!
//! config.set("ui_builder.interface_theme", "default")?;
//! config.save()?;
//! # Ok(())
//! # }
//! ```

use crate::entity_types::{
    default_brush_types, default_color_types, default_font_types, default_widget_types,
    EntityKind, EntityTypeName, EntityTypes,
};
use crate::registry::RegistrySource;
use crate::theme::{Theme, WidgetsLibrary};
use crate::types::{Brush, BrushDraw, Color, FontInfo, WidgetClass};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Id of the theme and widgets library shipped in the default configuration
pub const DEFAULT_REGISTRY_ID: &str = "default";

/// User configuration file (`~/.xsolla-utils/config.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Image loader settings
    #[serde(default)]
    pub image_loader: ImageLoaderConfig,

    /// Theme and widget selection, entity type names
    #[serde(default)]
    pub ui_builder: UiBuilderConfig,

    /// Theme definitions keyed by id
    #[serde(default = "default_themes")]
    pub themes: BTreeMap<String, Theme>,

    /// Widgets library definitions keyed by id
    #[serde(default = "default_widget_libraries")]
    pub widget_libraries: BTreeMap<String, WidgetsLibrary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLoaderConfig {
    /// Request timeout in seconds (0 = no timeout)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with image requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("xsolla-utils/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiBuilderConfig {
    /// Id of the current interface theme, empty for none
    #[serde(default = "default_registry_id")]
    pub interface_theme: String,

    /// Id of the current widgets library, empty for none
    #[serde(default = "default_registry_id")]
    pub widgets_library: String,

    #[serde(default = "default_widget_types")]
    pub widget_types: Vec<EntityTypeName>,

    #[serde(default = "default_color_types")]
    pub color_types: Vec<EntityTypeName>,

    #[serde(default = "default_font_types")]
    pub font_types: Vec<EntityTypeName>,

    #[serde(default = "default_brush_types")]
    pub brush_types: Vec<EntityTypeName>,
}

fn default_registry_id() -> String {
    DEFAULT_REGISTRY_ID.to_string()
}

impl Default for UiBuilderConfig {
    fn default() -> Self {
        Self {
            interface_theme: default_registry_id(),
            widgets_library: default_registry_id(),
            widget_types: default_widget_types(),
            color_types: default_color_types(),
            font_types: default_font_types(),
            brush_types: default_brush_types(),
        }
    }
}

impl UiBuilderConfig {
    pub fn interface_theme(&self) -> Option<&str> {
        Some(self.interface_theme.as_str()).filter(|id| !id.is_empty())
    }

    pub fn widgets_library(&self) -> Option<&str> {
        Some(self.widgets_library.as_str()).filter(|id| !id.is_empty())
    }

    pub fn entity_types(&self, kind: EntityKind) -> EntityTypes {
        let entries = match kind {
            EntityKind::Widget => &self.widget_types,
            EntityKind::Color => &self.color_types,
            EntityKind::Font => &self.font_types,
            EntityKind::Brush => &self.brush_types,
        };
        EntityTypes::new(kind, entries)
    }
}

fn default_theme() -> Theme {
    let mut theme = Theme::default();

    for (name, color) in [
        ("Transparent", Color::TRANSPARENT),
        ("Main", Color::rgb(0x1C, 0x1E, 0x24)),
        ("Accent", Color::rgb(0xFF, 0x00, 0x5B)),
        ("Inactive", Color::rgb(0x8A, 0x8B, 0x91)),
        ("Inactive2", Color::rgb(0x45, 0x47, 0x4D)),
        ("AccentDull", Color::rgb(0xA6, 0x00, 0x3B)),
        ("Darkening", Color::rgba(0x00, 0x00, 0x00, 0x99)),
        ("Inactive3", Color::rgb(0x2E, 0x30, 0x36)),
    ] {
        theme.colors.insert(name.to_string(), color);
    }

    theme
        .fonts
        .insert("MainBold".to_string(), FontInfo::new("Roboto", "Bold", 16));
    theme
        .fonts
        .insert("MainRegular".to_string(), FontInfo::new("Roboto", "Regular", 16));

    for (state, color) in [
        ("Initial", Color::rgb(0xFF, 0x00, 0x5B)),
        ("Hover", Color::rgb(0xFF, 0x33, 0x7C)),
        ("Pressed", Color::rgb(0xA6, 0x00, 0x3B)),
        ("Disabled", Color::rgb(0x45, 0x47, 0x4D)),
    ] {
        theme.brushes.insert(
            format!("MainButton{}", state),
            Brush {
                draw: BrushDraw::RoundedBox,
                tint: color,
                corner_radius: 4,
                ..Default::default()
            },
        );
    }

    theme
}

fn default_themes() -> BTreeMap<String, Theme> {
    BTreeMap::from([(DEFAULT_REGISTRY_ID.to_string(), default_theme())])
}

fn default_widget_libraries() -> BTreeMap<String, WidgetsLibrary> {
    let widgets = default_widget_types()
        .into_iter()
        .map(|t| {
            let class = WidgetClass(format!("W_{}", t.name));
            (t.name, class)
        })
        .collect();

    BTreeMap::from([(
        DEFAULT_REGISTRY_ID.to_string(),
        WidgetsLibrary {
            id: String::new(),
            widgets,
        },
    )])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_loader: ImageLoaderConfig::default(),
            ui_builder: UiBuilderConfig::default(),
            themes: default_themes(),
            widget_libraries: default_widget_libraries(),
        }
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// Uses XSOLLA_UTILS_CONFIG_DIR if set, otherwise ~/.xsolla-utils/config.toml
    pub fn default_path() -> Result<PathBuf> {
        // Check for custom config directory (useful for testing)
        if let Ok(config_dir) = std::env::var("XSOLLA_UTILS_CONFIG_DIR") {
            return Ok(PathBuf::from(config_dir).join("config.toml"));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not find home directory".to_string()))?;

        Ok(home.join(".xsolla-utils").join("config.toml"))
    }

    /// Load config from the default path, or defaults if it doesn't exist
    ///
    /// Environment variable overrides:
    /// - `XSOLLA_UTILS_THEME`: Overrides `ui_builder.interface_theme`
    /// - `XSOLLA_UTILS_CONFIG_DIR`: Overrides the config directory location
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Self::default_path()?)?;

        if let Ok(theme) = std::env::var("XSOLLA_UTILS_THEME") {
            if !theme.is_empty() {
                config.ui_builder.interface_theme = theme;
            }
        }

        Ok(config)
    }

    /// Load config from an explicit path, or defaults if it doesn't exist
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject selections that point at undefined themes or libraries
    pub fn validate(&self) -> Result<()> {
        if let Some(theme) = self.ui_builder.interface_theme() {
            if !self.themes.contains_key(theme) {
                return Err(Error::InvalidConfig(format!(
                    "ui_builder.interface_theme refers to unknown theme '{}' (available: {})",
                    theme,
                    join_keys(&self.themes)
                )));
            }
        }

        if let Some(library) = self.ui_builder.widgets_library() {
            if !self.widget_libraries.contains_key(library) {
                return Err(Error::InvalidConfig(format!(
                    "ui_builder.widgets_library refers to unknown library '{}' (available: {})",
                    library,
                    join_keys(&self.widget_libraries)
                )));
            }
        }

        Ok(())
    }

    /// Set a value by dotted key, as used by `xsolla-utils config set`
    ///
    /// An empty value clears a theme or library selection.
    /// The configuration is left untouched when the result would not validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();

        match key {
            "ui_builder.interface_theme" => {
                updated.ui_builder.interface_theme = value.to_string()
            }
            "ui_builder.widgets_library" => {
                updated.ui_builder.widgets_library = value.to_string()
            }
            "image_loader.timeout_seconds" => {
                updated.image_loader.timeout_seconds = value.parse().map_err(|_| {
                    Error::InvalidConfig(format!("'{}' is not a number of seconds", value))
                })?
            }
            "image_loader.user_agent" => updated.image_loader.user_agent = value.to_string(),
            _ => {
                return Err(Error::InvalidConfig(format!(
                    "Unknown configuration key '{}'\n\n\
                     Supported keys:\n\
                     - ui_builder.interface_theme\n\
                     - ui_builder.widgets_library\n\
                     - image_loader.timeout_seconds\n\
                     - image_loader.user_agent",
                    key
                )))
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn join_keys<V>(map: &BTreeMap<String, V>) -> String {
    map.keys().cloned().collect::<Vec<_>>().join(", ")
}

impl RegistrySource<Theme> for Config {
    fn build(&self, id: &str) -> Option<Theme> {
        let mut theme = self.themes.get(id)?.clone();
        theme.id = id.to_string();
        Some(theme)
    }

    fn ids(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }
}

impl RegistrySource<WidgetsLibrary> for Config {
    fn build(&self, id: &str) -> Option<WidgetsLibrary> {
        let mut library = self.widget_libraries.get(id)?.clone();
        library.id = id.to_string();
        Some(library)
    }

    fn ids(&self) -> Vec<String> {
        self.widget_libraries.keys().cloned().collect()
    }
}
