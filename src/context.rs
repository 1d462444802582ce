//! Application context
//!
//! [`XsollaContext`] is built once at startup and passed to whatever needs
//! images or theme values. It owns the image loader, the registry resolvers
//! and the current selection.
//!
//! # Examples
//!
//! ```no_run
//! use xsolla_utils::{Config, XsollaContext};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = XsollaContext::new(Config::load()?)?;
//!
//! println!("Main color: {}", ctx.color("Main"));
//! println!("Button class: {:?}", ctx.widget_class("Button"));
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::entity_types::{EntityKind, EntityTypes};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::loader::ImageLoader;
use crate::registry::{lookup, resolve, RegistryKind, RegistryResolver};
use crate::selection::RegistrySelection;
use crate::theme::{Theme, WidgetsLibrary};
use crate::types::{Brush, Color, FontInfo, WidgetClass};
use crate::wrapper::GenericWrapper;
use crate::Result;
use std::sync::Arc;

pub struct XsollaContext {
    config: Arc<Config>,
    selection: RegistrySelection,
    themes: RegistryResolver<Theme>,
    widgets: RegistryResolver<WidgetsLibrary>,
    widget_types: EntityTypes,
    color_types: EntityTypes,
    font_types: EntityTypes,
    brush_types: EntityTypes,
    images: ImageLoader,
}

impl XsollaContext {
    /// Context downloading images over HTTP
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config.image_loader)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        let config = Arc::new(config);
        let selection = RegistrySelection::new(
            config.ui_builder.interface_theme().map(str::to_string),
            config.ui_builder.widgets_library().map(str::to_string),
        );

        Self {
            themes: RegistryResolver::new(RegistryKind::Theme, config.clone()),
            widgets: RegistryResolver::new(RegistryKind::WidgetsLibrary, config.clone()),
            widget_types: config.ui_builder.entity_types(EntityKind::Widget),
            color_types: config.ui_builder.entity_types(EntityKind::Color),
            font_types: config.ui_builder.entity_types(EntityKind::Font),
            brush_types: config.ui_builder.entity_types(EntityKind::Brush),
            config,
            selection,
            images: ImageLoader::images(fetcher),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selection(&self) -> &RegistrySelection {
        &self.selection
    }

    /// Type slot table of one kind, built from the configuration
    pub fn entity_types(&self, kind: EntityKind) -> &EntityTypes {
        match kind {
            EntityKind::Widget => &self.widget_types,
            EntityKind::Color => &self.color_types,
            EntityKind::Font => &self.font_types,
            EntityKind::Brush => &self.brush_types,
        }
    }

    pub fn images(&mut self) -> &mut ImageLoader {
        &mut self.images
    }

    pub fn current_theme(&self) -> Option<Arc<Theme>> {
        self.themes.current(&self.selection)
    }

    pub fn theme(&self, id: Option<&str>) -> Option<Arc<Theme>> {
        self.themes.get(id)
    }

    pub fn current_widgets_library(&self) -> Option<Arc<WidgetsLibrary>> {
        self.widgets.current(&self.selection)
    }

    pub fn widgets_library(&self, id: Option<&str>) -> Option<Arc<WidgetsLibrary>> {
        self.widgets.get(id)
    }

    pub fn theme_ids(&self) -> Vec<String> {
        self.themes.available()
    }

    pub fn widgets_library_ids(&self) -> Vec<String> {
        self.widgets.available()
    }

    /// Switch the current theme; bound wrappers observe the change.
    pub fn update_theme(&self, id: Option<&str>) {
        self.selection.update_theme(id.map(str::to_string));
    }

    pub fn update_widgets_library(&self, id: Option<&str>) {
        self.selection.update_widgets_library(id.map(str::to_string));
    }

    /// Color of the current theme, zero color on a miss
    pub fn color(&self, name: &str) -> Color {
        resolve(self.current_theme().as_deref(), name)
    }

    pub fn font(&self, name: &str) -> FontInfo {
        resolve(self.current_theme().as_deref(), name)
    }

    pub fn brush(&self, name: &str) -> Brush {
        resolve(self.current_theme().as_deref(), name)
    }

    /// Widget class of the current library, `None` on a miss
    pub fn widget_class(&self, widget_type: &str) -> Option<WidgetClass> {
        lookup(self.current_widgets_library().as_deref(), widget_type)
    }

    /// Color of the current theme for a color type slot, `None` when not found
    pub fn color_by_type(&self, slot: u8) -> Option<Color> {
        self.current_theme()?.color_by_type(&self.color_types, slot)
    }

    pub fn font_by_type(&self, slot: u8) -> Option<FontInfo> {
        self.current_theme()?.font_by_type(&self.font_types, slot)
    }

    pub fn brush_by_type(&self, slot: u8) -> Option<Brush> {
        self.current_theme()?.brush_by_type(&self.brush_types, slot)
    }

    pub fn widget_class_by_type(&self, slot: u8) -> Option<WidgetClass> {
        self.current_widgets_library()?.widget_by_type(&self.widget_types, slot)
    }

    /// Class the wrapper instantiates under the current widgets library
    pub fn wrapper_widget_class(&self, wrapper: &GenericWrapper) -> Option<WidgetClass> {
        wrapper.widget_class_by_type(
            self.current_widgets_library().as_deref(),
            &self.widget_types,
        )
    }
}
