//! Themes, widget libraries and per-widget theme parameters
//!
//! A [`Theme`] binds color, font and brush names to values; a
//! [`WidgetsLibrary`] binds widget type names to widget classes. Both are
//! plain data, immutable once built, and plug into [`crate::registry`]
//! through [`Lookup`].

use crate::entity_types::{EntityKind, EntityTypes};
use crate::registry::{lookup, resolve, Lookup};
use crate::types::{Brush, Color, FontInfo, WidgetClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Registry id, filled in when the theme is built from configuration
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub colors: BTreeMap<String, Color>,

    #[serde(default)]
    pub fonts: BTreeMap<String, FontInfo>,

    #[serde(default)]
    pub brushes: BTreeMap<String, Brush>,
}

impl Theme {
    pub fn color(&self, name: &str) -> Color {
        resolve(Some(self), name)
    }

    pub fn font(&self, name: &str) -> FontInfo {
        resolve(Some(self), name)
    }

    pub fn brush(&self, name: &str) -> Brush {
        resolve(Some(self), name)
    }

    /// Brush lookup that also reports whether the brush exists
    pub fn find_brush(&self, name: &str) -> Option<&Brush> {
        self.brushes.get(name)
    }

    /// Color bound to the color type in `slot`.
    ///
    /// `None` when the slot has no name in `types` or the theme does not
    /// define that name.
    pub fn color_by_type(&self, types: &EntityTypes, slot: u8) -> Option<Color> {
        let name = types.name_for(EntityKind::Color, slot)?;
        self.colors.get(name).copied()
    }

    pub fn font_by_type(&self, types: &EntityTypes, slot: u8) -> Option<FontInfo> {
        let name = types.name_for(EntityKind::Font, slot)?;
        self.fonts.get(name).cloned()
    }

    pub fn brush_by_type(&self, types: &EntityTypes, slot: u8) -> Option<Brush> {
        let name = types.name_for(EntityKind::Brush, slot)?;
        self.brushes.get(name).cloned()
    }
}

impl Lookup<str, Color> for Theme {
    fn try_get(&self, key: &str) -> Option<&Color> {
        self.colors.get(key)
    }
}

impl Lookup<str, FontInfo> for Theme {
    fn try_get(&self, key: &str) -> Option<&FontInfo> {
        self.fonts.get(key)
    }
}

impl Lookup<str, Brush> for Theme {
    fn try_get(&self, key: &str) -> Option<&Brush> {
        self.brushes.get(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetsLibrary {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub widgets: BTreeMap<String, WidgetClass>,
}

impl WidgetsLibrary {
    /// Widget class bound to `widget_type`, `None` when unbound
    pub fn widget(&self, widget_type: &str) -> Option<WidgetClass> {
        lookup(Some(self), widget_type)
    }

    /// Widget class bound to the widget type in `slot`
    pub fn widget_by_type(&self, types: &EntityTypes, slot: u8) -> Option<WidgetClass> {
        self.widget(types.name_for(EntityKind::Widget, slot)?)
    }
}

impl Lookup<str, WidgetClass> for WidgetsLibrary {
    fn try_get(&self, key: &str) -> Option<&WidgetClass> {
        self.widgets.get(key)
    }
}

/// Theme entries a widget uses, keyed by the widget's own parameter names.
///
/// Each value names an entry of the theme, e.g. `Background -> "Main"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeParameters {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,

    #[serde(default)]
    pub fonts: BTreeMap<String, String>,

    #[serde(default)]
    pub brushes: BTreeMap<String, String>,
}

impl ThemeParameters {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.fonts.is_empty() && self.brushes.is_empty()
    }

    pub fn clear(&mut self) {
        self.colors.clear();
        self.fonts.clear();
        self.brushes.clear();
    }

    /// True when every key of `other` is already present here
    pub fn covers(&self, other: &ThemeParameters) -> bool {
        other.colors.keys().all(|k| self.colors.contains_key(k))
            && other.fonts.keys().all(|k| self.fonts.contains_key(k))
            && other.brushes.keys().all(|k| self.brushes.contains_key(k))
    }

    /// Apply `incoming` following [`merge_theme_parameters`].
    pub fn update(&mut self, incoming: &ThemeParameters) {
        if incoming.is_empty() {
            self.clear();
        } else if self.is_empty() || !self.covers(incoming) {
            *self = incoming.clone();
        }
    }

    /// Resolve the color bound to parameter `name` through `theme`
    pub fn color(&self, theme: Option<&Theme>, name: &str) -> Color {
        match self.colors.get(name) {
            Some(entry) => resolve(theme, entry.as_str()),
            None => Color::default(),
        }
    }

    pub fn font(&self, theme: Option<&Theme>, name: &str) -> FontInfo {
        match self.fonts.get(name) {
            Some(entry) => resolve(theme, entry.as_str()),
            None => FontInfo::default(),
        }
    }

    pub fn brush(&self, theme: Option<&Theme>, name: &str) -> Brush {
        match self.brushes.get(name) {
            Some(entry) => resolve(theme, entry.as_str()),
            None => Brush::default(),
        }
    }
}

/// Combine a widget's parameters with an incoming set.
///
/// - incoming empty: the result is empty
/// - current empty: the result is `incoming`
/// - every incoming key already in `current`: `current` is kept as is
/// - otherwise: `incoming` replaces `current` entirely, no per-key merge
pub fn merge_theme_parameters(
    current: &ThemeParameters,
    incoming: &ThemeParameters,
) -> ThemeParameters {
    let mut merged = current.clone();
    merged.update(incoming);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(colors: &[(&str, &str)]) -> ThemeParameters {
        ThemeParameters {
            colors: colors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    fn theme() -> Theme {
        let mut theme = Theme::default();
        theme.colors.insert("Main".to_string(), Color::rgb(1, 2, 3));
        theme
            .fonts
            .insert("MainBold".to_string(), FontInfo::new("Roboto", "Bold", 14));
        theme
    }

    #[test]
    fn test_theme_lookup_with_defaults() {
        let theme = theme();
        assert_eq!(theme.color("Main"), Color::rgb(1, 2, 3));
        assert_eq!(theme.color("Accent"), Color::default());
        assert_eq!(theme.font("MainBold").size, 14);
        assert!(theme.font("MainRegular").is_empty());
        assert_eq!(theme.brush("Anything"), Brush::default());
        assert!(theme.find_brush("Anything").is_none());
    }

    #[test]
    fn test_resolve_without_theme() {
        assert_eq!(resolve::<Theme, str, Color>(None, "Main"), Color::default());
        assert_eq!(
            resolve::<Theme, str, FontInfo>(None, "MainBold"),
            FontInfo::default()
        );
    }

    #[test]
    fn test_widgets_library_miss_is_none() {
        let mut library = WidgetsLibrary::default();
        library
            .widgets
            .insert("Button".to_string(), WidgetClass::new("WBP_Button"));

        assert_eq!(library.widget("Button"), Some(WidgetClass::new("WBP_Button")));
        assert_eq!(library.widget("Checkbox"), None);
        assert_eq!(lookup::<WidgetsLibrary, str, WidgetClass>(None, "Button"), None);
    }

    #[test]
    fn test_lookup_by_type_slot() {
        use crate::entity_types::{default_color_types, default_font_types, EntityTypeName};

        let theme = theme();
        let colors = EntityTypes::new(EntityKind::Color, &default_color_types());
        let fonts = EntityTypes::new(EntityKind::Font, &default_font_types());

        // Slot 2 is "Main", slot 3 "Accent" which this theme lacks
        assert_eq!(theme.color_by_type(&colors, 2), Some(Color::rgb(1, 2, 3)));
        assert_eq!(theme.color_by_type(&colors, 3), None);
        assert_eq!(theme.color_by_type(&colors, 0), None);
        assert_eq!(theme.color_by_type(&colors, 31), None);
        assert_eq!(theme.font_by_type(&fonts, 1).unwrap().size, 14);
        assert_eq!(theme.brush_by_type(&fonts, 1), None);

        let mut renamed = default_color_types();
        renamed.push(EntityTypeName::new(2, "Primary"));
        let renamed = EntityTypes::new(EntityKind::Color, &renamed);
        assert_eq!(theme.color_by_type(&renamed, 2), None);
    }

    #[test]
    fn test_widget_by_type_slot() {
        use crate::entity_types::{default_widget_types, EntityTypeName};

        let mut library = WidgetsLibrary::default();
        library
            .widgets
            .insert("Checkbox".to_string(), WidgetClass::new("WBP_Checkbox"));
        let widgets = EntityTypes::new(EntityKind::Widget, &default_widget_types());

        assert_eq!(
            library.widget_by_type(&widgets, 9),
            Some(WidgetClass::new("WBP_Checkbox"))
        );
        assert_eq!(library.widget_by_type(&widgets, 1), None);
        assert_eq!(library.widget_by_type(&widgets, 40), None);

        let renamed = EntityTypes::new(EntityKind::Widget, &[EntityTypeName::new(1, "Checkbox")]);
        assert_eq!(
            library.widget_by_type(&renamed, 1),
            Some(WidgetClass::new("WBP_Checkbox"))
        );
    }

    #[test]
    fn test_merge_into_empty_adopts_incoming() {
        let incoming = params(&[("a", "1")]);
        assert_eq!(merge_theme_parameters(&ThemeParameters::default(), &incoming), incoming);
    }

    #[test]
    fn test_merge_empty_incoming_clears() {
        let current = params(&[("a", "1")]);
        assert!(merge_theme_parameters(&current, &ThemeParameters::default()).is_empty());
    }

    #[test]
    fn test_merge_new_key_replaces_wholesale() {
        let current = params(&[("a", "1")]);
        let incoming = params(&[("a", "1"), ("b", "2")]);
        assert_eq!(merge_theme_parameters(&current, &incoming), incoming);
    }

    #[test]
    fn test_merge_known_keys_keep_current() {
        let current = params(&[("a", "1"), ("b", "2")]);
        let incoming = params(&[("a", "1")]);
        assert_eq!(merge_theme_parameters(&current, &incoming), current);
    }

    #[test]
    fn test_merge_does_not_take_new_values_for_known_keys() {
        let current = params(&[("a", "1"), ("b", "2")]);
        let incoming = params(&[("a", "9")]);
        assert_eq!(merge_theme_parameters(&current, &incoming), current);
    }

    #[test]
    fn test_merge_checks_every_map() {
        let current = params(&[("a", "1")]);
        let mut incoming = params(&[("a", "1")]);
        incoming
            .brushes
            .insert("Background".to_string(), "MainButtonInitial".to_string());

        // "a" is known, but the brush key is not: everything is replaced
        let merged = merge_theme_parameters(&current, &incoming);
        assert_eq!(merged, incoming);
    }

    #[test]
    fn test_parameters_resolve_through_theme() {
        let theme = theme();
        let parameters = params(&[("Background", "Main"), ("Border", "Missing")]);

        assert_eq!(parameters.color(Some(&theme), "Background"), Color::rgb(1, 2, 3));
        assert_eq!(parameters.color(Some(&theme), "Border"), Color::default());
        assert_eq!(parameters.color(Some(&theme), "Unknown"), Color::default());
        assert_eq!(parameters.color(None, "Background"), Color::default());
    }
}
