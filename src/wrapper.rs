//! Themeable widget slot
//!
//! A [`GenericWrapper`] stands for one widget placed in a layout: it knows
//! which widget type it wants, may force a specific widget class or theme,
//! and carries the theme parameters its content resolves colors, fonts and
//! brushes through.

use crate::context::XsollaContext;
use crate::entity_types::EntityTypes;
use crate::theme::{Theme, ThemeParameters, WidgetsLibrary};
use crate::types::WidgetClass;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Default)]
pub struct GenericWrapper {
    /// Widget type name looked up in the widgets library
    pub widget_type: String,

    /// Widget type slot; takes precedence over `widget_type` when set
    pub widget_slot: Option<u8>,

    /// Class used instead of the library lookup when set
    pub override_widget: Option<WidgetClass>,

    /// Use `theme` instead of the current theme
    pub override_default_theme: bool,

    pub theme: Option<String>,

    pub parameters: ThemeParameters,

    theme_changes: Option<watch::Receiver<Option<String>>>,
}

impl GenericWrapper {
    pub fn new(widget_type: &str) -> Self {
        Self {
            widget_type: widget_type.to_string(),
            ..Default::default()
        }
    }

    /// Slot whose configured widget type name this wrapper resolves
    pub fn for_slot(slot: u8) -> Self {
        Self {
            widget_slot: Some(slot),
            ..Default::default()
        }
    }

    pub fn with_override_widget(mut self, class: WidgetClass) -> Self {
        self.override_widget = Some(class);
        self
    }

    pub fn with_theme(mut self, theme: &str) -> Self {
        self.override_default_theme = true;
        self.theme = Some(theme.to_string());
        self
    }

    pub fn with_parameters(mut self, parameters: ThemeParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Class to instantiate for this slot.
    ///
    /// The override wins; otherwise the library decides, and no library means
    /// no class.
    pub fn widget_class(&self, library: Option<&WidgetsLibrary>) -> Option<WidgetClass> {
        if let Some(class) = &self.override_widget {
            return Some(class.clone());
        }
        library?.widget(&self.widget_type)
    }

    /// Like [`widget_class`](Self::widget_class), resolving the widget slot
    /// through `types` when one is set.
    pub fn widget_class_by_type(
        &self,
        library: Option<&WidgetsLibrary>,
        types: &EntityTypes,
    ) -> Option<WidgetClass> {
        match self.widget_slot {
            Some(slot) if self.override_widget.is_none() => library?.widget_by_type(types, slot),
            _ => self.widget_class(library),
        }
    }

    /// Theme this slot renders with
    pub fn effective_theme(&self, ctx: &XsollaContext) -> Option<Arc<Theme>> {
        if self.override_default_theme {
            return ctx.theme(self.theme.as_deref());
        }
        ctx.current_theme()
    }

    pub fn update_theme_parameters(&mut self, incoming: &ThemeParameters) {
        self.parameters.update(incoming);
    }

    /// Start following the context's theme selection.
    pub fn bind(&mut self, ctx: &XsollaContext) {
        self.theme_changes = Some(ctx.selection().subscribe_theme());
    }

    /// Whether the selected theme changed since the last call.
    ///
    /// Always false for unbound wrappers.
    pub fn take_theme_change(&mut self) -> bool {
        let Some(rx) = self.theme_changes.as_mut() else {
            return false;
        };

        match rx.has_changed() {
            Ok(true) => {
                rx.borrow_and_update();
                true
            }
            _ => false,
        }
    }
}
