//! Named type slots for widgets, colors, fonts and brushes
//!
//! Themes and widget libraries are keyed by type names. The set of names is
//! project configuration: each kind has up to [`MAX_SLOT`] numbered slots, and
//! a project gives a slot a display name (slot 1 of the widget kind is
//! `Button` by default). Slot 0 is reserved for "default".

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Highest usable slot number
pub const MAX_SLOT: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Widget,
    Color,
    Font,
    Brush,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Widget,
        EntityKind::Color,
        EntityKind::Font,
        EntityKind::Brush,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Widget => "widget",
            EntityKind::Color => "color",
            EntityKind::Font => "font",
            EntityKind::Brush => "brush",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeName {
    pub slot: u8,
    pub name: String,
}

impl EntityTypeName {
    pub fn new(slot: u8, name: &str) -> Self {
        Self {
            slot,
            name: name.to_string(),
        }
    }
}

/// Slot/name table for one entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypes {
    kind: EntityKind,
    names: Vec<Option<String>>,
}

impl EntityTypes {
    /// Build the table, skipping entries with a slot outside `1..=MAX_SLOT`.
    ///
    /// When two entries claim the same slot the later one wins.
    pub fn new(kind: EntityKind, entries: &[EntityTypeName]) -> Self {
        let mut names = vec![None; MAX_SLOT as usize + 1];

        for entry in entries {
            if entry.slot == 0 || entry.slot > MAX_SLOT {
                warn!(
                    kind = %kind,
                    slot = entry.slot,
                    name = %entry.name,
                    "ignoring type name with an out-of-range slot"
                );
                continue;
            }
            names[entry.slot as usize] = Some(entry.name.clone());
        }

        Self { kind, names }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name_of(&self, slot: u8) -> Option<&str> {
        self.names.get(slot as usize)?.as_deref()
    }

    pub fn slot_of(&self, name: &str) -> Option<u8> {
        self.names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .map(|slot| slot as u8)
    }

    /// Entry name for `slot`, provided this table is of the expected kind.
    ///
    /// Passing a table of another kind is a caller mistake and finds nothing.
    pub fn name_for(&self, kind: EntityKind, slot: u8) -> Option<&str> {
        if self.kind != kind {
            warn!(
                expected = %kind,
                actual = %self.kind,
                slot,
                "type slot looked up in a table of another kind"
            );
            return None;
        }
        self.name_of(slot)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slot_of(name).is_some()
    }

    /// Named slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(slot, name)| name.as_deref().map(|n| (slot as u8, n)))
    }
}

fn named(names: &[&str]) -> Vec<EntityTypeName> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| EntityTypeName::new(i as u8 + 1, name))
        .collect()
}

pub fn default_widget_types() -> Vec<EntityTypeName> {
    named(&[
        "Button",
        "ButtonCounter",
        "IconTextButton",
        "ButtonToggle",
        "SmallIconButton",
        "ButtonMenuMain",
        "ButtonIconStates",
        "Link",
        "Checkbox",
        "Image",
        "Icon",
        "Input",
        "InputSearch",
        "EditableText",
        "Text",
        "RichText",
        "InputExecute",
    ])
}

pub fn default_color_types() -> Vec<EntityTypeName> {
    named(&[
        "Transparent",
        "Main",
        "Accent",
        "Inactive",
        "Inactive2",
        "AccentDull",
        "Darkening",
        "Inactive3",
    ])
}

pub fn default_font_types() -> Vec<EntityTypeName> {
    named(&["MainBold", "MainRegular"])
}

pub fn default_brush_types() -> Vec<EntityTypeName> {
    named(&[
        "MainButtonInitial",
        "MainButtonHover",
        "MainButtonPressed",
        "MainButtonDisabled",
        "NormalButtonInitial",
        "NormalButtonHover",
        "NormalButtonPressed",
        "NormalButtonDisabled",
        "IconButtonInitial",
        "IconButtonHover",
        "IconButtonPressed",
        "IconButtonDisabled",
        "CheckBoxUncheckedInitial",
        "CheckBoxUncheckedHover",
        "CheckBoxUncheckedPressed",
        "CheckBoxCheckedInitial",
        "CheckBoxCheckedHover",
        "CheckBoxCheckedPressed",
        "PopupMenuButtonClosedInitial",
        "PopupMenuButtonClosedHover",
        "PopupMenuButtonClosedPressed",
        "PopupMenuButtonClosedDisabled",
        "PopupMenuButtonOpenedInitial",
        "PopupMenuButtonOpenedHover",
        "PopupMenuButtonOpenedPressed",
        "PopupMenuButtonOpenedDisabled",
        "InputInitial",
        "InputHover",
        "InputActive",
        "InputDisabled",
    ])
}
