//! Which theme and widgets library are current
//!
//! The selection is the only mutable piece of the registry layer. It is
//! seeded from configuration and may be changed at runtime; widgets that care
//! subscribe and re-resolve when it changes.

use tokio::sync::watch;
use tracing::info;

pub struct RegistrySelection {
    theme: watch::Sender<Option<String>>,
    widgets_library: watch::Sender<Option<String>>,
}

impl RegistrySelection {
    pub fn new(theme: Option<String>, widgets_library: Option<String>) -> Self {
        let (theme, _) = watch::channel(theme);
        let (widgets_library, _) = watch::channel(widgets_library);

        Self {
            theme,
            widgets_library,
        }
    }

    pub fn theme_id(&self) -> Option<String> {
        self.theme.borrow().clone()
    }

    pub fn widgets_library_id(&self) -> Option<String> {
        self.widgets_library.borrow().clone()
    }

    /// Switch the current theme and notify subscribers.
    pub fn update_theme(&self, theme: Option<String>) {
        info!(theme = ?theme, "interface theme changed");
        self.theme.send_replace(theme);
    }

    pub fn update_widgets_library(&self, library: Option<String>) {
        info!(library = ?library, "widgets library changed");
        self.widgets_library.send_replace(library);
    }

    /// Receiver that observes every later theme change
    pub fn subscribe_theme(&self) -> watch::Receiver<Option<String>> {
        self.theme.subscribe()
    }

    pub fn subscribe_widgets_library(&self) -> watch::Receiver<Option<String>> {
        self.widgets_library.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_theme() {
        let selection = RegistrySelection::new(Some("default".to_string()), None);
        assert_eq!(selection.theme_id().as_deref(), Some("default"));
        assert_eq!(selection.widgets_library_id(), None);

        selection.update_theme(Some("dark".to_string()));
        assert_eq!(selection.theme_id().as_deref(), Some("dark"));

        selection.update_theme(None);
        assert_eq!(selection.theme_id(), None);
    }

    #[test]
    fn test_subscriber_sees_change() {
        let selection = RegistrySelection::new(Some("default".to_string()), None);
        let mut rx = selection.subscribe_theme();
        assert!(!rx.has_changed().unwrap());

        selection.update_theme(Some("dark".to_string()));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_deref(), Some("dark"));
        assert!(!rx.has_changed().unwrap());
    }
}
