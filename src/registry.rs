//! Keyed registries and their resolution
//!
//! A registry maps symbolic keys to presentation values. Lookups never fail:
//! a missing registry or a missing key resolves to the value type's default.
//!
//! [`RegistryResolver`] hands out one shared instance per registry id,
//! building it lazily from a [`RegistrySource`] the first time it is asked
//! for.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use xsolla_utils::registry::resolve;
//!
//! let mut sizes = HashMap::new();
//! sizes.insert("title", 24u32);
//!
//! assert_eq!(resolve(Some(&sizes), &"title"), 24);
//! assert_eq!(resolve(Some(&sizes), &"body"), 0);
//! assert_eq!(resolve::<HashMap<&str, u32>, _, _>(None, &"title"), 0);
//! ```

use crate::selection::RegistrySelection;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read access to a registry's bindings
pub trait Lookup<K: ?Sized, V> {
    fn try_get(&self, key: &K) -> Option<&V>;

    fn contains(&self, key: &K) -> bool {
        self.try_get(key).is_some()
    }
}

impl<K, Q, V> Lookup<Q, V> for HashMap<K, V>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    fn try_get(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<K, Q, V> Lookup<Q, V> for BTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn try_get(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

/// Resolve `key`, falling back to `V::default()` when the registry is absent
/// or does not bind the key.
pub fn resolve<R, K, V>(registry: Option<&R>, key: &K) -> V
where
    R: Lookup<K, V> + ?Sized,
    K: ?Sized,
    V: Clone + Default,
{
    lookup(registry, key).unwrap_or_default()
}

/// Like [`resolve`] but keeps the miss visible, for values whose default is
/// "nothing" (widget classes).
pub fn lookup<R, K, V>(registry: Option<&R>, key: &K) -> Option<V>
where
    R: Lookup<K, V> + ?Sized,
    K: ?Sized,
    V: Clone,
{
    registry.and_then(|r| r.try_get(key)).cloned()
}

/// Which of the selection's registries a resolver follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Theme,
    WidgetsLibrary,
}

/// Builds registry instances from their definitions
pub trait RegistrySource<R>: Send + Sync {
    /// Build the registry known as `id`, or `None` if there is no such definition.
    fn build(&self, id: &str) -> Option<R>;

    /// Ids of every registry this source can build
    fn ids(&self) -> Vec<String>;
}

/// Shared per-id registry instances
pub struct RegistryResolver<R> {
    kind: RegistryKind,
    source: Arc<dyn RegistrySource<R>>,
    instances: RwLock<HashMap<String, Arc<R>>>,
}

impl<R> RegistryResolver<R> {
    pub fn new(kind: RegistryKind, source: Arc<dyn RegistrySource<R>>) -> Self {
        Self {
            kind,
            source,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Registry for an explicit id.
    ///
    /// Every call with the same id returns the same instance. `None` id or an
    /// id without a definition gives `None`.
    pub fn get(&self, id: Option<&str>) -> Option<Arc<R>> {
        let id = id.filter(|id| !id.is_empty())?;

        if let Some(instance) = self.instances.read().get(id) {
            return Some(Arc::clone(instance));
        }

        let mut instances = self.instances.write();
        // Another caller may have built it between the two locks
        if let Some(instance) = instances.get(id) {
            return Some(Arc::clone(instance));
        }

        match self.source.build(id) {
            Some(registry) => {
                debug!(kind = ?self.kind, id, "created registry instance");
                let registry = Arc::new(registry);
                instances.insert(id.to_string(), Arc::clone(&registry));
                Some(registry)
            }
            None => {
                warn!(kind = ?self.kind, id, "no registry defined with this id");
                None
            }
        }
    }

    /// Registry currently selected for this resolver's kind
    pub fn current(&self, selection: &RegistrySelection) -> Option<Arc<R>> {
        let id = match self.kind {
            RegistryKind::Theme => selection.theme_id(),
            RegistryKind::WidgetsLibrary => selection.widgets_library_id(),
        };
        self.get(id.as_deref())
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    pub fn available(&self) -> Vec<String> {
        self.source.ids()
    }

    /// Number of instances created so far
    pub fn instantiated(&self) -> usize {
        self.instances.read().len()
    }
}
