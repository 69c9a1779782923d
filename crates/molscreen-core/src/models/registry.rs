use super::catalog::{BUILTIN_MODELS, BuiltinConstructor};
use super::interface::{Model, ModelError};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Once, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, trace};

pub type ModelConstructor = Arc<dyn Fn() -> Result<Box<dyn Model>, ModelError> + Send + Sync>;

/// Produces the `(name, constructor)` table registered on first use.
pub type Discovery = fn() -> &'static [(&'static str, BuiltinConstructor)];

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown model name: '{name}'")]
    ModelNotFound { name: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Name-keyed model factory with one-time lazy discovery.
///
/// The first call to [`create`](Self::create) (or any other lookup) registers
/// every entry of the discovery table exactly once, guarded by a [`Once`] so
/// concurrent first access cannot run discovery twice or observe a partial
/// table. Entries registered explicitly before discovery are kept: discovery
/// only fills names that are still vacant.
pub struct ModelRegistry {
    constructors: RwLock<HashMap<String, ModelConstructor>>,
    discovered: Once,
    discovery: Discovery,
}

impl ModelRegistry {
    /// A registry whose discovery table is the built-in model catalog.
    pub fn new() -> Self {
        Self::with_discovery(|| BUILTIN_MODELS)
    }

    pub fn with_discovery(discovery: Discovery) -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
            discovered: Once::new(),
            discovery,
        }
    }

    /// Inserts or silently replaces the constructor for `name`.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Result<Box<dyn Model>, ModelError> + Send + Sync + 'static,
    {
        let name = name.into();
        trace!(model = %name, "Registering model constructor.");
        self.constructors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::new(constructor));
    }

    /// Builds a new instance of the model registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn Model>, RegistryError> {
        self.ensure_discovered();
        let constructor = self
            .constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ModelNotFound {
                name: name.to_string(),
            })?;
        debug!(model = name, "Constructing model.");
        Ok(constructor()?)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ensure_discovered();
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names in lexicographic order.
    pub fn names(&self) -> Vec<String> {
        self.ensure_discovered();
        let mut names: Vec<String> = self
            .constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered.is_completed()
    }

    fn ensure_discovered(&self) {
        self.discovered.call_once(|| {
            let table = (self.discovery)();
            let mut constructors = self
                .constructors
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let mut added = 0usize;
            for &(name, constructor) in table {
                constructors.entry(name.to_string()).or_insert_with(|| {
                    added += 1;
                    Arc::new(constructor) as ModelConstructor
                });
            }
            debug!(
                added,
                total = constructors.len(),
                "Model discovery complete."
            );
        });
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::new);

/// The process-wide registry.
pub fn global() -> &'static ModelRegistry {
    &GLOBAL
}

pub fn register_model<F>(name: impl Into<String>, constructor: F)
where
    F: Fn() -> Result<Box<dyn Model>, ModelError> + Send + Sync + 'static,
{
    global().register(name, constructor);
}

pub fn create_model(name: &str) -> Result<Box<dyn Model>, RegistryError> {
    global().create(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::families::ReferenceModel;
    use crate::models::interface::ModelFamily;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn empty_table() -> &'static [(&'static str, BuiltinConstructor)] {
        &[]
    }

    fn boxed_control(name: &str) -> Result<Box<dyn Model>, ModelError> {
        Ok(Box::new(ReferenceModel::control(name)))
    }

    fn data_ptr(model: &dyn Model) -> *const () {
        model as *const dyn Model as *const ()
    }

    #[test]
    fn create_on_fresh_registry_runs_discovery() {
        let registry = ModelRegistry::new();
        assert!(!registry.is_discovered());

        let model = registry.create("baseline").unwrap();
        assert_eq!(model.name(), "baseline");
        assert_eq!(model.family(), ModelFamily::Baseline);
        assert!(registry.is_discovered());
        assert!(registry.names().len() >= 18);

        let err = registry.create("not_a_model").unwrap_err();
        assert!(matches!(err, RegistryError::ModelNotFound { ref name } if name == "not_a_model"));
    }

    #[test]
    fn every_discovered_name_resolves_to_a_fresh_instance() {
        let registry = ModelRegistry::new();
        for name in registry.names() {
            let first = registry.create(&name).unwrap();
            let second = registry.create(&name).unwrap();
            assert_eq!(first.name(), name);
            assert_ne!(data_ptr(first.as_ref()), data_ptr(second.as_ref()));
        }
    }

    #[test]
    fn unknown_name_fails_before_and_after_discovery() {
        let registry = ModelRegistry::new();
        assert!(matches!(
            registry.create("missing"),
            Err(RegistryError::ModelNotFound { .. })
        ));
        assert!(registry.is_discovered());
        assert!(matches!(
            registry.create("missing"),
            Err(RegistryError::ModelNotFound { .. })
        ));
    }

    #[test]
    fn discovery_runs_once_even_after_a_failed_lookup() {
        let registry = ModelRegistry::new();
        let _ = registry.create("missing");
        let after_first = registry.names();
        let _ = registry.create("baseline");
        let _ = registry.create("also_missing");
        assert_eq!(registry.names(), after_first);
    }

    #[test]
    fn registered_constructor_is_invoked_once_per_create() {
        let registry = ModelRegistry::with_discovery(empty_table);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        registry.register("custom", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            boxed_control("custom")
        });

        let model = registry.create("custom").unwrap();
        assert_eq!(model.name(), "custom");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        registry.create("custom").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn re_registering_a_name_overwrites_the_constructor() {
        let registry = ModelRegistry::with_discovery(empty_table);
        registry.register("shared", || boxed_control("first"));
        registry.register("shared", || boxed_control("second"));
        assert_eq!(registry.create("shared").unwrap().name(), "second");
    }

    #[test]
    fn explicit_registration_survives_discovery() {
        let registry = ModelRegistry::new();
        registry.register("baseline", || boxed_control("replacement"));
        let model = registry.create("baseline").unwrap();
        assert_eq!(model.name(), "replacement");
        assert!(registry.contains("nbit_ecfp"));
    }

    #[test]
    fn empty_discovery_table_still_marks_registry_discovered() {
        let registry = ModelRegistry::with_discovery(empty_table);
        assert!(registry.names().is_empty());
        assert!(registry.is_discovered());
        registry.register("late", || boxed_control("late"));
        assert_eq!(registry.names(), vec!["late".to_string()]);
    }

    #[test]
    fn constructor_errors_propagate_unchanged() {
        let registry = ModelRegistry::with_discovery(empty_table);
        registry.register("broken", || {
            Err(ModelError::Configuration {
                model: "broken".to_string(),
                reason: "no bits".to_string(),
            })
        });
        let err = registry.create("broken").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Model(ModelError::Configuration { ref reason, .. }) if reason == "no bits"
        ));
    }

    #[test]
    fn concurrent_first_access_discovers_exactly_once() {
        let registry = Arc::new(ModelRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.create("control").map(|m| m.name().to_string()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "control");
        }
        assert_eq!(registry.names().len(), BUILTIN_MODELS.len());
    }

    #[test]
    fn global_registry_serves_the_builtin_catalog() {
        let model = create_model("ecfp_pair").unwrap();
        assert_eq!(model.family(), ModelFamily::FingerprintPair);
        assert!(global().contains("rdkt_fcfp"));
        assert!(matches!(
            create_model("not_a_model"),
            Err(RegistryError::ModelNotFound { .. })
        ));
    }
}
