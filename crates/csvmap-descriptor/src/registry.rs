/*!
# Record Type Registry

Maps the names used in descriptor `class` attributes to registered
[`RecordType`] handles. Descriptors built without an explicit registry use
the process-wide [`TYPE_REGISTRY`].
*/

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use tracing::debug;

use crate::record::{Record, RecordType};

/// Thread-safe map from type names to record type handles
pub struct TypeRegistry {
    types: RwLock<HashMap<String, Arc<RecordType>>>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Register a record type under its name, replacing any earlier entry
    pub fn register(&self, record_type: RecordType) -> Arc<RecordType> {
        let record_type = Arc::new(record_type);
        debug!(
            name = record_type.name(),
            instantiable = record_type.is_instantiable(),
            "registering record type"
        );
        self.types
            .write()
            .expect("type registry poisoned")
            .insert(record_type.name().to_string(), record_type.clone());
        record_type
    }

    /// Register the concrete type `T` under `name`
    pub fn register_type<T: Record + Default>(&self, name: &str) -> Arc<RecordType> {
        self.register(RecordType::of::<T>(name))
    }

    /// Look up a record type by name
    pub fn get(&self, name: &str) -> Option<Arc<RecordType>> {
        self.types
            .read()
            .expect("type registry poisoned")
            .get(name)
            .cloned()
    }

    /// Names of all registered types, sorted
    pub fn registered_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .types
            .read()
            .expect("type registry poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry used by descriptors built without an explicit one
pub static TYPE_REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);
