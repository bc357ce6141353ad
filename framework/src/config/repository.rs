use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

type Entry = Arc<dyn Any + Send + Sync>;

/// Process-wide store of typed config structs, one value per type
static CONFIG_REPOSITORY: OnceLock<RwLock<HashMap<TypeId, Entry>>> = OnceLock::new();

fn repository() -> &'static RwLock<HashMap<TypeId, Entry>> {
    CONFIG_REPOSITORY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Store `config`, replacing any earlier value of the same type
pub fn register<T: Any + Send + Sync + 'static>(config: T) {
    if let Ok(mut map) = repository().write() {
        map.insert(TypeId::of::<T>(), Arc::new(config));
    }
}

/// Clone out the registered value of type `T`
pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
    let map = repository().read().ok()?;
    map.get(&TypeId::of::<T>())?.downcast_ref::<T>().cloned()
}

pub fn has<T: Any + 'static>() -> bool {
    repository()
        .read()
        .map(|map| map.contains_key(&TypeId::of::<T>()))
        .unwrap_or(false)
}
