//! Typed service container.
//!
//! Services are keyed by their Rust type instead of string names, so a
//! lookup can only fail because a provider forgot to register something,
//! never because of a misspelled alias.
//!
//! Resolution is lazy: a factory runs on the first `get` and its result is
//! shared by every later lookup.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&Container) -> Result<Instance, ContainerError> + Send + Sync>;

/// Failures while resolving a service.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("service {0} is not registered")]
    Missing(&'static str),

    #[error("circular dependency while resolving {0}")]
    Circular(&'static str),

    #[error("failed to construct {service}: {source}")]
    Construction {
        service: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ContainerError {
    /// Wrap a factory failure for service `T`.
    pub fn construction<T: ?Sized>(
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ContainerError::Construction {
            service: type_name::<T>(),
            source: source.into(),
        }
    }
}

struct Entry {
    name: &'static str,
    factory: Option<Factory>,
}

/// Registry of shared services.
#[derive(Default)]
pub struct Container {
    entries: HashMap<TypeId, Entry>,
    instances: Mutex<HashMap<TypeId, Instance>>,
    /// Services being built, per resolving thread.
    resolving: Mutex<Vec<(ThreadId, TypeId)>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lazily-built shared service, replacing any earlier registration.
    pub fn share<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        let id = TypeId::of::<T>();
        let factory: Factory = Arc::new(move |c| factory(c).map(|v| Arc::new(v) as Instance));
        self.entries.insert(
            id,
            Entry {
                name: type_name::<T>(),
                factory: Some(factory),
            },
        );
        self.instances_mut().remove(&id);
        self
    }

    /// Register an already-built instance.
    pub fn set<T: Send + Sync + 'static>(&mut self, instance: T) -> &mut Self {
        self.set_arc(Arc::new(instance))
    }

    /// Register an already-shared instance.
    pub fn set_arc<T: Send + Sync + 'static>(&mut self, instance: Arc<T>) -> &mut Self {
        let id = TypeId::of::<T>();
        self.entries.insert(
            id,
            Entry {
                name: type_name::<T>(),
                factory: None,
            },
        );
        self.instances_mut().insert(id, instance);
        self
    }

    /// Whether a service of type `T` is registered.
    pub fn has<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Whether `T` has already been built.
    pub fn is_resolved<T: 'static>(&self) -> bool {
        self.lock_instances().contains_key(&TypeId::of::<T>())
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a service, building it on first use.
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ContainerError> {
        let id = TypeId::of::<T>();

        if let Some(instance) = self.lock_instances().get(&id).cloned() {
            return downcast::<T>(instance);
        }

        let entry = self
            .entries
            .get(&id)
            .ok_or(ContainerError::Missing(type_name::<T>()))?;
        let factory = entry
            .factory
            .clone()
            .ok_or(ContainerError::Missing(entry.name))?;

        let key = (thread::current().id(), id);
        {
            let mut resolving = self.lock_resolving();
            if resolving.contains(&key) {
                return Err(ContainerError::Circular(entry.name));
            }
            resolving.push(key);
        }

        tracing::trace!(service = entry.name, "Constructing service");
        let built = factory(self);
        self.lock_resolving().retain(|pending| *pending != key);

        let instance = self
            .lock_instances()
            .entry(id)
            .or_insert(built?)
            .clone();
        downcast::<T>(instance)
    }

    fn lock_instances(&self) -> std::sync::MutexGuard<'_, HashMap<TypeId, Instance>> {
        self.instances.lock().expect("container instance lock poisoned")
    }

    fn lock_resolving(&self) -> std::sync::MutexGuard<'_, Vec<(ThreadId, TypeId)>> {
        self.resolving.lock().expect("container resolution lock poisoned")
    }

    fn instances_mut(&mut self) -> &mut HashMap<TypeId, Instance> {
        self.instances.get_mut().expect("container instance lock poisoned")
    }
}

fn downcast<T: Send + Sync + 'static>(instance: Instance) -> Result<Arc<T>, ContainerError> {
    instance
        .downcast::<T>()
        .map_err(|_| ContainerError::Missing(type_name::<T>()))
}

/// Something that registers services with a container.
pub trait ServiceProvider {
    fn register(&self, container: &mut Container);
}
