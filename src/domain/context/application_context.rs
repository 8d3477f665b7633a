//! Minimal type-keyed bean container

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::short_type_name;
use crate::domain::error::{BeanError, MatcherError};

type AnyBean = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
struct BeanDefinition {
    name: String,
    instance: AnyBean,
}

/// Types that can be built by constructor injection from an application context
///
/// Implementations pull their dependencies out of the registry; a missing or
/// ambiguous dependency is reported as the corresponding [`BeanError`].
pub trait Autowire: Sized + Send + Sync + 'static {
    fn autowire(context: &ApplicationContext) -> Result<Self, BeanError>;
}

/// Application context holding managed objects ("beans") keyed by type
///
/// A context is immutable once built. Beans are shared as `Arc<T>`, so every
/// lookup of the same bean returns the same instance.
pub struct ApplicationContext {
    id: String,
    beans: HashMap<TypeId, Vec<BeanDefinition>>,
}

impl ApplicationContext {
    pub fn builder(id: impl Into<String>) -> ApplicationContextBuilder {
        ApplicationContextBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the single bean registered for `T`
    pub fn get_bean<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, BeanError> {
        let mut candidates = self.candidates::<T>();

        match candidates.len() {
            0 => Err(BeanError::NoSuchBean {
                type_name: short_type_name::<T>().to_string(),
            }),
            1 => Ok(candidates.remove(0).1),
            count => Err(BeanError::NotUnique {
                type_name: short_type_name::<T>().to_string(),
                candidates: count,
                names: candidates.into_iter().map(|(name, _)| name).collect(),
            }),
        }
    }

    /// Get a bean of type `T` by its registered name
    pub fn get_bean_by_name<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, BeanError> {
        self.candidates::<T>()
            .into_iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, bean)| bean)
            .ok_or_else(|| BeanError::NoSuchNamedBean {
                name: name.to_string(),
                type_name: short_type_name::<T>().to_string(),
            })
    }

    pub fn contains_bean<T: Send + Sync + 'static>(&self) -> bool {
        self.beans
            .get(&TypeId::of::<T>())
            .is_some_and(|definitions| !definitions.is_empty())
    }

    /// Names of every registered bean, sorted
    pub fn bean_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .beans
            .values()
            .flatten()
            .map(|definition| definition.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn bean_count(&self) -> usize {
        self.beans.values().map(Vec::len).sum()
    }

    /// Create a new, autowired `T` without registering it
    pub fn create_bean<T: Autowire>(&self) -> Result<Arc<T>, MatcherError> {
        self.instantiate(T::autowire)
    }

    /// Create a `T` with the given constructor without registering it
    pub fn instantiate<T: Send + Sync + 'static>(
        &self,
        constructor: fn(&ApplicationContext) -> Result<T, BeanError>,
    ) -> Result<Arc<T>, MatcherError> {
        debug!(
            context_id = %self.id,
            bean_type = short_type_name::<T>(),
            "Autowiring unregistered bean"
        );

        constructor(self)
            .map(Arc::new)
            .map_err(|e| MatcherError::construction(short_type_name::<T>(), e.to_string()))
    }

    fn candidates<T: Send + Sync + 'static>(&self) -> Vec<(String, Arc<T>)> {
        self.beans
            .get(&TypeId::of::<T>())
            .map(|definitions| {
                definitions
                    .iter()
                    .filter_map(|definition| {
                        definition
                            .instance
                            .clone()
                            .downcast::<T>()
                            .ok()
                            .map(|bean| (definition.name.clone(), bean))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("id", &self.id)
            .field("beans", &self.bean_names())
            .finish()
    }
}

/// Builder for [`ApplicationContext`]
#[derive(Default)]
pub struct ApplicationContextBuilder {
    id: String,
    beans: HashMap<TypeId, Vec<BeanDefinition>>,
}

impl ApplicationContextBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            beans: HashMap::new(),
        }
    }

    /// Register a bean under a name derived from its type
    pub fn bean<T: Send + Sync + 'static>(self, bean: T) -> Self {
        let name = default_bean_name::<T>();
        self.shared_bean(name, Arc::new(bean))
    }

    pub fn named_bean<T: Send + Sync + 'static>(self, name: impl Into<String>, bean: T) -> Self {
        self.shared_bean(name, Arc::new(bean))
    }

    /// Register an already shared instance; lookups return this exact `Arc`
    pub fn shared_bean<T: Send + Sync + 'static>(
        mut self,
        name: impl Into<String>,
        bean: Arc<T>,
    ) -> Self {
        self.beans
            .entry(TypeId::of::<T>())
            .or_default()
            .push(BeanDefinition {
                name: name.into(),
                instance: bean,
            });
        self
    }

    pub fn build(self) -> Arc<ApplicationContext> {
        let context = ApplicationContext {
            id: self.id,
            beans: self.beans,
        };

        debug!(
            context_id = %context.id,
            bean_count = context.bean_count(),
            "Application context built"
        );

        Arc::new(context)
    }
}

/// `ManagementPaths` -> `managementPaths`
fn default_bean_name<T: ?Sized>() -> String {
    let type_name = short_type_name::<T>();
    let mut chars = type_name.chars();

    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
