//! Hooks that adjust outgoing requests right before dispatch.

use super::resource::RequestComponents;
use std::collections::BTreeMap;

/// Mutates the components of an outgoing request before the URL is frozen.
///
/// Implementations only get write access to the query parameters; scheme,
/// host and path stay as resolved from the environment and resource.
pub trait UrlInterceptor: Send + Sync {
    fn intercept(&self, components: &mut RequestComponents);
}

/// Leaves every request untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInterceptor;

impl UrlInterceptor for NoopInterceptor {
    fn intercept(&self, _components: &mut RequestComponents) {}
}

/// Injects the `api_key` query parameter expected by the TMDB v3 API.
#[derive(Clone)]
pub struct ApiKeyInterceptor {
    api_key: String,
}

impl ApiKeyInterceptor {
    pub const PARAMETER: &'static str = "api_key";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

// The key must never show up in logs.
impl std::fmt::Debug for ApiKeyInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyInterceptor")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl UrlInterceptor for ApiKeyInterceptor {
    fn intercept(&self, components: &mut RequestComponents) {
        components
            .query_mut()
            .insert(Self::PARAMETER.to_string(), self.api_key.clone());
    }
}

/// Adds default query parameters that a resource did not set itself.
#[derive(Debug, Clone, Default)]
pub struct DefaultQueryInterceptor {
    defaults: BTreeMap<String, String>,
}

impl DefaultQueryInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }
}

impl UrlInterceptor for DefaultQueryInterceptor {
    fn intercept(&self, components: &mut RequestComponents) {
        let query = components.query_mut();
        for (name, value) in &self.defaults {
            query
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

/// Runs several interceptors in order
#[derive(Default)]
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn UrlInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, interceptor: impl UrlInterceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }
}

impl UrlInterceptor for InterceptorChain {
    fn intercept(&self, components: &mut RequestComponents) {
        for interceptor in &self.interceptors {
            interceptor.intercept(components);
        }
    }
}
