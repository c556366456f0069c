//! Declarative request descriptions and URL composition.

use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// HTTP method of a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Immutable description of a single HTTP call against the configured API.
///
/// The path is relative to the API version prefix of the [`Environment`],
/// e.g. `/movie/popular`. Query parameters are kept ordered by key so the
/// resulting URL is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: String,
    method: HttpMethod,
    query: BTreeMap<String, String>,
}

impl Resource {
    /// Creates a GET resource for the given path without query parameters
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            query: BTreeMap::new(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Adds (or replaces) a query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(name.into(), value.to_string());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }
}

/// Location of the API every [`Resource`] is resolved against.
///
/// Set once when the client is composed and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    scheme: String,
    host: String,
    version: String,
}

impl Environment {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            version: version.into(),
        }
    }

    /// The public TMDB v3 endpoint
    pub fn tmdb() -> Self {
        Self::new("https", "api.themoviedb.org", "3")
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns a copy pointing at a different host
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..self.clone()
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::tmdb()
    }
}

/// Mutable view on an outgoing request, handed to a URL interceptor.
///
/// Scheme, host and path are fixed by the environment and the resource and can
/// only be read. Query parameters may be added, overridden or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestComponents {
    scheme: String,
    host: String,
    path: String,
    query: BTreeMap<String, String>,
}

impl RequestComponents {
    /// Resolves a resource against an environment
    pub fn new(environment: &Environment, resource: &Resource) -> Self {
        let version = environment.version().trim_matches('/');
        let path = if version.is_empty() {
            resource.path().to_string()
        } else {
            format!("/{}{}", version, resource.path())
        };

        Self {
            scheme: environment.scheme().to_string(),
            host: environment.host().to_string(),
            path,
            query: resource.query().clone(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.query
    }

    /// Freezes the components into a URL
    ///
    /// Query values are form-encoded in key order.
    pub(crate) fn to_url(&self) -> Result<Url, String> {
        let mut url = Url::parse(&format!("{}://{}{}", self.scheme, self.host, self.path))
            .map_err(|e| e.to_string())?;

        if url.cannot_be_a_base() {
            return Err(format!("'{}' cannot carry a path", url));
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}
