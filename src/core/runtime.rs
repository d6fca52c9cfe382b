//! Ambient runtime state consulted by the placeholder interpolator
//!
//! Environment name, request parameters, session data and environment
//! variables are read through the [`RuntimeContext`] capability instead of
//! process globals, so tests can supply fixed snapshots.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Request or session variables
pub type VarMap = BTreeMap<String, serde_json::Value>;

/// Process variable naming the runtime environment
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Environment name used when nothing else is configured
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Runtime state the interpolator may expand into a message
pub trait RuntimeContext: Send + Sync {
    /// Name of the running environment (`production`, `development`, ...)
    fn environment(&self) -> String;

    /// Query parameters of the current request
    fn get_vars(&self) -> VarMap;

    /// Posted parameters of the current request
    fn post_vars(&self) -> VarMap;

    /// Session data, `None` when no session is active
    fn session_vars(&self) -> Option<VarMap>;

    fn env_var(&self, key: &str) -> Option<String>;

    fn roots(&self) -> &PathRoots;
}

/// Filesystem roots masked out of file paths before they are logged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRoots {
    pub app: Option<String>,
    pub system: Option<String>,
    pub public: Option<String>,
}

impl PathRoots {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_app(mut self, root: impl Into<String>) -> Self {
        self.app = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_system(mut self, root: impl Into<String>) -> Self {
        self.system = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_public(mut self, root: impl Into<String>) -> Self {
        self.public = Some(root.into());
        self
    }

    /// Replace a leading root directory with its symbolic marker.
    ///
    /// A root only matches whole path components, so `/srv/app` never touches
    /// `/srv/apple`. When roots nest, the longest one wins.
    ///
    /// ```
    /// use rust_log_dispatcher::core::PathRoots;
    ///
    /// let roots = PathRoots::new().with_app("/var/www/site/app/");
    /// assert_eq!(
    ///     roots.clean("/var/www/site/app/Controllers/Home.rs"),
    ///     "APPPATH/Controllers/Home.rs"
    /// );
    /// assert_eq!(roots.clean("/var/www/site/apple/x.rs"), "/var/www/site/apple/x.rs");
    /// ```
    pub fn clean(&self, file: &str) -> String {
        let mut best: Option<(&str, &str)> = None;
        for (root, marker) in [
            (&self.app, "APPPATH"),
            (&self.system, "SYSTEMPATH"),
            (&self.public, "FCPATH"),
        ] {
            let Some(root) = root.as_deref() else {
                continue;
            };
            let root = root.trim_end_matches(['/', '\\']);
            if root.is_empty() {
                continue;
            }
            let Some(rest) = file.strip_prefix(root) else {
                continue;
            };
            if !(rest.is_empty() || rest.starts_with(['/', '\\'])) {
                continue;
            }
            if best.map_or(true, |(_, current)| rest.len() < current.len()) {
                best = Some((marker, rest));
            }
        }

        match best {
            Some((marker, rest)) => format!("{}{}", marker, rest),
            None => file.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct RequestState {
    get: VarMap,
    post: VarMap,
    session: Option<VarMap>,
}

/// Shared runtime context the host application keeps up to date
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::core::{AmbientRuntime, RuntimeContext};
///
/// let runtime = AmbientRuntime::new()
///     .with_environment("testing")
///     .with_process_env(false)
///     .with_env_var("API_HOST", "localhost");
///
/// assert_eq!(runtime.environment(), "testing");
/// assert_eq!(runtime.env_var("API_HOST").as_deref(), Some("localhost"));
/// assert_eq!(runtime.env_var("PATH"), None);
/// ```
#[derive(Debug, Clone)]
pub struct AmbientRuntime {
    environment: String,
    env_overrides: HashMap<String, String>,
    use_process_env: bool,
    roots: PathRoots,
    request: Arc<RwLock<RequestState>>,
}

impl AmbientRuntime {
    /// Environment name from `APP_ENV`, process variables visible
    pub fn new() -> Self {
        Self {
            environment: std::env::var(ENVIRONMENT_VAR)
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            env_overrides: HashMap::new(),
            use_process_env: true,
            roots: PathRoots::default(),
            request: Arc::new(RwLock::new(RequestState::default())),
        }
    }

    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Whether `{env:KEY}` falls back to the process environment
    #[must_use]
    pub fn with_process_env(mut self, enabled: bool) -> Self {
        self.use_process_env = enabled;
        self
    }

    #[must_use]
    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_overrides.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_roots(mut self, roots: PathRoots) -> Self {
        self.roots = roots;
        self
    }

    pub fn set_get_vars(&self, vars: VarMap) {
        self.request.write().get = vars;
    }

    pub fn set_post_vars(&self, vars: VarMap) {
        self.request.write().post = vars;
    }

    pub fn start_session(&self, vars: VarMap) {
        self.request.write().session = Some(vars);
    }

    pub fn end_session(&self) {
        self.request.write().session = None;
    }

    /// Install request data until the returned guard is dropped
    pub fn enter_request(&self, get: VarMap, post: VarMap) -> RequestScope {
        {
            let mut state = self.request.write();
            state.get = get;
            state.post = post;
        }
        RequestScope {
            request: Arc::clone(&self.request),
        }
    }
}

impl Default for AmbientRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeContext for AmbientRuntime {
    fn environment(&self) -> String {
        self.environment.clone()
    }

    fn get_vars(&self) -> VarMap {
        self.request.read().get.clone()
    }

    fn post_vars(&self) -> VarMap {
        self.request.read().post.clone()
    }

    fn session_vars(&self) -> Option<VarMap> {
        self.request.read().session.clone()
    }

    fn env_var(&self, key: &str) -> Option<String> {
        if let Some(value) = self.env_overrides.get(key) {
            return Some(value.clone());
        }
        if self.use_process_env {
            std::env::var(key).ok()
        } else {
            None
        }
    }

    fn roots(&self) -> &PathRoots {
        &self.roots
    }
}

/// RAII guard for request-scoped runtime data
///
/// When dropped, clears request parameters and any session data.
pub struct RequestScope {
    request: Arc<RwLock<RequestState>>,
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        *self.request.write() = RequestState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, serde_json::Value)]) -> VarMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_clean_replaces_every_root() {
        let roots = PathRoots::new()
            .with_app("/srv/site/app/")
            .with_system("/srv/site/vendor/framework")
            .with_public("/srv/site/public/");

        assert_eq!(roots.clean("/srv/site/app/main.rs"), "APPPATH/main.rs");
        assert_eq!(
            roots.clean("/srv/site/vendor/framework/log.rs"),
            "SYSTEMPATH/log.rs"
        );
        assert_eq!(roots.clean("/srv/site/public/index.rs"), "FCPATH/index.rs");
        assert_eq!(roots.clean("/tmp/other.rs"), "/tmp/other.rs");
    }

    #[test]
    fn test_clean_leaves_sibling_with_shared_prefix() {
        let roots = PathRoots::new().with_app("/srv/app/");

        assert_eq!(roots.clean("/srv/apple/src/x.rs"), "/srv/apple/src/x.rs");
        assert_eq!(roots.clean("/srv/app/src/x.rs"), "APPPATH/src/x.rs");
        assert_eq!(roots.clean("/srv/app"), "APPPATH");
    }

    #[test]
    fn test_clean_only_matches_leading_root() {
        let roots = PathRoots::new().with_app("/app");
        assert_eq!(roots.clean("/mnt/app/x.rs"), "/mnt/app/x.rs");
    }

    #[test]
    fn test_clean_prefers_longest_nested_root() {
        let roots = PathRoots::new()
            .with_public("/srv/site")
            .with_app("/srv/site/app");

        assert_eq!(roots.clean("/srv/site/app/main.rs"), "APPPATH/main.rs");
        assert_eq!(roots.clean("/srv/site/index.rs"), "FCPATH/index.rs");
    }

    #[test]
    fn test_clean_without_roots_is_identity() {
        assert_eq!(PathRoots::new().clean("/a/b.rs"), "/a/b.rs");
    }

    #[test]
    fn test_request_scope_clears_on_drop() {
        let runtime = AmbientRuntime::new();
        {
            let _scope = runtime.enter_request(vars(&[("page", json!(2))]), VarMap::new());
            runtime.start_session(vars(&[("user", json!("ada"))]));

            assert_eq!(runtime.get_vars().get("page"), Some(&json!(2)));
            assert!(runtime.session_vars().is_some());
        }
        assert!(runtime.get_vars().is_empty());
        assert!(runtime.session_vars().is_none());
    }

    #[test]
    fn test_env_override_beats_process_env() {
        let runtime = AmbientRuntime::new()
            .with_process_env(true)
            .with_env_var("PATH", "overridden");
        assert_eq!(runtime.env_var("PATH").as_deref(), Some("overridden"));
    }

    #[test]
    fn test_clones_share_request_state() {
        let runtime = AmbientRuntime::new();
        let shared = runtime.clone();
        runtime.set_post_vars(vars(&[("name", json!("x"))]));
        assert_eq!(shared.post_vars().len(), 1);
    }
}
