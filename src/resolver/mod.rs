//! The host-framework seam: resource requests and the resolver contract.
//!
//! Cachebreak never builds resource URIs itself. The host web framework owns
//! package layout, localization, and URL construction; this crate only asks it
//! to resolve a request and then stamps the result. [`ResourceResolver`] is
//! that boundary, and [`ResourceRequest`] is the bag of arguments carried
//! across it.
//!
//! Implementations live in the host application. A typical one maps
//! `(package, path)` onto the framework's static-resource URL scheme and a
//! persistent-resource descriptor onto its published-resource store. The only
//! contract on errors is that they come back as `anyhow::Error` and are
//! surfaced to callers unchanged by the decorator layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments identifying one resource to resolve.
///
/// A request names its target in one of two ways:
/// - `path` (optionally with `package`) for a static file shipped inside an
///   application package, e.g. `css/app.css` in `Acme.Site`
/// - `resource` for a persistent resource descriptor, an opaque JSON value
///   the host resolver knows how to interpret
///
/// At least one of the two must be present; the decorator checks that before
/// calling the resolver. `localize` asks the resolver for a locale-specific
/// variant and defaults to `true`, matching host frameworks that localize
/// static resources by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequest {
    /// Path of the resource inside its package, e.g. `css/app.css`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Package key the path is relative to, e.g. `Acme.Site`. Resolvers
    /// usually fall back to a request-context default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Opaque persistent-resource descriptor, interpreted by the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,
    /// Whether the resolver should localize the resource.
    #[serde(default = "default_localize")]
    pub localize: bool,
}

const fn default_localize() -> bool {
    true
}

impl Default for ResourceRequest {
    fn default() -> Self {
        Self {
            path: None,
            package: None,
            resource: None,
            localize: true,
        }
    }
}

impl ResourceRequest {
    /// Request for a static path inside a package.
    #[must_use]
    pub fn for_path(path: impl Into<String>, package: Option<String>) -> Self {
        Self {
            path: Some(path.into()),
            package,
            ..Self::default()
        }
    }

    /// Request for a persistent resource descriptor.
    #[must_use]
    pub fn for_resource(resource: Value) -> Self {
        Self {
            resource: Some(resource),
            ..Self::default()
        }
    }

    /// Set the localization flag, builder style.
    #[must_use]
    pub const fn localized(mut self, localize: bool) -> Self {
        self.localize = localize;
        self
    }

    /// Whether the request names anything resolvable.
    ///
    /// `false` means neither `path` nor `resource` is present and the request
    /// must be rejected before any resolver sees it.
    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.path.is_some() || self.resource.is_some()
    }
}

/// Resolves a [`ResourceRequest`] to an absolute URI.
///
/// Implemented by the host application. Implementations should be cheap and
/// non-blocking; this trait is called synchronously from template rendering.
///
/// # Errors
///
/// Return any error for unknown packages, missing resources, or malformed
/// descriptors. The decorator layer propagates resolver errors without
/// wrapping or remapping them.
pub trait ResourceResolver: Send + Sync {
    /// Resolve the request to an absolute URI, without any cache-break token.
    fn resolve(&self, request: &ResourceRequest) -> anyhow::Result<String>;
}
