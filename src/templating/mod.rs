//! Template-callable surface for stamped resource URIs.
//!
//! Views are where asset URIs are written, so this module exposes the
//! decorator to Tera templates in two shapes:
//!
//! - the **`resource_uri` function**, which resolves and stamps in one step:
//!
//!   ```text
//!   <link rel="stylesheet" href="{{ resource_uri(path='css/app.css', package='Acme.Site') }}">
//!   <a href="{{ resource_uri(resource=report) }}">Download</a>
//!   ```
//!
//! - the **`cache_break` filter**, for URIs the template already has:
//!
//!   ```text
//!   <script src="{{ legacy_uri | cache_break }}"></script>
//!   ```
//!
//! Argument-shape problems (wrong types, neither `path` nor `resource`)
//! surface as template errors naming the offending argument. Resolver
//! failures pass through inside the error message chain so template authors
//! see the host framework's own description of what went wrong.
//!
//! # Registration
//!
//! ```rust,no_run
//! use cachebreak::templating::register_functions;
//! use cachebreak::uri::UriDecorator;
//! use std::sync::Arc;
//! use tera::Tera;
//!
//! # fn example(decorator: Arc<UriDecorator>) -> anyhow::Result<()> {
//! let mut tera = Tera::default();
//! register_functions(&mut tera, &decorator);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::resolver::ResourceRequest;
use crate::uri::UriDecorator;

/// Creates the `resource_uri` Tera function bound to a decorator.
///
/// The returned closure is registered under the name `resource_uri` by
/// [`register_functions`]. Accepted keyword arguments:
///
/// - `path` (string): resource path inside its package
/// - `package` (string): package key for `path`
/// - `resource` (object): persistent-resource descriptor
/// - `localize` (bool, default `true`)
pub fn create_resource_uri_function(decorator: Arc<UriDecorator>) -> impl tera::Function + 'static {
    move |args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let request = request_from_args(args)?;
        let stamped = decorator
            .resource_uri(&request)
            .map_err(|e| tera::Error::msg(format!("resource_uri: {e:#}")))?;
        Ok(tera::Value::String(stamped))
    }
}

/// Creates the `cache_break` Tera filter bound to a decorator.
///
/// Stamps a string URI the template already holds: `{{ uri | cache_break }}`.
pub fn create_cache_break_filter(decorator: Arc<UriDecorator>) -> impl tera::Filter + 'static {
    move |value: &tera::Value, _args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let uri = value
            .as_str()
            .ok_or_else(|| tera::Error::msg("cache_break filter requires a string URI"))?;

        let stamped = decorator
            .stamp(uri)
            .map_err(|e| tera::Error::msg(format!("cache_break filter: {e:#}")))?;

        Ok(tera::Value::String(stamped))
    }
}

/// Register the `resource_uri` function and `cache_break` filter on a Tera
/// instance.
pub fn register_functions(tera: &mut tera::Tera, decorator: &Arc<UriDecorator>) {
    tera.register_function("resource_uri", create_resource_uri_function(Arc::clone(decorator)));
    tera.register_filter("cache_break", create_cache_break_filter(Arc::clone(decorator)));
}

/// Build a [`ResourceRequest`] from Tera keyword arguments, rejecting wrong
/// types with errors that name the argument.
fn request_from_args(args: &HashMap<String, tera::Value>) -> tera::Result<ResourceRequest> {
    let path = optional_string(args, "path")?;
    let package = optional_string(args, "package")?;

    let resource = match args.get("resource") {
        None | Some(tera::Value::Null) => None,
        Some(value @ tera::Value::Object(_)) => Some(value.clone()),
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "resource_uri: 'resource' must be an object, got {other}"
            )));
        }
    };

    let localize = match args.get("localize") {
        None | Some(tera::Value::Null) => true,
        Some(tera::Value::Bool(b)) => *b,
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "resource_uri: 'localize' must be a boolean, got {other}"
            )));
        }
    };

    Ok(ResourceRequest {
        path,
        package,
        resource,
        localize,
    })
}

fn optional_string(
    args: &HashMap<String, tera::Value>,
    name: &str,
) -> tera::Result<Option<String>> {
    match args.get(name) {
        None | Some(tera::Value::Null) => Ok(None),
        Some(tera::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => {
            Err(tera::Error::msg(format!("resource_uri: '{name}' must be a string, got {other}")))
        }
    }
}
