//! End-to-end stamping through the decorator and the template surface.

use cachebreak::resolver::{ResourceRequest, ResourceResolver};
use cachebreak::service::CacheBreakService;
use cachebreak::test_utils::{AssetTree, FixtureResolver};
use cachebreak::token::TokenStrategy;
use cachebreak::uri::UriDecorator;
use std::sync::Arc;
use tera::{Context, Tera};

#[test]
fn stamped_uri_is_resolver_output_plus_token() {
    let tree = AssetTree::new().with_file("css/app.css", "body{}");
    let strategy = TokenStrategy::ContentHash {
        asset_dir: tree.root_path_buf(),
        exclude: vec![],
    };

    let resolver = Arc::new(FixtureResolver::new("http://example.com"));
    let service = Arc::new(CacheBreakService::new(strategy.clone()));
    let decorator = UriDecorator::new(resolver.clone(), service);

    let request = ResourceRequest::for_path("css/app.css", Some("Pkg".to_string()));
    let stamped = decorator.resource_uri(&request).unwrap();

    let resolved = resolver.resolve(&request).unwrap();
    let token = strategy.compute().unwrap();
    assert_eq!(stamped, format!("{resolved}?{token}"));
}

#[test]
fn every_uri_in_a_deployment_carries_the_same_token() {
    let tree = AssetTree::new().with_file("a.css", "a").with_file("b.css", "b");
    let service = Arc::new(CacheBreakService::new(TokenStrategy::ContentHash {
        asset_dir: tree.root_path_buf(),
        exclude: vec![],
    }));
    let decorator = Arc::new(UriDecorator::new(
        Arc::new(FixtureResolver::new("http://example.com")),
        service,
    ));

    let mut tera = Tera::default();
    cachebreak::templating::register_functions(&mut tera, &decorator);

    let rendered = tera
        .render_str(
            "{{ resource_uri(path='a.css', package='P') }} {{ resource_uri(path='b.css', package='P') }}",
            &Context::new(),
        )
        .unwrap();

    let uris: Vec<&str> = rendered.split(' ').collect();
    assert_eq!(uris.len(), 2);

    let token_of = |uri: &str| uri.rsplit('?').next().unwrap().to_string();
    assert_eq!(token_of(uris[0]), token_of(uris[1]));
    assert!(uris[0].contains("/a.css?"));
    assert!(uris[1].contains("/b.css?"));
}

#[test]
fn stamp_and_resource_uri_share_one_token() {
    let service = Arc::new(CacheBreakService::new(TokenStrategy::Timestamp));
    let decorator = UriDecorator::new(
        Arc::new(FixtureResolver::new("http://example.com")),
        service,
    );

    let stamped = decorator
        .resource_uri(&ResourceRequest::for_path("a.css", Some("P".to_string())))
        .unwrap();
    let manual = decorator.stamp("http://example.com/legacy.css").unwrap();

    let token = stamped.rsplit('?').next().unwrap();
    assert!(manual.ends_with(&format!("?{token}")));
}

#[test]
fn concurrent_template_renders_agree_on_the_token() {
    let tree = AssetTree::new().with_file("app.js", "x");
    let service = Arc::new(CacheBreakService::new(TokenStrategy::ContentHash {
        asset_dir: tree.root_path_buf(),
        exclude: vec![],
    }));
    let decorator = Arc::new(UriDecorator::new(
        Arc::new(FixtureResolver::new("http://example.com")),
        service,
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let decorator = Arc::clone(&decorator);
        handles.push(std::thread::spawn(move || {
            decorator
                .resource_uri(&ResourceRequest::for_path("app.js", Some("P".to_string())))
                .unwrap()
        }));
    }

    let uris: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(uris.windows(2).all(|pair| pair[0] == pair[1]));
}
