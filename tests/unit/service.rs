//! Service memoization and the environment override, through the public API.

use cachebreak::constants::TOKEN_ENV_VAR;
use cachebreak::core::CacheBreakError;
use cachebreak::service::CacheBreakService;
use cachebreak::test_utils::AssetTree;
use cachebreak::token::TokenStrategy;
use serial_test::serial;

#[test]
fn token_survives_tree_mutation_within_one_service() {
    let tree = AssetTree::new().with_file("app.js", "one");
    let service = CacheBreakService::new(TokenStrategy::ContentHash {
        asset_dir: tree.root_path_buf(),
        exclude: vec![],
    });

    let before = service.get().unwrap().clone();
    tree.write("app.js", "two");
    let after = service.get().unwrap().clone();

    assert_eq!(before, after);
}

#[test]
fn prime_and_get_agree() {
    let service = CacheBreakService::new(TokenStrategy::Fixed {
        value: "abc123".to_string(),
    });

    assert!(service.cached().is_none());
    let primed = service.prime().unwrap().clone();
    assert_eq!(service.get().unwrap(), &primed);
    assert_eq!(service.cached(), Some(&primed));
}

#[test]
fn fresh_service_recomputes_for_changed_tree() {
    let tree = AssetTree::new().with_file("app.js", "one");
    let strategy = TokenStrategy::ContentHash {
        asset_dir: tree.root_path_buf(),
        exclude: vec![],
    };

    let first = CacheBreakService::new(strategy.clone()).get().unwrap().clone();
    tree.write("app.js", "two");
    let second = CacheBreakService::new(strategy).get().unwrap().clone();

    assert_ne!(first, second);
}

#[test]
#[serial]
fn environment_override_wins_over_strategy() {
    unsafe {
        std::env::set_var(TOKEN_ENV_VAR, "override-7");
    }

    let service = CacheBreakService::new(TokenStrategy::Fixed {
        value: "abc123".to_string(),
    });
    let token = service.get().unwrap().clone();

    unsafe {
        std::env::remove_var(TOKEN_ENV_VAR);
    }

    assert_eq!(token.as_str(), "override-7");
}

#[test]
#[serial]
fn environment_override_is_trimmed() {
    unsafe {
        std::env::set_var(TOKEN_ENV_VAR, "  padded-9  ");
    }

    let service = CacheBreakService::new(TokenStrategy::Fixed {
        value: "abc123".to_string(),
    });
    let token = service.get().unwrap().clone();

    unsafe {
        std::env::remove_var(TOKEN_ENV_VAR);
    }

    assert_eq!(token.as_str(), "padded-9");
}

#[test]
#[serial]
fn invalid_environment_override_is_a_typed_error() {
    unsafe {
        std::env::set_var(TOKEN_ENV_VAR, "not a token");
    }

    let service = CacheBreakService::new(TokenStrategy::Fixed {
        value: "abc123".to_string(),
    });
    let result = service.get().map(Clone::clone);

    unsafe {
        std::env::remove_var(TOKEN_ENV_VAR);
    }

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CacheBreakError>(),
        Some(CacheBreakError::InvalidToken { .. })
    ));
}
