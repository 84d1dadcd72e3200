//! Configuration parsing and discovery through the public API.

use cachebreak::config::{Config, find_config_from};
use cachebreak::service::CacheBreakService;
use cachebreak::token::TokenStrategy;
use tempfile::TempDir;

#[tokio::test]
async fn documented_example_parses() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cachebreak.toml");
    tokio::fs::write(
        &path,
        r#"
[token]
strategy = "content-hash"
asset_dir = "public"
exclude = ["*.map", ".DS_Store"]
"#,
    )
    .await
    .unwrap();

    let config = Config::load_from(&path).await.unwrap();
    assert_eq!(
        config.token,
        TokenStrategy::ContentHash {
            asset_dir: temp.path().join("public"),
            exclude: vec!["*.map".to_string(), ".DS_Store".to_string()],
        }
    );
}

#[tokio::test]
async fn missing_token_table_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cachebreak.toml");
    tokio::fs::write(&path, "").await.unwrap();

    let config = Config::load_from(&path).await.unwrap();
    match config.token {
        TokenStrategy::ContentHash { asset_dir, exclude } => {
            assert_eq!(asset_dir, temp.path().join("public"));
            assert!(exclude.is_empty());
        }
        other => panic!("unexpected strategy: {other:?}"),
    }
}

#[tokio::test]
async fn saved_config_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cachebreak.toml");

    let config = Config {
        token: TokenStrategy::Release {
            value: None,
            env: Some("BUILD_NUMBER".to_string()),
        },
    };
    config.save_to(&path).await.unwrap();

    assert_eq!(Config::load_from(&path).await.unwrap(), config);
}

#[tokio::test]
async fn loaded_config_drives_the_service() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cachebreak.toml");
    tokio::fs::write(&path, "[token]\nstrategy = \"fixed\"\nvalue = \"v42\"\n").await.unwrap();

    let config = Config::load(Some(path)).await.unwrap();
    let service = CacheBreakService::new(config.token);

    assert_eq!(service.get().unwrap().as_str(), "v42");
}

#[test]
fn discovery_walks_up_from_nested_directories() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("cachebreak.toml");
    std::fs::write(&config_path, "[token]\nstrategy = \"timestamp\"\n").unwrap();

    let nested = temp.path().join("src").join("views");
    std::fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_config_from(nested).unwrap(), config_path);
}
