use image::{Rgb, RgbImage};
use mtg_proxies::clients::ScryfallClient;
use mtg_proxies::error::{ApiError, AppError};
use mtg_proxies::{resolve, CardEntry, CardFace, Config, Decklist, ImageResolver, ImageUris, ScanCache};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn cache_in(dir: &TempDir) -> ScanCache {
    let config = Config {
        cache_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let client = Arc::new(ScryfallClient::new(&config).unwrap());
    ScanCache::new(client, config.cache_dir)
}

/// 预先放入缓存目录，模拟已经下载过的卡图
fn precache(cache: &ScanCache, url: &str) -> PathBuf {
    let path = cache.cache_path(url).unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_pixel(4, 4, Rgb([9, 9, 9])).save(&path).unwrap();
    path
}

#[tokio::test]
async fn disk_hit_skips_download() {
    let dir = TempDir::new().unwrap();
    let cache = cache_in(&dir);
    let url = "https://cards.scryfall.io/png/front/1/2/bolt.png?1234";
    let expected = precache(&cache, url);

    let first = cache.get_image(url).await.unwrap();
    let second = cache.get_image(url).await.unwrap();

    assert_eq!(first.as_ref(), expected.as_path());
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn orchestrates_with_cached_scans() {
    let dir = TempDir::new().unwrap();
    let cache = cache_in(&dir);
    let front = "https://cards.scryfall.io/png/front/d/e/delver.png";
    let back = "https://cards.scryfall.io/png/back/d/e/delver.png";
    let front_path = precache(&cache, front);
    let back_path = precache(&cache, back);

    let deck = Decklist::new(vec![CardEntry::new(
        2,
        "Delver of Secrets // Insectile Aberration",
        vec![
            CardFace::new("Delver of Secrets", ImageUris::png(front)),
            CardFace::new("Insectile Aberration", ImageUris::png(back)),
        ],
    )]);

    let sequences = resolve(&deck, &cache, true).await.unwrap();

    assert_eq!(sequences.len(), 2);
    assert!(sequences[0].iter().all(|p| p.as_ref() == front_path.as_path()));
    assert!(sequences[1].iter().all(|p| p.as_ref() == back_path.as_path()));
    assert_eq!(sequences[0].len(), 2);
}

#[tokio::test]
async fn unreachable_url_fails() {
    let dir = TempDir::new().unwrap();
    let cache = cache_in(&dir);

    let err = cache
        .get_image("http://127.0.0.1:9/png/front/missing.png")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Api(ApiError::RequestFailed { .. }) | AppError::Api(ApiError::BadStatus { .. })
    ));
    assert!(!cache
        .cache_path("http://127.0.0.1:9/png/front/missing.png")
        .unwrap()
        .exists());
}
