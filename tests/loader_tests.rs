//! End-to-end tests for the deduplicating image loader


use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use test_utils::{png_bytes, StubFetcher, TestEnv};
use xsolla_utils::config::ImageLoaderConfig;
use xsolla_utils::{CacheKey, HttpFetcher, ImageBrush, ImageLoader, LoadError};

type Events = Rc<RefCell<Vec<Result<Arc<ImageBrush>, LoadError>>>>;

/// Request `url` and record the outcome in `events`
fn request(loader: &mut ImageLoader, url: &str, events: &Events) {
    let ok = Rc::clone(events);
    let err = Rc::clone(events);
    loader.request(
        url,
        move |brush| ok.borrow_mut().push(Ok(brush)),
        move |e| err.borrow_mut().push(Err(e)),
    );
}

#[tokio::test]
async fn test_same_url_twice_fetches_once() {
    let fetcher = Arc::new(
        StubFetcher::new().with_body("http://ex/a.png", png_bytes(2, 2, [255, 0, 0, 255])),
    );
    let mut loader = ImageLoader::images(fetcher.clone());
    let events: Events = Rc::default();

    request(&mut loader, "http://ex/a.png", &events);
    request(&mut loader, "http://ex/a.png", &events);
    assert!(events.borrow().is_empty(), "nothing is delivered synchronously");

    loader.wait_idle().await;

    assert_eq!(fetcher.calls("http://ex/a.png"), 1);
    let events = events.borrow();
    assert_eq!(events.len(), 2);

    let first = events[0].as_ref().unwrap();
    let second = events[1].as_ref().unwrap();
    assert!(Arc::ptr_eq(first, second));
    assert_eq!(first.size(), (2, 2));
    assert_eq!(
        first.resource_name,
        CacheKey::normalize("http://ex/a.png").unwrap().as_str()
    );
    assert!(loader.is_cached("http://ex/a.png"));
}

#[tokio::test]
async fn test_cached_url_is_not_fetched_again() {
    let fetcher = Arc::new(
        StubFetcher::new().with_body("http://ex/a.png", png_bytes(1, 1, [0, 0, 0, 255])),
    );
    let mut loader = ImageLoader::images(fetcher.clone());

    let first = loader.load("http://ex/a.png").await.unwrap();
    let second = loader.load("http://ex/a.png").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fetcher.total_calls(), 1);
    assert_eq!(loader.stats().cache_hits, 1);
}

#[tokio::test]
async fn test_malformed_image_fails_and_is_refetched() {
    let fetcher =
        Arc::new(StubFetcher::new().with_body("http://ex/bad.png", b"not an image".to_vec()));
    let mut loader = ImageLoader::images(fetcher.clone());
    let events: Events = Rc::default();

    request(&mut loader, "http://ex/bad.png", &events);
    loader.wait_idle().await;

    {
        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Err(LoadError::DecodeFailed { ref url, .. }) if url == "http://ex/bad.png"
        ));
    }
    assert!(!loader.is_cached("http://ex/bad.png"));
    assert_eq!(loader.cached_len(), 0);

    request(&mut loader, "http://ex/bad.png", &events);
    loader.wait_idle().await;

    assert_eq!(fetcher.calls("http://ex/bad.png"), 2);
    assert_eq!(events.borrow().len(), 2);
}

#[tokio::test]
async fn test_fetch_failure_reaches_every_waiter() {
    let fetcher = Arc::new(StubFetcher::new());
    let mut loader = ImageLoader::images(fetcher.clone());
    let events: Events = Rc::default();

    for _ in 0..3 {
        request(&mut loader, "http://ex/missing.png", &events);
    }
    assert_eq!(loader.pending_len(), 1);
    loader.wait_idle().await;

    assert_eq!(fetcher.total_calls(), 1);
    let events = events.borrow();
    assert_eq!(events.len(), 3);
    for event in events.iter() {
        let err = event.as_ref().unwrap_err();
        assert!(matches!(err, LoadError::FetchFailed { .. }));
        assert!(err.to_string().contains("HTTP 404"));
    }
    assert_eq!(loader.pending_len(), 0);
}

#[tokio::test]
async fn test_distinct_urls_load_independently() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_body("http://ex/a.png", png_bytes(1, 1, [1, 1, 1, 255]))
            .with_body("http://ex/b.png", png_bytes(3, 1, [2, 2, 2, 255])),
    );
    let mut loader = ImageLoader::images(fetcher.clone());
    let events: Events = Rc::default();

    request(&mut loader, "http://ex/a.png", &events);
    request(&mut loader, "http://ex/b.png", &events);
    request(&mut loader, "http://ex/bad.png", &events);
    loader.wait_idle().await;

    assert_eq!(fetcher.total_calls(), 3);
    assert_eq!(loader.cached_len(), 2);
    assert_eq!(loader.cached("http://ex/b.png").unwrap().size(), (3, 1));

    let stats = loader.stats();
    assert_eq!(stats.fetches_started, 3);
    assert_eq!(stats.fetches_succeeded, 2);
    assert_eq!(stats.fetches_failed, 1);
}

#[tokio::test]
async fn test_empty_url_fails_without_fetching() {
    let fetcher = Arc::new(StubFetcher::new());
    let mut loader = ImageLoader::images(fetcher.clone());

    let err = loader.load("").await.unwrap_err();
    assert_eq!(err, LoadError::EmptyKey);
    assert_eq!(fetcher.total_calls(), 0);
}

#[tokio::test]
async fn test_http_fetcher_downloads_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/a.png")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(png_bytes(4, 3, [0, 128, 255, 255]))
        .expect(1)
        .create_async()
        .await;

    let fetcher = Arc::new(HttpFetcher::new(&ImageLoaderConfig::default()).unwrap());
    let mut loader = ImageLoader::images(fetcher);
    let events: Events = Rc::default();

    let url = format!("{}/a.png", server.url());
    request(&mut loader, &url, &events);
    request(&mut loader, &url, &events);
    loader.wait_idle().await;

    mock.assert_async().await;
    let events = events.borrow();
    assert_eq!(events.len(), 2);
    let brush = events[0].as_ref().unwrap();
    assert_eq!(brush.size(), (4, 3));
    // BGRA
    assert_eq!(&brush.pixels[..4], &[255, 128, 0, 255]);
}

#[tokio::test]
async fn test_http_error_status_is_not_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/gone.png")
        .with_status(500)
        .expect(2)
        .create_async()
        .await;

    let fetcher = Arc::new(HttpFetcher::new(&ImageLoaderConfig::default()).unwrap());
    let mut loader = ImageLoader::images(fetcher);
    let url = format!("{}/gone.png", server.url());

    let err = loader.load(&url).await.unwrap_err();
    assert!(err.to_string().contains("HTTP 500"));
    assert!(loader.load(&url).await.is_err());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_file_url_loads_local_image() {
    let env = TestEnv::new();
    let path = env.write_file("icon.png", &png_bytes(5, 5, [9, 9, 9, 255]));
    let url = url::Url::from_file_path(&path).unwrap();

    let fetcher = Arc::new(HttpFetcher::new(&ImageLoaderConfig::default()).unwrap());
    let mut loader = ImageLoader::images(fetcher);
    let brush = loader.load(url.as_str()).await.unwrap();
    assert_eq!(brush.size(), (5, 5));
}
