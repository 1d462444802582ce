//! Deduplicating asynchronous resource loader
//!
//! [`ResourceLoader`] downloads each distinct resource at most once at a time,
//! keeps every successfully decoded result for its own lifetime, and notifies
//! every caller that asked for the same resource while the download was in
//! flight.
//!
//! The loader is owned by one thread. Downloads run as tokio tasks and report
//! back through a channel; nothing reaches a caller's continuation until the
//! owner calls [`ResourceLoader::pump`] or awaits
//! [`ResourceLoader::wait_idle`]. Cache hits go through the same queue, so a
//! continuation never runs inside [`ResourceLoader::request`].
//!
//! Per key the state moves `Absent -> Pending -> Cached` on success and
//! `Pending -> Absent` on failure, which makes the next request retry.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use xsolla_utils::{HttpFetcher, ImageLoader, config::ImageLoaderConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Arc::new(HttpFetcher::new(&ImageLoaderConfig::default())?);
//! let mut loader = ImageLoader::images(fetcher);
//!
//! loader.request(
//!     "https://cdn.example.com/item.png",
//!     |brush| println!("{}x{}", brush.width, brush.height),
//!     |err| eprintln!("{}", err),
//! );
//! loader.wait_idle().await;
//! # Ok(())
//! # }
//! ```

use crate::cache_key::CacheKey;
use crate::decode::{Decoder, ImageDecoder};
use crate::error::{Error, LoadError};
use crate::fetch::Fetcher;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub type SuccessCallback<T> = Box<dyn FnOnce(Arc<T>)>;
pub type FailureCallback = Box<dyn FnOnce(LoadError)>;

/// Image flavour of the loader used by the UI layer
pub type ImageLoader = ResourceLoader<ImageDecoder>;

/// A caller waiting for a resource
struct Waiter<T> {
    on_success: SuccessCallback<T>,
    on_failure: FailureCallback,
}

enum Delivery<T> {
    Success(Arc<T>, SuccessCallback<T>),
    Failure(LoadError, FailureCallback),
}

/// Result of a download task, sent back to the owning loader
struct Completion {
    key: CacheKey,
    url: String,
    result: crate::Result<Vec<u8>>,
}

/// Request counters, mostly useful for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderStats {
    pub requests: u64,
    pub cache_hits: u64,
    /// Requests that joined a download already in flight
    pub coalesced: u64,
    pub fetches_started: u64,
    pub fetches_succeeded: u64,
    pub fetches_failed: u64,
}

pub struct ResourceLoader<D: Decoder> {
    fetcher: Arc<dyn Fetcher>,
    decoder: D,
    entries: HashMap<CacheKey, Arc<D::Output>>,
    pending: HashMap<CacheKey, Vec<Waiter<D::Output>>>,
    ready: VecDeque<Delivery<D::Output>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    stats: LoaderStats,
}

impl ImageLoader {
    /// Loader decoding fetched bytes as images
    pub fn images(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(fetcher, ImageDecoder)
    }
}

impl<D: Decoder> ResourceLoader<D> {
    pub fn new(fetcher: Arc<dyn Fetcher>, decoder: D) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            fetcher,
            decoder,
            entries: HashMap::new(),
            pending: HashMap::new(),
            ready: VecDeque::new(),
            completions_tx,
            completions_rx,
            stats: LoaderStats::default(),
        }
    }

    /// Ask for the resource at `url`.
    ///
    /// Exactly one of the continuations runs, later, from [`pump`](Self::pump)
    /// or [`wait_idle`](Self::wait_idle). Only the first request for a key
    /// that is neither cached nor in flight starts a download. Downloads run
    /// on the current tokio runtime; without one the request fails with
    /// [`LoadError::FetchFailed`].
    pub fn request<S, F>(&mut self, url: &str, on_success: S, on_failure: F)
    where
        S: FnOnce(Arc<D::Output>) + 'static,
        F: FnOnce(LoadError) + 'static,
    {
        self.stats.requests += 1;

        let key = match CacheKey::normalize(url) {
            Ok(key) => key,
            Err(err) => {
                warn!("resource request failed: the URL is empty");
                self.ready
                    .push_back(Delivery::Failure(err, Box::new(on_failure)));
                return;
            }
        };

        if let Some(payload) = self.entries.get(&key) {
            debug!(%key, url, "loaded from cache");
            self.stats.cache_hits += 1;
            self.ready
                .push_back(Delivery::Success(Arc::clone(payload), Box::new(on_success)));
            return;
        }

        let waiter = Waiter {
            on_success: Box::new(on_success),
            on_failure: Box::new(on_failure),
        };

        if let Some(waiters) = self.pending.get_mut(&key) {
            debug!(%key, url, waiters = waiters.len() + 1, "joined pending request");
            self.stats.coalesced += 1;
            waiters.push(waiter);
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            error!(%key, url, "cannot load resource outside a tokio runtime");
            self.stats.fetches_failed += 1;
            let err = LoadError::FetchFailed {
                url: url.to_string(),
                reason: "no tokio runtime to run the download on".to_string(),
            };
            self.ready.push_back(Delivery::Failure(err, waiter.on_failure));
            return;
        };

        info!(%key, url, "loading resource");
        self.pending.insert(key.clone(), vec![waiter]);
        self.stats.fetches_started += 1;
        self.spawn_fetch(&runtime, key, url.to_string());
    }

    fn spawn_fetch(&self, runtime: &Handle, key: CacheKey, url: String) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completions_tx.clone();

        runtime.spawn(async move {
            let fetch_url = url.clone();
            // A panicking fetcher still has to complete the request
            let task = tokio::spawn(async move { fetcher.fetch(&fetch_url).await });
            let result = match task.await {
                Ok(result) => result,
                Err(e) => Err(Error::Other(format!("download task failed: {}", e))),
            };
            // The receiver lives as long as the loader; a dropped loader has no waiters left.
            let _ = tx.send(Completion { key, url, result });
        });
    }

    /// Deliver everything that is ready without waiting.
    ///
    /// Returns the number of continuations invoked.
    pub fn pump(&mut self) -> usize {
        let mut delivered = self.drain_ready();

        while let Ok(completion) = self.completions_rx.try_recv() {
            delivered += self.complete(completion);
            delivered += self.drain_ready();
        }

        delivered
    }

    /// Pump until no request is pending and nothing is queued.
    pub async fn wait_idle(&mut self) {
        loop {
            self.pump();
            if self.pending.is_empty() {
                break;
            }

            match self.completions_rx.recv().await {
                Some(completion) => {
                    self.complete(completion);
                }
                None => break,
            }
        }
    }

    /// Request `url` and wait for the outcome.
    ///
    /// Other requests that finish meanwhile are delivered too.
    pub async fn load(&mut self, url: &str) -> Result<Arc<D::Output>, LoadError> {
        let slot: Rc<RefCell<Option<Result<Arc<D::Output>, LoadError>>>> =
            Rc::new(RefCell::new(None));

        let on_success = Rc::clone(&slot);
        let on_failure = Rc::clone(&slot);
        self.request(
            url,
            move |payload| *on_success.borrow_mut() = Some(Ok(payload)),
            move |err| *on_failure.borrow_mut() = Some(Err(err)),
        );

        self.wait_idle().await;

        let outcome = slot.borrow_mut().take();
        outcome.unwrap_or(Err(LoadError::FetchFailed {
            url: url.to_string(),
            reason: "request was never completed".to_string(),
        }))
    }

    fn drain_ready(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(delivery) = self.ready.pop_front() {
            match delivery {
                Delivery::Success(payload, callback) => callback(payload),
                Delivery::Failure(err, callback) => callback(err),
            }
            delivered += 1;
        }
        delivered
    }

    fn complete(&mut self, completion: Completion) -> usize {
        let Completion { key, url, result } = completion;

        let Some(waiters) = self.pending.remove(&key) else {
            warn!(%key, url, "completion for a request that is not pending");
            return 0;
        };

        let outcome = match result {
            Ok(bytes) => self
                .decoder
                .decode(&key, &bytes)
                .map_err(|e| LoadError::DecodeFailed {
                    url: url.clone(),
                    reason: e.to_string(),
                }),
            Err(e) => Err(LoadError::FetchFailed {
                url: url.clone(),
                reason: e.to_string(),
            }),
        };

        let count = waiters.len();
        match outcome {
            Ok(payload) => {
                let payload = Arc::new(payload);
                self.entries.insert(key, Arc::clone(&payload));
                self.stats.fetches_succeeded += 1;

                for waiter in waiters {
                    (waiter.on_success)(Arc::clone(&payload));
                }
            }
            Err(err) => {
                error!(url, waiters = count, "{}", err);
                self.stats.fetches_failed += 1;

                for waiter in waiters {
                    (waiter.on_failure)(err.clone());
                }
            }
        }

        count
    }

    pub fn is_cached(&self, url: &str) -> bool {
        CacheKey::normalize(url).is_ok_and(|key| self.entries.contains_key(&key))
    }

    pub fn is_pending(&self, url: &str) -> bool {
        CacheKey::normalize(url).is_ok_and(|key| self.pending.contains_key(&key))
    }

    /// Cached payload for `url`, without triggering a download
    pub fn cached(&self, url: &str) -> Option<Arc<D::Output>> {
        let key = CacheKey::normalize(url).ok()?;
        self.entries.get(&key).cloned()
    }

    pub fn cached_len(&self) -> usize {
        self.entries.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> LoaderStats {
        self.stats
    }
}
