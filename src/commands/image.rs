//! `image` command: load URLs through one shared loader
//!
//! Duplicate URLs on the command line join the download already in flight,
//! so each distinct URL is fetched once.

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::rc::Rc;
use xsolla_utils::{Config, ImageBrush, LoadError, XsollaContext};

type Outcome = std::result::Result<std::sync::Arc<ImageBrush>, LoadError>;

pub fn run(urls: Vec<String>) -> Result<()> {
    let config = Config::load()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcomes = runtime.block_on(load_all(config, &urls))?;

    let mut failed = 0;
    for (url, outcome) in urls.iter().zip(outcomes) {
        match outcome {
            Some(Ok(brush)) => {
                println!("✓ {} ({}x{})", url, brush.width, brush.height);
                println!("  key: {}", brush.resource_name);
            }
            Some(Err(e)) => {
                failed += 1;
                println!("✗ {}", url);
                println!("  {}", e);
            }
            None => {
                failed += 1;
                println!("✗ {} (no result)", url);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} image(s) failed to load", failed, urls.len());
    }

    Ok(())
}

async fn load_all(config: Config, urls: &[String]) -> Result<Vec<Option<Outcome>>> {
    let mut ctx = XsollaContext::new(config)?;
    let results: Rc<RefCell<Vec<Option<Outcome>>>> =
        Rc::new(RefCell::new(vec![None; urls.len()]));

    let images = ctx.images();
    for (i, url) in urls.iter().enumerate() {
        let on_success = Rc::clone(&results);
        let on_failure = Rc::clone(&results);
        images.request(
            url,
            move |brush| on_success.borrow_mut()[i] = Some(Ok(brush)),
            move |err| on_failure.borrow_mut()[i] = Some(Err(err)),
        );
    }
    images.wait_idle().await;

    let stats = images.stats();
    println!(
        "Loaded {} request(s): {} download(s), {} joined in flight, {} from cache",
        stats.requests, stats.fetches_started, stats.coalesced, stats.cache_hits
    );
    println!();

    let outcomes = results.borrow().clone();
    Ok(outcomes)
}
