use anyhow::Result;
use xsolla_utils::CacheKey;

pub fn run(url: &str) -> Result<()> {
    let key = CacheKey::normalize(url)?;
    println!("{}", key);
    Ok(())
}
