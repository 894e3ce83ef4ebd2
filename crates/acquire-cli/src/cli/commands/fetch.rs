//! Fetch command: stage a URL, then print it or hand back its path.

use acquire_core::config::AcquireConfig;
use acquire_core::net::CurlTransport;
use acquire_core::{AcquireError, Stager};
use anyhow::{Context, Result};
use std::fs::File;
use std::io;

/// Stage `url`. With `keep`, print the file path and leave the directory in
/// place; otherwise copy the file to stdout and destroy the directory.
pub fn run_fetch(cfg: &AcquireConfig, url: &str, keep: bool) -> Result<()> {
    let mut stager = Stager::new(CurlTransport::new(cfg.transport_options()));
    if let Some(root) = &cfg.temp_root {
        stager = stager.with_root(root);
    }

    let staged = stager.stage(url)?;
    tracing::info!(url, path = %staged.file().display(), "staged");

    if keep {
        println!("{}", staged.keep().display());
        return Ok(());
    }

    let copied = File::open(staged.file())
        .and_then(|mut f| io::copy(&mut f, &mut io::stdout().lock()))
        .with_context(|| format!("read {}", staged.file().display()));
    settle(copied, staged.destroy())
}

/// Combines the copy outcome with the cleanup outcome; neither error is dropped.
fn settle(copied: Result<u64>, destroyed: Result<(), AcquireError>) -> Result<()> {
    match (copied, destroyed) {
        (Ok(_), Ok(())) => Ok(()),
        (Err(copy), Ok(())) => Err(copy),
        (Ok(_), Err(cleanup)) => Err(cleanup.into()),
        (Err(copy), Err(cleanup)) => Err(copy.context(cleanup.to_string())),
    }
}
