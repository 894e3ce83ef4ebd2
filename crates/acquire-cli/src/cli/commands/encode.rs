use anyhow::Result;

/// Print the filesystem-safe name for `url`.
pub fn run_encode(url: &str) -> Result<()> {
    println!("{}", acquire_core::encode(url)?);
    Ok(())
}
