//! Check command: scheme classification only, no I/O.

use acquire_core::scheme::Scheme;

pub fn run_check(url: &str) {
    match Scheme::of(url) {
        Some(scheme) => println!("supported ({})", scheme.prefix()),
        None => println!("unsupported"),
    }
}
