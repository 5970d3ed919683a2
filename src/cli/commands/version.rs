use crate::api::{API_VERSION, BASE_URL};

/// Execute version command
pub fn execute() {
    println!("fsreg {}", env!("CARGO_PKG_VERSION"));
    println!("Financial Services Register API {} ({})", API_VERSION, BASE_URL);
    println!();
    println!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
}
