use fsreg::cli;

#[tokio::main]
async fn main() {
    // the CLI has already reported the error
    if cli::Cli::run().await.is_err() {
        std::process::exit(1);
    }
}
