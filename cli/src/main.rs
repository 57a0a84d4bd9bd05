use kiwi_cli::run_cli;
use std::io::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    run_cli().await
}
