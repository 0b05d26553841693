#![deny(
    clippy::all,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic)]

mod app;
use confy::ConfyError;
mod config;
mod format;
mod input;
mod logging;
mod render;

use app::App;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config")]
    Load(#[from] ConfyError),

    #[error("invalid account data")]
    Accounts(#[from] bankist_lib::accounts::Error),

    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let app = App::from_cli();

    if let Err(e) = app.run().await {
        eprintln!("{}", e);
        if let Some(source) = std::error::Error::source(&e) {
            eprintln!("  caused by: {}", source);
        }
        std::process::exit(1);
    }
}
