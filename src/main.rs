// Items in the shared modules are partly only used by the library and its tests
#![allow(dead_code)]

use color_eyre::Result;

mod action;
mod app;
mod cli;
mod components;
mod config;
mod domain;
mod errors;
mod infra;
mod logging;
mod tui;

fn main() -> Result<()> {
    errors::install_hooks()?;

    let args = cli::Args::parse_args();

    if let Some(ref data_dir) = args.data_dir {
        // SAFETY: This is called at program startup before any other threads exist
        unsafe {
            std::env::set_var("STACKS_WALLET_DATA", data_dir);
        }
    }

    logging::init()?;

    // The runtime is built only after the environment is settled
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut app = app::App::new(&args)?;
        app.run().await
    })
}
