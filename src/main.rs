mod app;
mod clipboard;
mod commands;
mod config;
mod display;
mod logging;
mod scope;
mod setup;
mod source;

fn main() {
    if let Err(e) = app::run() {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
