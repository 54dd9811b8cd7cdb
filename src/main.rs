mod app;
mod config;
mod library;
mod mpris;
mod runtime;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
