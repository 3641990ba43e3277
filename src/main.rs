mod app;
mod compositor;
mod config;
mod models;
mod session;
mod ui;
mod utils;

use std::io::{BufRead, Write};
use std::panic;

use clap::Parser;
use eframe::egui;

use crate::app::ReviewApp;
use crate::config::ReviewConfig;

/// Keep the console alive until the error has been seen. Without this a
/// double-clicked run loses its trace when the window closes.
fn pause_for_ack() {
    eprintln!();
    eprintln!("!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!");
    eprintln!("the run went wrong!");
    eprintln!("copy or screenshot the error above");
    eprint!("press Enter to close the window...");
    std::io::stderr().flush().ok();
    let mut ack = String::new();
    std::io::stdin().lock().read_line(&mut ack).ok();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        default_hook(panic_info);
        eprintln!("{:?}", backtrace::Backtrace::new());
        pause_for_ack();
    }));

    let config = ReviewConfig::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_title("label filter"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "label filter",
        options,
        Box::new(move |_cc| Ok(Box::new(ReviewApp::new(config)))),
    ) {
        log::error!("error running native application: {e}");
        pause_for_ack();
    }
}
