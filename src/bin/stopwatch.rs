use stopwatch::{
    app::{App, AppRequest},
    config::TickConfig,
    gui::Gui,
};

use anyhow::{Context, Error, Result};
use eframe::egui;
use log::info;

use std::{env, sync::mpsc};

fn main() -> Result<()> {
    env_logger::init();

    let config = TickConfig::from_args(env::args().skip(1)).context("Invalid arguments")?;
    info!("Starting with {:?}", config);

    let (app_tx, gui_rx) = mpsc::channel();
    let (gui_tx, app_rx) = mpsc::channel();

    let app_request_tx = gui_tx.clone();
    let shutdown_tx = gui_tx.clone();
    let app_thread = std::thread::spawn(move || {
        let mut app = App::new(app_tx, app_request_tx, app_rx, config);
        app.run();
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stopwatch")
            .with_inner_size([480.0, 720.0]),
        ..Default::default()
    };

    let gui_result = eframe::run_native(
        "Stopwatch",
        native_options,
        Box::new(move |cc| Box::new(Gui::new(gui_tx, gui_rx, cc))),
    );

    // The gui requests shutdown when dropped, but it may never have been created
    let _ = shutdown_tx.send(AppRequest::Shutdown);

    app_thread
        .join()
        .map_err(|_| Error::msg("App thread panicked"))?;

    gui_result.map_err(|e| Error::msg(e.to_string()))
}
