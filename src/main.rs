mod app;
mod config;
mod drawing;
mod export;
mod form;
mod geometry;
mod interaction;
mod kopernicus;
mod orbit;
mod preview;
mod projection;
mod settings;
mod smoothing;
mod view;

use app::App;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Planet Forge",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}
