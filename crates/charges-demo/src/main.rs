use std::process::ExitCode;

use anyhow::Result;
use charges_demo::app::DemoApp;
use charges_demo::assets::Assets;
use charges_demo::config::DemoConfig;
use charges_engine::device::GpuInit;
use charges_engine::logging::{init_logging, LoggingConfig};
use charges_engine::window::{LogicalSize, Runtime, RuntimeConfig};

const TITLE: &str = "Drag & Drop (Charges Demo)";

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = DemoConfig::from_env();
    log::debug!("{config:?}");

    let assets = Assets::load()?;
    let app = DemoApp::new(&config, assets);

    let window = RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: window_size(&config),
        ..RuntimeConfig::default()
    };
    Runtime::run(window, GpuInit::default(), app)
}

/// Window size showing the whole canvas at `zoom`.
fn window_size(config: &DemoConfig) -> LogicalSize<f64> {
    let zoom = f64::from(config.zoom);
    LogicalSize::new(
        f64::from(config.canvas_width) * zoom,
        f64::from(config.canvas_height) * zoom,
    )
}
