use std::path::Path;

use anyhow::{bail, Context};
use enhancer_core::{PaneView, PickedFile};

use super::config::load_config;
use super::effects::EffectRunner;
use super::headless::HeadlessApp;
use super::logging::{self, LogDestination};

const USAGE: &str = "usage: enhancer_app <image-path> [endpoint]";

/// Selects the image, submits it, and waits for the endpoint's answer.
pub fn run_app() -> anyhow::Result<()> {
    let config = load_config(Path::new("."));
    logging::initialize(if config.log_to_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    });

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        bail!(USAGE);
    };
    let mut settings = config.enhance_settings();
    if let Some(endpoint) = args.next() {
        settings.endpoint = endpoint;
    }

    let bytes = std::fs::read(&image_path).with_context(|| format!("reading {image_path}"))?;
    let name = Path::new(&image_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_path.clone());

    let runner = EffectRunner::new(settings).context("starting engine")?;
    let mut app = HeadlessApp::new(runner)?;
    app.select_file(Some(PickedFile::new(name, bytes)));
    app.click_enhance();
    app.settle(None);

    let view = app.controller().view();
    println!("{}", view.status);
    match view.result {
        PaneView::Image { src, .. } => {
            println!("{src}");
            Ok(())
        }
        PaneView::Placeholder { .. } => bail!("{}", view.status),
    }
}
