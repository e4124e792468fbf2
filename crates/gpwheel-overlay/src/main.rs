use gpwheel::catalog::Catalog;
use gpwheel::prefs::{FileStore, Preferences, SettingsStore};
use gpwheel_overlay::config;
use gpwheel_overlay::gui::app::{AppInit, AppModel};
use gpwheel_overlay::sys::runtime;
use parking_lot::RwLock;
use relm4::prelude::*;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let catalog = Arc::new(Catalog::builtin()?);
    let config = config::load_or_setup();
    let store = FileStore::open_default(catalog.clone())?;
    let prefs = store.load().unwrap_or_else(|e| {
        log::error!("Failed to load preferences, using defaults: {}", e);
        Preferences::defaults(&catalog)
    });
    let prefs = Arc::new(RwLock::new(prefs));

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, store, prefs.clone());

    let app = RelmApp::new("org.gpwheel.overlay");

    app.run::<AppModel>(AppInit {
        catalog,
        config,
        prefs,
        rx,
    });
    Ok(())
}
