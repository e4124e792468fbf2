use crate::events::AppEvent;
use async_channel::Sender;
use gpwheel::prefs::{FileStore, Preferences};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(
    tx: Sender<AppEvent>,
    store: FileStore,
    prefs: Arc<RwLock<Preferences>>,
) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx, store, prefs).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
