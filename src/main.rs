//! Developer Activity Dashboard
//!
//! A GUI application showing active developer trends and commit leaderboards.

use anyhow::Context;
use eframe::egui;
use log::{error, info, LevelFilter};
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

use devboard::app::{App, AppWrapper};
use devboard::config::Config;
use devboard::fetch::SourceClient;
use devboard::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Info);

    let config = Config::load().context("Failed to load configuration")?;
    let rt = Runtime::new().context("Failed to start async runtime")?;

    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title("Developer Activity"),
            ..Default::default()
        };

        if let Err(e) = eframe::run_native(
            "Developer Activity",
            options,
            Box::new(move |cc| {
                let app = Arc::new(Mutex::new(App::new(&config)));
                spawn_loaders(SourceClient::new(&config.sources), Arc::clone(&app), cc.egui_ctx.clone());
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        ) {
            error!("Error running application: {}", e);
        }
    });

    info!("Dashboard closed");
    Ok(())
}

/// Start both fetches; each one updates its own dataset when it finishes.
fn spawn_loaders(client: SourceClient, app: Arc<Mutex<App>>, ctx: egui::Context) {
    {
        let client = client.clone();
        let app = Arc::clone(&app);
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let result = client.fetch_ledger().await;
            if let Err(e) = &result {
                error!("Error fetching commit data: {}", e);
            }
            match app.lock() {
                Ok(mut app) => app.apply_ledger(result),
                Err(_) => error!("Failed to acquire app lock after ledger fetch"),
            }
            ctx.request_repaint();
        });
    }

    tokio::spawn(async move {
        let result = client.fetch_active_devs().await;
        if let Err(e) = &result {
            error!("Error fetching active developer data: {}", e);
        }
        match app.lock() {
            Ok(mut app) => app.apply_active_devs(result),
            Err(_) => error!("Failed to acquire app lock after active developer fetch"),
        }
        ctx.request_repaint();
    });
}
