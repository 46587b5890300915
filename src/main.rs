use quote_chart::app::QuoteApp;
use quote_chart::gpu_backend;
use quote_chart::settings::Config;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quote_chart=info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = Config::load_default();
    tracing::info!("running eframe::run_native");
    eframe::run_native(
        "Stock Market",
        gpu_backend::native_options(&config.picker),
        Box::new(move |cc| Ok(Box::new(QuoteApp::new(cc, config)))),
    )
}
