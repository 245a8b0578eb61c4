#![deny(warnings)]
#![deny(rust_2018_idioms)]

use processor::{App, Settings};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to load settings: {e}");
            std::process::exit(1);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(&settings.log_level))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {e}");
    }

    info!("starting processor in {:?}", settings.environment);

    if let Err(e) = run(&settings).await {
        error!("processor failed: {e:?}");
        std::process::exit(1);
    }
}

async fn run(settings: &Settings) -> processor::Result<()> {
    let output = App::build(settings)?.run().await?;

    info!(
        "flagged {} of {} vessels",
        output.summary.flagged.len(),
        output.summary.total_vessels
    );

    Ok(())
}
