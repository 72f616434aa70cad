use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logistik_center::infrastructure::{config, seed, server, AppState};
use logistik_center::infrastructure::state::DemoData;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logistik_center=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();
    tracing::info!(
        "Policies: overlap={:?}, return={:?}",
        config.overlap_policy,
        config.return_policy
    );

    let state = AppState::new(DemoData::default(), config.policies());

    // Check for seed flag
    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        seed::seed_demo_data(&state).await;
    }

    if let Err(e) = server::run(state, &config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
