//! One-shot QA pass over the job tracker database: deactivates dead or
//! unclassifiable postings, reclassifies roles and fills in locations.

use anyhow::{Context, Result};
use tracing::info;

use scout::config::QaConfig;
use scout::db::create_pool;
use scout::llm_client::{self, LlmClient};
use scout::qa::classifier::LinearTitleModel;
use scout::qa::fetch::HttpFetcher;
use scout::qa::runner::{QaRunner, QaSettings};
use scout::qa::store::PgJobStore;
use scout::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let config = QaConfig::from_env()?;

    init_tracing(&config.rust_log);

    info!("Starting job QA v{}", env!("CARGO_PKG_VERSION"));

    let pool = create_pool(&config.database_url).await?;
    let store = PgJobStore::new(pool);

    let fetcher = HttpFetcher::new(config.liveness_timeout)?;

    let llm = LlmClient::new(config.llm.api_key.clone(), config.llm.base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let classifier = match &config.role_model_path {
        Some(path) => {
            let model = LinearTitleModel::load(path)
                .with_context(|| format!("Failed to load role model from {}", path.display()))?;
            info!("Role classifier loaded from {}", path.display());
            Some(model)
        }
        None => {
            info!("ROLE_MODEL_PATH not set; role reclassification disabled");
            None
        }
    };

    let settings = QaSettings {
        activity_checks: config.activity_checks,
        company_delay: config.company_delay,
    };

    let mut runner = QaRunner::new(&store, &fetcher, &llm, settings);
    if let Some(model) = &classifier {
        runner = runner.with_classifier(model);
    }

    let report = runner.run().await?;

    info!("{}", report.summary());
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
