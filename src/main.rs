use std::path::PathBuf;
use std::sync::Arc;

use content_console::models::{ActiveFilter, SortDirection, SortSpec};
use content_console::{ConsoleConfig, HttpContentApi, SearchStateController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config_path = std::env::var("CONSOLE_CONFIG").ok().map(PathBuf::from);
    let config = ConsoleConfig::load(config_path.as_deref()).await?;
    tracing::info!("Using content API at {}", config.api_base_url);

    let api = Arc::new(HttpContentApi::from_config(&config)?);
    let controller = SearchStateController::new(api, &config);

    // 搜索条件来自环境变量，便于在命令行直接试查询
    let title = std::env::var("CONSOLE_SEARCH_TITLE").unwrap_or_default();
    let include_inactive = std::env::var("CONSOLE_SEARCH_ALL").is_ok();
    let sort = std::env::var("CONSOLE_SEARCH_SORT")
        .ok()
        .map(|column| SortSpec::new(column, SortDirection::Asc));

    controller
        .update_criteria(|criteria| {
            criteria.title = title;
            criteria.sort = sort;
            if include_inactive {
                criteria.active = ActiveFilter::All;
            }
        })
        .await?;

    let snapshot = controller.snapshot().await;
    tracing::info!(
        "Loaded {} of {} contents (page {})",
        snapshot.loaded_results.len(),
        snapshot.total_count,
        snapshot.page + 1
    );
    println!("{}", serde_json::to_string_pretty(&snapshot.display_results)?);

    Ok(())
}
