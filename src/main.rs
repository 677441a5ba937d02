use anyhow::Result;
use cookbook_core::config::{AppConfig, OutputFormat};
use cookbook_core::errors::error_logging::log_config_error;
use cookbook_core::errors::AppError;
use cookbook_core::observability;
use cookbook_core::observability_config::ObservabilityConfig;
use cookbook_core::recipe_source;
use cookbook_core::scaling;
use cookbook_core::shopping_list::{generate_shopping_list, render_text};
use tracing::{error, info};

/// Build and validate configuration from the environment and command line
fn load_config() -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;

    // A path on the command line wins over RECIPES_PATH
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_recipes_path(path);
    }

    config.validate()?;
    Ok(config)
}

fn run(config: &AppConfig) -> Result<()> {
    let Some(path) = config.recipes_path.as_ref() else {
        return Err(anyhow::anyhow!("No recipes file configured"));
    };

    let mut recipes = recipe_source::load_recipes(path)?;

    if config.needs_scaling() {
        info!(scale_factor = config.scale_factor, "Scaling recipes");
        recipes = recipes
            .iter()
            .map(|recipe| scaling::scale_recipe(recipe, config.scale_factor))
            .collect();
    }

    let shopping_list = generate_shopping_list(&recipes);

    match config.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shopping_list)?),
        OutputFormat::Text => print!("{}", render_text(&shopping_list)),
    }

    Ok(())
}

fn error_kind(error: &anyhow::Error) -> &'static str {
    error
        .downcast_ref::<AppError>()
        .map(AppError::kind)
        .unwrap_or("internal")
}

fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    // Tracing comes up before the full config so its errors are visible
    let tracing_config = ObservabilityConfig::from_env();
    let tracing_config = match tracing_config.validate() {
        Ok(()) => tracing_config,
        Err(_) => ObservabilityConfig::default(),
    };
    observability::init_tracing_with_config(&tracing_config)?;

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log_config_error(&e, "startup", "load_config");
            observability::record_error_metrics(error_kind(&e), "main");
            return Err(e);
        }
    };
    info!("{}", config.summary());

    if let Err(e) = run(&config) {
        error!(error = %e, "Failed to build shopping list");
        observability::record_error_metrics(error_kind(&e), "main");
        return Err(e);
    }

    Ok(())
}
