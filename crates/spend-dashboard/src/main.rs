mod bootstrap;
mod export;

use anyhow::{Context, Result};
use spend_core::settings::Settings;
use spend_data::dashboard::{Dashboard, DashboardQuery};
use spend_data::reader::load_expenses;
use spend_ui::app::App;
use tracing::{info, warn};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    // The TUI owns the terminal, so its logs go to a file unless told otherwise.
    let log_file = match (&settings.log_file, settings.view.as_str()) {
        (Some(path), _) => Some(path.clone()),
        (None, "dashboard") => Some(bootstrap::default_log_file()),
        (None, _) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_ref())?;

    info!("Spending dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "File: {}, View: {}, Theme: {}",
        settings.file.display(),
        settings.view,
        settings.theme
    );

    let range = settings.date_range()?;
    let records = load_expenses(&settings.file)
        .with_context(|| format!("loading {}", settings.file.display()))?;
    let dashboard = Dashboard::new(records);

    let categories = settings.initial_categories(dashboard.categories());
    if categories.is_empty() {
        warn!("No categories selected; charts start empty");
    }
    let query = DashboardQuery {
        categories,
        start: range.start(),
        end: range.end(),
        window_days: settings.window,
    };

    match settings.view.as_str() {
        "json" => export::export_json(dashboard.records(), &query, settings.output.as_deref())?,
        _ => {
            let source = settings
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| settings.file.display().to_string());
            App::new(&settings.theme, dashboard, source, query).run()?;
        }
    }

    info!("Spending dashboard finished");
    Ok(())
}
