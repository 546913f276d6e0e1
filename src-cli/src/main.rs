//! Spatial Render - print a persisted spatial math page as braille lines
//!
//! Page geometry and script come from `spatial-settings.json` in the
//! settings directory (the current directory by default). A missing
//! settings file is created with the defaults.

use anyhow::{Context, Result};
use clap::Parser;
use spatial_layout::{FormatContext, Grid, PageRecord};
use spatial_model::{render_lines, PassThrough, SettingsManager};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about, arg_required_else_help = true)]
struct Args {
    /// Page JSON to render
    page: PathBuf,
    /// Directory holding spatial-settings.json
    settings_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings_dir = args.settings_dir.unwrap_or_else(|| PathBuf::from("."));

    let mut settings = SettingsManager::new(&settings_dir);
    let existed = settings.settings_path().exists();
    let settings_path = settings.settings_path().to_path_buf();
    settings
        .load_sync()
        .with_context(|| format!("reading {}", settings_path.display()))?;
    if !existed {
        settings
            .save_sync()
            .with_context(|| format!("writing {}", settings.settings_path().display()))?;
        tracing::info!("Wrote default settings to {:?}", settings.settings_path());
    }

    let text = std::fs::read_to_string(&args.page)
        .with_context(|| format!("reading {}", args.page.display()))?;
    let record = PageRecord::from_json(&text)
        .with_context(|| format!("loading page {}", args.page.display()))?;
    tracing::debug!("Loaded page version {}", record.version);

    let config = &settings.current().layout;
    let ctx = FormatContext::new(config, &PassThrough);
    let mut grid = Grid::from_record(record.grid);
    grid.format(&ctx).context("formatting page")?;

    println!("{}", render_lines(grid.lines()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_settings_dir_is_optional() {
        let args = Args::try_parse_from(["spatial-render", "page.json"]).unwrap();
        assert_eq!(args.page, PathBuf::from("page.json"));
        assert!(args.settings_dir.is_none());

        let args = Args::try_parse_from(["spatial-render", "page.json", "conf"]).unwrap();
        assert_eq!(args.settings_dir, Some(PathBuf::from("conf")));
    }

    #[test]
    fn test_page_is_required() {
        assert!(Args::try_parse_from(["spatial-render"]).is_err());
    }
}
