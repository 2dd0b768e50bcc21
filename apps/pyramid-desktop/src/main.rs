mod app;
mod overlay;

use anyhow::{Context, Result};
use clap::Parser;
use pyramid_common::ViewerConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "pyramid-desktop", about = "Render a pyramid orbited with the mouse")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer configuration file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial window width, overrides the config file
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height, overrides the config file
    #[arg(long)]
    height: Option<u32>,
}

impl Cli {
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = cli.viewer_config()?;
    tracing::info!(
        "pyramid-desktop starting ({}x{})",
        config.window.width,
        config.window.height
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::ViewerApp::new(config);
    event_loop.run_app(&mut app)?;

    app.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_window_size() {
        let cli = Cli::parse_from(["pyramid-desktop", "--width", "1024", "--height", "768"]);
        let config = cli.viewer_config().unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
    }

    #[test]
    fn zero_size_override_rejected() {
        let cli = Cli::parse_from(["pyramid-desktop", "--width", "0"]);
        assert!(cli.viewer_config().is_err());
    }

    #[test]
    fn missing_config_file_reported() {
        let cli = Cli::parse_from(["pyramid-desktop", "-c", "/nonexistent/viewer.yaml"]);
        let err = cli.viewer_config().unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
