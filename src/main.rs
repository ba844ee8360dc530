use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use scopelens::cli::{CliArgs, OutputMode};
use scopelens::render::{render_json, Renderer};
use scopelens::runtime::Runtime;
use scopelens::theme::{self, Theme, ThemeSource};
use scopelens::{AppModel, ScopelensConfig};

/// How often the loading indicator is refreshed while the engine works
const TICK: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    scopelens::tracing::init();

    let args = CliArgs::parse();
    let mut stdout = io::stdout().lock();

    if args.list_themes {
        for info in theme::list_available_themes() {
            let source = match info.source {
                ThemeSource::User => "user",
                ThemeSource::Builtin => "builtin",
            };
            writeln!(stdout, "{:<24} {} ({})", info.id, info.name, source)?;
        }
        return Ok(());
    }

    let config = ScopelensConfig::load();
    let request = args.request(&config);
    let mode = args.output_mode();
    tracing::debug!("Starting highlight run: {:?}", request);

    // Colors for the surrounding UI; token colors come from the run itself
    let ui_theme = theme::load_theme(&request.theme).unwrap_or_else(|e| {
        tracing::warn!("Falling back to default UI theme: {}", e);
        Theme::default_theme()
    });

    let (model, cmd) = AppModel::init(config.projection_policy(), request);
    let mut runtime = Runtime::new(model);

    let mut shown_loading = false;
    runtime.run_until_settled(cmd, TICK, |model| {
        if shown_loading || !matches!(mode, OutputMode::Terminal { .. }) {
            return;
        }
        let color = matches!(mode, OutputMode::Terminal { color: true });
        let mut stderr = io::stderr().lock();
        if Renderer::new(&ui_theme, color)
            .render_status(&mut stderr, model)
            .is_ok()
        {
            shown_loading = true;
        }
    });

    match mode {
        OutputMode::Json => {
            if let Some(message) = runtime.model.error() {
                anyhow::bail!("{}", message);
            }
            render_json(&mut stdout, &runtime.model).context("Failed to write JSON")?;
        }
        OutputMode::Terminal { color } => {
            Renderer::new(&ui_theme, color)
                .render(&mut stdout, &runtime.model)
                .context("Failed to write output")?;
        }
    }

    Ok(())
}
