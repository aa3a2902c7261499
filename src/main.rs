use clap::Parser;
use swingchart::cli::Args;
use swingchart::config::{config_path, load_config};
use swingchart::data::time::parse_timezone;
use swingchart::pipeline::load_series;
use swingchart::ui::{self, render_report, Chart, StatusBar};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let path = args.config.clone().unwrap_or_else(config_path);
    let config = args.apply(load_config(&path)?.with_env_credentials());
    let timezone = parse_timezone(&config.timezone)?;
    log::info!(
        "Analysing {} {} from {} to {} ({})",
        config.symbol,
        config.interval,
        config.start_date,
        config.end_date,
        config.timezone
    );

    let series = load_series(&config).await?;

    if args.print {
        let points = series.swing_points();
        print!(
            "{}",
            render_report(&config.symbol, config.interval.as_str(), &points, timezone)
        );
        return Ok(());
    }

    let statusbar = StatusBar::new(
        series.candles.len(),
        format!("{} - {}", config.start_date, config.end_date),
        config.timezone.clone(),
    );
    let chart = Chart::new(
        config.symbol,
        config.interval,
        timezone,
        series.candles,
        series.tags,
    );
    ui::run(chart, statusbar)?;
    Ok(())
}
