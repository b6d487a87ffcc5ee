use clap::Parser;
use mood_diary::core::config::{self, CliOverrides, DiaryConfig, StartupLog};
use mood_diary::core::mood::{Mood, resolve_date_arg};
use mood_diary::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mood-diary", about = "Journal your day and get an AI take on your mood")]
struct Args {
    /// Analysis server base URL (the form posts to <URL>/api/analyze)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Mood to preselect
    #[arg(short, long, value_enum)]
    mood: Option<Mood>,

    /// Date to prefill: YYYY-MM-DD or "today"
    #[arg(short, long, value_parser = resolve_date_arg)]
    date: Option<String>,

    /// Config file (default: ~/.mood-diary/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Held until the file logger exists
    let mut startup = StartupLog::new();

    let (file_config, config_error) =
        match config::load_config(args.config.as_deref(), &mut startup) {
            Ok(c) => (c, None),
            Err(e) => {
                eprintln!("Warning: {e}; using defaults");
                (DiaryConfig::default(), Some(e))
            }
        };
    let overrides = CliOverrides {
        base_url: args.base_url,
        mood: args.mood,
        date: args.date,
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_config, &overrides, &mut startup);

    // File logger: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    startup.replay();
    if let Some(e) = config_error {
        log::error!("Config not loaded: {}", e);
    }
    log::info!(
        "Mood diary starting up (endpoint base: {}, mood: {}, date: {:?})",
        resolved.base_url,
        resolved.mood,
        resolved.date
    );

    tui::run(resolved)
}
