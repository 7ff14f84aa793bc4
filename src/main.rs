use clap::Parser;
use reelpress::StartView;
use reelpress::core::config::{ReelConfig, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "reelpress", about = "Browse TMDB and write posts about it")]
struct Args {
    /// Screen to open first
    #[arg(short, long, value_enum)]
    view: Option<StartView>,

    /// Open the editor on an existing post
    #[arg(short, long, value_name = "POST_ID")]
    edit: Option<String>,

    /// Log level written to reelpress.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to reelpress.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("reelpress.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        ReelConfig::default()
    });
    let config = resolve(&file_config, args.view);

    log::info!(
        "reelpress starting (view: {:?}, signed in: {})",
        config.start_view,
        config.user_id.is_some()
    );

    reelpress::tui::run(config, args.edit)
}
