use clap::Parser;
use eframe::egui;
use filechooser::app::FileChooserApp;
use filechooser::config::Config;
use std::env;
use std::path::PathBuf;

/// Browse directories and pick one or more files. Chosen paths are printed
/// to stdout, one per line.
#[derive(Parser)]
#[command(name = "filechooser", version)]
struct Cli {
    /// Directory to start in
    path: Option<PathBuf>,

    /// Show hidden files
    #[arg(long)]
    show_hidden: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Err(e) = Config::create_default() {
        tracing::warn!("Could not write default config: {}", e);
    }
    let mut config = Config::load();
    if cli.show_hidden {
        config.ui.show_hidden = true;
    }

    // Command line, then config, then Home, then the current directory
    let start_path = cli
        .path
        .or_else(|| config.ui.start_path.clone())
        .or_else(|| directories::UserDirs::new().map(|ud| ud.home_dir().to_path_buf()))
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from("/")));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title("File Chooser"),
        ..Default::default()
    };

    eframe::run_native(
        "File Chooser",
        options,
        Box::new(move |cc| {
            Ok(Box::new(FileChooserApp::new(
                cc,
                config,
                start_path,
                Config::session_path(),
            )))
        }),
    )
}
