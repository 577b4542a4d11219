use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pyedit_config::{default_log_file, Config};
use pyedit_core::{EditorHost, HeadlessEditor};
use pyedit_encoding::ScanMode;
use pyedit_logger::LogLevel;
use pyedit_python::PythonEditor;
use pyedit_theme::set_themes_dir;

/// Python editor preset: composes an editor for each file, detects its
/// declared encoding and applies a color scheme.
#[derive(Debug, Parser)]
#[command(name = "pyedit")]
#[command(version)]
struct Args {
    /// Color scheme: dark, light or a palette in the themes directory
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Only look for encoding declarations on the first two lines
    #[arg(long)]
    pep263: bool,

    /// Python files to open
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn init_logging(config: &Config) {
    let level = config
        .logging
        .min_level
        .parse::<LogLevel>()
        .unwrap_or(LogLevel::Info);
    let file_path = config
        .logging
        .file_path
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| default_log_file().ok());
    pyedit_logger::init(file_path, config.logging.max_entries, level);
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Ok(themes_dir) = Config::get_themes_dir() {
        set_themes_dir(themes_dir);
    }
    init_logging(&config);
    log::info!("Opening {} file(s)", args.files.len());

    if args.pep263 {
        config.encoding.scan = ScanMode::Pep263.as_str().to_string();
    }
    let theme = args
        .theme
        .clone()
        .unwrap_or_else(|| config.general.theme.clone());

    for path in &args.files {
        let mut editor = PythonEditor::with_config(HeadlessEditor::new(), &config)?;
        let encoding = editor.load_file(path)?;
        editor.use_style(&theme)?;

        let host = editor.host();
        println!("{}: {}", path.display(), encoding);
        println!(
            "  {} lines, {} components, theme {}",
            host.document().len_lines(),
            host.installed().len(),
            theme
        );
        for name in host.installed() {
            println!("    {}", name);
        }
    }

    Ok(())
}
