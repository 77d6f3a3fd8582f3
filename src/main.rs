use clap::Parser;
use color_eyre::Result;
use multitag::{Config, FieldFile, Profile, cli::{Cli, Commands}, logging};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps a separate config and data directory
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // The TUI owns the terminal, so a broken log file only costs a warning
    match logging::log_file_path(profile) {
        Ok(path) => {
            if let Err(e) = logging::init_file_logging(&path) {
                eprintln!("WARNING: logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("WARNING: logging disabled: {}", e),
    }

    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(path, profile)?,
        None => Config::load_with_profile(profile)?,
    };
    if let Some(ref theme) = cli.theme {
        config.set_theme(theme)?;
    }

    let field_path = cli.field.clone().unwrap_or_else(|| config.get_field_path());
    let mut field = FieldFile::new(field_path);

    match cli.command.unwrap_or(Commands::Edit) {
        Commands::Edit => {
            let app = multitag::tui::App::new(config, field)?;
            multitag::tui::run_event_loop(app)?;
        }
        Commands::Show { json } => {
            multitag::cli::handle_show(json, &field)?;
        }
        Commands::Add { tags } => {
            multitag::cli::handle_add(tags, &mut field)?;
        }
        Commands::Remove { tag } => {
            multitag::cli::handle_remove(tag, &mut field)?;
        }
    }

    Ok(())
}
