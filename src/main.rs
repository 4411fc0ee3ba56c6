use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use club_registry::cli::{
    handle_category_command, handle_class_command, handle_enrollment_command,
    handle_history_command, handle_level_command, handle_login_command, handle_person_command,
};
use club_registry::config::{RegistryPaths, Settings};
use club_registry::storage::{initialize, Storage};

#[derive(Parser)]
#[command(
    name = "club",
    version,
    about = "Registry for a small school or club",
    long_about = "club keeps the records of a small school or club: person categories, \
                  people, levels, classes, evaluation enrollments and logins, stored in \
                  a local SQLite database."
)]
struct Cli {
    /// SQLite database file (overrides the configured location)
    #[arg(long, global = true, env = "CLUB_REGISTRY_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Init {
        /// Also create the default categories and levels
        #[arg(long)]
        seed: bool,
    },

    /// Person category commands
    #[command(subcommand)]
    Category(club_registry::cli::CategoryCommands),

    /// Person commands
    #[command(subcommand, alias = "people")]
    Person(club_registry::cli::PersonCommands),

    /// Level commands
    #[command(subcommand)]
    Level(club_registry::cli::LevelCommands),

    /// Class commands
    #[command(subcommand)]
    Class(club_registry::cli::ClassCommands),

    /// Evaluation enrollment commands
    #[command(subcommand)]
    Enrollment(club_registry::cli::EnrollmentCommands),

    /// Login commands
    #[command(subcommand)]
    Login(club_registry::cli::LoginCommands),

    /// Show recent changes from the audit log
    History(club_registry::cli::HistoryArgs),

    /// Delete all data from every table
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = RegistryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let database_file = settings.database_file(&paths, cli.database);

    let Some(command) = cli.command else {
        println!("club - school and club registry");
        println!();
        println!("Run 'club --help' for usage information.");
        println!("Run 'club init --seed' to get started.");
        return Ok(());
    };

    if let Commands::Config = command {
        println!("club-registry Configuration");
        println!("===========================");
        println!("Base directory: {}", paths.base_dir().display());
        println!("Settings file:  {}", paths.settings_file().display());
        println!("Database:       {}", database_file.display());
        println!("Audit log:      {}", paths.audit_log().display());
        println!();
        println!("Settings:");
        println!("  Schema version: {}", settings.schema_version);
        println!("  Audit enabled:  {}", settings.audit_enabled);
        println!("  Date format:    {}", settings.date_format);
        return Ok(());
    }

    paths.ensure_directories()?;
    let audit_log = settings.audit_enabled.then(|| paths.audit_log());
    let storage = Storage::open(&database_file, audit_log)?;

    if let Commands::Init { seed } = command {
        println!("Initializing club registry at: {}", database_file.display());
        let summary = initialize(&storage, seed)?;
        settings.save(&paths)?;
        println!("Initialization complete!");

        if !summary.categories.is_empty() {
            println!("  Categories: {}", summary.categories.join(", "));
        }
        if !summary.levels.is_empty() {
            println!("  Levels:     {}", summary.levels.join(", "));
        }
        return Ok(());
    }

    if !storage.is_initialized()? {
        anyhow::bail!("Registry not initialized. Run 'club init' first.");
    }

    match command {
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Person(cmd) => handle_person_command(&storage, cmd)?,
        Commands::Level(cmd) => handle_level_command(&storage, cmd)?,
        Commands::Class(cmd) => handle_class_command(&storage, cmd)?,
        Commands::Enrollment(cmd) => handle_enrollment_command(&storage, cmd)?,
        Commands::Login(cmd) => handle_login_command(&storage, cmd)?,
        Commands::History(args) => handle_history_command(&storage, &settings, args)?,
        Commands::Clear { yes } => {
            if !yes {
                anyhow::bail!("Refusing to delete all data without --yes");
            }
            storage.clear_all()?;
            println!("All data cleared.");
        }
        Commands::Init { .. } | Commands::Config => {}
    }

    Ok(())
}
