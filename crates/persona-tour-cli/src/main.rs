use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "persona-tour")]
#[command(about = "Personality-aware POI category recommendations for tourist groups", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where profiles and pipeline settings come from.
#[derive(Args)]
struct SourceArgs {
    /// Profile file (.json array or .toml with [[profile]] tables)
    #[arg(short, long)]
    profiles: PathBuf,

    /// Pipeline config file (defaults to <config_dir>/persona-tour/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster the group, split it into subgroups and recommend POI categories
    Recommend(SourceArgs),
    /// Recommend for the whole group at once, without clustering
    Reduced(SourceArgs),
    /// List the association rules mined for every subgroup
    Rules(SourceArgs),
    /// Score a Big Five questionnaire
    Questionnaire {
        /// Answer sheet as JSON
        #[arg(short, long)]
        form: PathBuf,

        /// Print a clustering-ready profile with this id instead of the scores
        #[arg(long)]
        profile_id: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Recommend(source) => {
            commands::recommend::recommend(&source.profiles, source.config.as_deref()).await?
        }
        Commands::Reduced(source) => {
            commands::recommend::reduced(&source.profiles, source.config.as_deref()).await?
        }
        Commands::Rules(source) => {
            commands::recommend::rules(&source.profiles, source.config.as_deref()).await?
        }
        Commands::Questionnaire { form, profile_id } => {
            commands::questionnaire::score(&form, profile_id).await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend_with_config() {
        let cli = Cli::parse_from([
            "persona-tour",
            "-v",
            "recommend",
            "--profiles",
            "group.json",
            "--config",
            "tour.toml",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Recommend(source) => {
                assert_eq!(source.profiles, PathBuf::from("group.json"));
                assert_eq!(source.config, Some(PathBuf::from("tour.toml")));
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_parse_questionnaire_profile_id() {
        let cli = Cli::parse_from(["persona-tour", "questionnaire", "-f", "answers.json", "--profile-id", "12"]);
        assert!(matches!(
            cli.command,
            Commands::Questionnaire { profile_id: Some(12), .. }
        ));
    }
}
