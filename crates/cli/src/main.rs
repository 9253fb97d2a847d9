//! planeseg CLI - extract dominant planes from a point cloud
//!
//! Provides subcommands for:
//! - `run`: segment a cloud into planes and write a colored copy of the labeled points

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod run;

#[derive(Parser, Debug)]
#[command(name = "planeseg")]
#[command(about = "Extract planes from point clouds with RANSAC", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract planes and write them as a colored point cloud
    Run(run::RunArgs),
}

fn print_run_usage() -> Result<()> {
    let mut cmd = Cli::command();
    cmd.build();
    match cmd.find_subcommand_mut("run") {
        Some(run) => run.print_help()?,
        None => cmd.print_help()?,
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) if !args.is_complete() => print_run_usage(),
        Commands::Run(args) => run::run_extract(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positionals_and_defaults() {
        let cli = Cli::try_parse_from(["planeseg", "run", "scan.obj", "3", "normals"]).unwrap();
        let Commands::Run(args) = cli.command;
        assert_eq!(args.input, Some(PathBuf::from("scan.obj")));
        assert_eq!(args.plane_count, Some(3));
        assert!(args.use_normals());
        assert_eq!(args.output, PathBuf::from("colored_planes.obj"));
        assert_eq!(args.iterations, 100);
        assert_eq!(args.distance_threshold, 0.1);
        assert_eq!(args.angle_threshold, 10.0);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn plane_count_is_optional() {
        let cli = Cli::try_parse_from(["planeseg", "run", "scan.obj"]).unwrap();
        let Commands::Run(args) = cli.command;
        assert_eq!(args.plane_count, None);
        assert!(!args.use_normals());
        assert!(!args.is_complete());
    }

    #[test]
    fn bare_run_takes_the_usage_path() {
        let cli = Cli::try_parse_from(["planeseg", "run"]).unwrap();
        let Commands::Run(args) = cli.command;
        assert_eq!(args.input, None);
        assert_eq!(args.plane_count, None);
        assert!(!args.is_complete());
        print_run_usage().unwrap();
    }

    #[test]
    fn incomplete_arguments_never_reach_extraction() {
        let cli = Cli::try_parse_from(["planeseg", "run", "--seed", "4"]).unwrap();
        let Commands::Run(args) = cli.command;
        assert!(run::run_extract(args).is_err());
    }

    #[test]
    fn only_the_normals_token_enables_gating() {
        let cli = Cli::try_parse_from(["planeseg", "run", "scan.obj", "2", "colors"]).unwrap();
        let Commands::Run(args) = cli.command;
        assert!(!args.use_normals());
    }

    #[test]
    fn options_override_defaults() {
        let cli = Cli::try_parse_from([
            "planeseg",
            "run",
            "scan.ply",
            "4",
            "--output",
            "out.ply",
            "--iterations",
            "500",
            "--distance-threshold",
            "0.02",
            "--angle-threshold",
            "0.3",
            "--seed",
            "7",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command;
        let params = args.ransac_params();
        assert_eq!(args.output, PathBuf::from("out.ply"));
        assert_eq!(params.iterations, 500);
        assert_eq!(params.distance_threshold, 0.02);
        assert_eq!(params.angle_threshold, 0.3);
        assert!(!params.use_normals);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn non_numeric_plane_count_is_rejected() {
        assert!(Cli::try_parse_from(["planeseg", "run", "scan.obj", "many"]).is_err());
    }
}
