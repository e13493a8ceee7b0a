//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use imageset_core::DEFAULT_CONCURRENCY;

/// Download images from a URL list into a deduplicated dataset directory.
///
/// Imageset fetches every URL in the input file with bounded concurrency,
/// validates that responses are real images, and names each file by a hash
/// of its URL so re-runs skip everything already downloaded.
#[derive(Parser, Debug)]
#[command(name = "imageset")]
#[command(author, version, about)]
pub struct Args {
    /// Path to the input URLs file (first line is a header; each remaining
    /// line carries one URL in the first comma-delimited field)
    #[arg(long)]
    pub input_urls_path: PathBuf,

    /// Directory to write downloaded images into (created if missing)
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Maximum concurrent downloads (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Per-request timeout in seconds (1-300)
    #[arg(short = 't', long, default_value_t = 8, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: u64,

    /// Path of the append-mode log file
    #[arg(long, default_value = "downloader.log")]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "imageset",
            "--input-urls-path",
            "urls.csv",
            "--output-dir",
            "images",
        ]
    }

    #[test]
    fn test_cli_default_args_parse_successfully() {
        let args = Args::try_parse_from(base_args()).unwrap();
        assert_eq!(args.input_urls_path, PathBuf::from("urls.csv"));
        assert_eq!(args.output_dir, PathBuf::from("images"));
        assert_eq!(args.concurrency, 32); // DEFAULT_CONCURRENCY
        assert_eq!(args.timeout_secs, 8);
        assert_eq!(args.log_file, PathBuf::from("downloader.log"));
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_input_urls_path_is_required() {
        let result = Args::try_parse_from(["imageset", "--output-dir", "images"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_output_dir_is_required() {
        let result = Args::try_parse_from(["imageset", "--input-urls-path", "urls.csv"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_concurrency_flags() {
        let mut argv = base_args();
        argv.extend(["-c", "5"]);
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.concurrency, 5);

        let mut argv = base_args();
        argv.extend(["--concurrency", "100"]);
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.concurrency, 100);
    }

    #[test]
    fn test_cli_concurrency_zero_rejected() {
        let mut argv = base_args();
        argv.extend(["-c", "0"]);
        let result = Args::try_parse_from(argv);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_concurrency_over_max_rejected() {
        let mut argv = base_args();
        argv.extend(["-c", "101"]);
        let result = Args::try_parse_from(argv);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_timeout_flag() {
        let mut argv = base_args();
        argv.extend(["--timeout-secs", "30"]);
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.timeout_secs, 30);
    }

    #[test]
    fn test_cli_timeout_zero_rejected() {
        let mut argv = base_args();
        argv.extend(["--timeout-secs", "0"]);
        let result = Args::try_parse_from(argv);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let mut argv = base_args();
        argv.push("-vv");
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let mut argv = base_args();
        argv.push("--quiet");
        let args = Args::try_parse_from(argv).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["imageset", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_unknown_flag_returns_error() {
        let mut argv = base_args();
        argv.push("--invalid-flag");
        let result = Args::try_parse_from(argv);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
