//! Command line arguments and the help screen.

use clap::Parser;
use std::path::PathBuf;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Raw command line arguments. Every field is optional at parse time so that missing values
/// are reported with the usage text rather than clap's own error output. See
/// [`Config::try_from_args`][crate::config::Config::try_from_args] for validation.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = APP_NAME, version, disable_help_flag = true)]
pub struct Args {
    /// Port on which the API should run.
    #[arg(short, long, allow_negative_numbers = true)]
    pub port: Option<i64>,

    /// Full path to the DLS text file.
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Authentication token for API access.
    #[arg(short = 'k', long)]
    pub token: Option<String>,

    /// Print the help screen.
    #[arg(short, long)]
    pub help: bool,
}

/// The help screen, also printed after any argument error.
#[must_use]
pub fn usage() -> String {
    format!(
        "{APP_NAME} v{APP_VERSION} - a simple API for updating DLS text files

Usage:
  {APP_NAME} --port PORT --target TARGET_PATH --token AUTH_TOKEN

Options:
  --port, -p PORT
        Port on which the API should run
  --target, -t TARGET_PATH
        Full path to DLS text file
  --token, -k AUTH_TOKEN
        Authentication token for API access (required for POST requests)
  --help, -h
        Print this help screen
  --version, -V
        Print the version

Endpoints:
  POST /api/dls
        Updates the DLS text file with the request body
        Requires Authorization header with token
  GET  /api/status
        Returns the API status and last update time

Examples:
  {APP_NAME} --port=9000 --target=/dabplus/dls/dls.txt --token=mySecretToken
  {APP_NAME} --port 9000 --target /dabplus/dls/dls.txt --token mySecretToken

Authentication:
  All POST requests must include the token in the Authorization header:
  curl -X POST -H \"Authorization: mySecretToken\" --data \"New DLS text\" http://localhost:9000/api/dls
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_flags() {
        let long = Args::try_parse_from([
            APP_NAME,
            "--port=9000",
            "--target",
            "/tmp/dls.txt",
            "--token=secret",
        ])
        .unwrap();
        let short =
            Args::try_parse_from([APP_NAME, "-p", "9000", "-t", "/tmp/dls.txt", "-k", "secret"])
                .unwrap();

        for args in [long, short] {
            assert_eq!(args.port, Some(9000));
            assert_eq!(args.target, Some(PathBuf::from("/tmp/dls.txt")));
            assert_eq!(args.token.as_deref(), Some("secret"));
            assert!(!args.help);
        }
    }

    #[test]
    fn missing_flags_parse_as_none() {
        let args = Args::try_parse_from([APP_NAME, "-p", "9000"]).unwrap();
        assert_eq!(args.port, Some(9000));
        assert!(args.target.is_none());
        assert!(args.token.is_none());
    }

    #[test]
    fn negative_port_is_left_for_validation() {
        let args = Args::try_parse_from([APP_NAME, "--port", "-1"]).unwrap();
        assert_eq!(args.port, Some(-1));
    }

    #[test]
    fn non_numeric_port_is_a_parse_error() {
        assert!(Args::try_parse_from([APP_NAME, "--port", "ninety"]).is_err());
    }

    #[test]
    fn help_flag_is_custom() {
        let args = Args::try_parse_from([APP_NAME, "-h"]).unwrap();
        assert!(args.help);
    }

    #[test]
    fn usage_describes_endpoints_and_auth() {
        let text = usage();
        assert!(text.contains("POST /api/dls"));
        assert!(text.contains("GET  /api/status"));
        assert!(text.contains("-H \"Authorization: mySecretToken\""));
        assert!(text.starts_with(&format!("{APP_NAME} v{APP_VERSION}")));
    }
}
