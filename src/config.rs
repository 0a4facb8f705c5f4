use crate::cli::Args;
use crate::error::Error;
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type SharedConfig = Arc<Config>;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub target_path: PathBuf,
    auth_token: String,
}

impl Config {
    /// Validate parsed command line [`Args`] into a [`Config`], or return an Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] if the port is missing or outside `1..=65535`, or if
    /// the target path or token is missing or empty.
    ///
    /// Returns [`Error::TargetDirMissing`] if the parent directory of the target path doesn't
    /// exist, and [`Error::IO`] if it can't be inspected.
    pub fn try_from_args(args: Args) -> Result<Self, Error> {
        let port = args
            .port
            .and_then(|p| u16::try_from(p).ok())
            .filter(|p| *p > 0)
            .ok_or(Error::InvalidArguments)?;
        let target_path = args
            .target
            .filter(|t| !t.as_os_str().is_empty())
            .ok_or(Error::InvalidArguments)?;
        let auth_token = args
            .token
            .filter(|t| !t.is_empty())
            .ok_or(Error::InvalidArguments)?;

        let conf = Config {
            port,
            target_path,
            auth_token,
        };
        conf.target_dir_exists()?;
        Ok(conf)
    }

    /// The API listens on all IPv4 interfaces.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Directory that will hold the target file. A bare file name lives in the working
    /// directory.
    #[must_use]
    pub fn target_dir(&self) -> &Path {
        match self.target_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Exact comparison of a supplied `Authorization` header value against the token.
    #[must_use]
    pub fn token_matches(&self, supplied: &[u8]) -> bool {
        supplied == self.auth_token.as_bytes()
    }

    fn target_dir_exists(&self) -> Result<(), Error> {
        let dir = self.target_dir();
        match std::fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(Error::TargetDirMissing(dir.to_path_buf())),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Err(Error::TargetDirMissing(dir.to_path_buf())),
                _ => Err(Error::IO(err)),
            },
        }
    }
}
