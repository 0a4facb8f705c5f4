//! The DLS text file.
//!
//! A single file on disk is the only state odr-webapi keeps. Each accepted update replaces the
//! whole file, and the "last update" time reported by the [HTTP API][crate::api] is always
//! read back from the file's metadata rather than remembered in memory.
use crate::error::Error;
use serde::{Serialize, Serializer};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// `SharedDlsFile` is a type alias for a [`DlsFile`] shared by all request handlers.
#[allow(clippy::module_name_repetitions)]
pub type SharedDlsFile = Arc<DlsFile>;

/// When the DLS file was last written, as reported to API clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastUpdate {
    /// The file doesn't exist yet.
    Never,
    /// The file's metadata couldn't be read.
    Unknown,
    /// The file's modification time as an [RFC-3339] UTC timestamp with whole seconds.
    ///
    /// [RFC-3339]: https://www.rfc-editor.org/rfc/rfc3339
    Modified(String),
}

impl LastUpdate {
    fn from_modified(modified: SystemTime) -> Result<Self, Error> {
        let whole_seconds = |d: std::time::Duration| {
            i64::try_from(d.as_secs())
                .map(Duration::seconds)
                .map_err(|_| Error::TimestampOutOfRange)
        };
        // Pre-epoch times round down to the previous whole second.
        let since_epoch = match modified.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => whole_seconds(after)?,
            Err(err) => {
                let before = err.duration();
                let partial = Duration::seconds(i64::from(before.subsec_nanos() > 0));
                -whole_seconds(before)? - partial
            }
        };
        let modified = OffsetDateTime::UNIX_EPOCH
            .checked_add(since_epoch)
            .ok_or(Error::TimestampOutOfRange)?;
        Ok(Self::Modified(modified.format(&Rfc3339)?))
    }
}

impl fmt::Display for LastUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastUpdate::Never => f.write_str("Never"),
            LastUpdate::Unknown => f.write_str("Unknown"),
            LastUpdate::Modified(ts) => f.write_str(ts),
        }
    }
}

impl Serialize for LastUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The target file that DLS text updates are written to.
///
/// Writes are serialized so that concurrent updates can't interleave, and so that the
/// modification time returned from [`DlsFile::write`] belongs to that write.
#[derive(Debug)]
pub struct DlsFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DlsFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::default(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file's content with `text`, creating the file if needed, and return the
    /// modification time read back from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteTarget`] if the file can't be opened or written.
    pub async fn write(&self, text: &[u8]) -> Result<LastUpdate, Error> {
        let _guard = self.write_lock.lock().await;
        if let Err(err) = self.write_unlocked(text).await {
            tracing::error!("error writing to {}: {err}", self.path.display());
            return Err(Error::WriteTarget(err));
        }
        Ok(self.last_update().await)
    }

    async fn write_unlocked(&self, text: &[u8]) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o644);
        let mut output_file = options.open(&self.path).await?;
        output_file.write_all(text).await?;
        output_file.flush().await?;
        Ok(())
    }

    /// Read the file's modification time. Never fails: a missing file is
    /// [`LastUpdate::Never`] and any other problem is [`LastUpdate::Unknown`].
    pub async fn last_update(&self) -> LastUpdate {
        let modified = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.modified(),
            Err(err) if err.kind() == ErrorKind::NotFound => return LastUpdate::Never,
            Err(err) => Err(err),
        };
        match modified.map_err(Error::from).and_then(LastUpdate::from_modified) {
            Ok(last_update) => last_update,
            Err(err) => {
                tracing::warn!("error getting file info for {}: {err}", self.path.display());
                LastUpdate::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(last_update: &LastUpdate) -> OffsetDateTime {
        match last_update {
            LastUpdate::Modified(ts) => OffsetDateTime::parse(ts, &Rfc3339).unwrap(),
            other => panic!("expected a modification time, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn never_written_file_reports_never() {
        let dir = tempfile::tempdir().unwrap();
        let dls = DlsFile::new(dir.path().join("dls.txt"));
        assert_eq!(dls.last_update().await, LastUpdate::Never);
    }

    #[tokio::test]
    async fn write_replaces_content_and_reports_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dls.txt");
        let dls = DlsFile::new(&path);
        let before = OffsetDateTime::now_utc() - Duration::seconds(1);

        let first = dls.write(b"a much longer first payload").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a much longer first payload");
        assert!(parse(&first) >= before);

        let second = dls.write(b"short").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"short");
        assert!(parse(&second) >= parse(&first));
        assert_eq!(dls.last_update().await, second);
    }

    #[tokio::test]
    async fn write_accepts_arbitrary_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dls.txt");
        let dls = DlsFile::new(&path);
        let payload = [0u8, 0xff, 0xfe, b'\n', 0x80];
        dls.write(&payload).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), payload);
    }

    #[tokio::test]
    async fn write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dls = DlsFile::new(dir.path().join("gone").join("dls.txt"));
        assert!(matches!(
            dls.write(b"text").await,
            Err(Error::WriteTarget(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn created_file_is_not_group_or_world_writable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dls.txt");
        DlsFile::new(&path).write(b"text").await.unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & 0o022, 0);
    }

    #[tokio::test]
    async fn concurrent_writes_leave_one_complete_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dls.txt");
        let dls = Arc::new(DlsFile::new(&path));
        let payloads: Vec<Vec<u8>> = (0..8u8).map(|i| vec![b'a' + i; 4096]).collect();

        let handles: Vec<_> = payloads
            .iter()
            .cloned()
            .map(|payload| {
                let dls = dls.clone();
                tokio::spawn(async move { dls.write(&payload).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let content = std::fs::read(&path).unwrap();
        assert!(payloads.contains(&content));
    }

    #[test]
    fn last_update_serializes_as_string() {
        assert_eq!(
            serde_json::to_string(&LastUpdate::Never).unwrap(),
            "\"Never\""
        );
        assert_eq!(
            serde_json::to_string(&LastUpdate::Unknown).unwrap(),
            "\"Unknown\""
        );
        let modified = LastUpdate::from_modified(SystemTime::UNIX_EPOCH).unwrap();
        assert_eq!(modified.to_string(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn modification_time_drops_subseconds() {
        let modified = SystemTime::UNIX_EPOCH + std::time::Duration::from_millis(1_500);
        assert_eq!(
            LastUpdate::from_modified(modified).unwrap().to_string(),
            "1970-01-01T00:00:01Z"
        );
        let modified = SystemTime::UNIX_EPOCH - std::time::Duration::from_millis(1_500);
        assert_eq!(
            LastUpdate::from_modified(modified).unwrap().to_string(),
            "1969-12-31T23:59:58Z"
        );
    }

    #[test]
    fn out_of_range_modification_time_is_an_error() {
        // Year 11000, beyond what RFC 3339 and `time` can represent.
        let far_future = SystemTime::UNIX_EPOCH
            .checked_add(std::time::Duration::from_secs(285_000_000_000))
            .unwrap();
        assert!(matches!(
            LastUpdate::from_modified(far_future),
            Err(Error::TimestampOutOfRange)
        ));
    }

    #[tokio::test]
    async fn stat_failure_reports_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("plain");
        std::fs::write(&not_a_dir, b"x").unwrap();
        let dls = DlsFile::new(not_a_dir.join("dls.txt"));
        assert_eq!(dls.last_update().await, LastUpdate::Unknown);
    }
}
