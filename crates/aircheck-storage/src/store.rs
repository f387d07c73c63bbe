//! FTP store implementation.

use std::fs::File;
use std::io::BufReader;
use std::net::ToSocketAddrs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use suppaftp::types::FileType;
use suppaftp::FtpStream;
use tracing::{debug, info, warn};

use aircheck_models::RemoteLocation;

use crate::error::{StorageError, StorageResult};

/// Well-known FTP control port.
pub const FTP_PORT: u16 = 21;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Archival destination for local artifacts.
///
/// Implementations hide connection lifecycle and remote directory creation;
/// callers hand over a local file and get back the remote object name.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Deliver a local file to the store, returning the name it was stored
    /// under.
    async fn deliver(&self, local: &Path) -> StorageResult<String>;

    /// Human-readable destination for log context. Must not leak credentials.
    fn destination(&self) -> String;
}

/// FTP-backed remote store.
///
/// One short-lived session per delivery: connect, login, walk the base path
/// creating missing directories, stream the file, quit.
#[derive(Debug, Clone)]
pub struct FtpStore {
    location: RemoteLocation,
    port: u16,
    connect_timeout: Duration,
}

impl FtpStore {
    /// Create a store for a parsed location.
    pub fn new(location: RemoteLocation) -> Self {
        Self {
            location,
            port: FTP_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Override the control port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// The destination this store delivers to.
    pub fn location(&self) -> &RemoteLocation {
        &self.location
    }
}

#[async_trait]
impl RemoteStore for FtpStore {
    async fn deliver(&self, local: &Path) -> StorageResult<String> {
        let store = self.clone();
        let local = local.to_path_buf();

        // The FTP client is synchronous; keep its session off the async
        // trigger path so a hung remote cannot stall it.
        tokio::task::spawn_blocking(move || deliver_blocking(&store, &local))
            .await
            .map_err(|e| StorageError::transfer_failed(format!("delivery task died: {}", e)))?
    }

    fn destination(&self) -> String {
        self.location.to_string()
    }
}

fn deliver_blocking(store: &FtpStore, local: &Path) -> StorageResult<String> {
    let location = &store.location;
    let mut session = connect(store)?;

    session
        .login(&location.user, &location.secret)
        .map_err(|e| StorageError::auth_failed(e.to_string()))?;

    descend(&mut session, &location.segments)?;

    let name = local
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("local file has no usable name: {}", local.display()),
            ))
        })?
        .to_string();

    let file = File::open(local)?;
    let mut reader = BufReader::new(file);

    session
        .transfer_type(FileType::Binary)
        .map_err(|e| StorageError::transfer_failed(e.to_string()))?;

    debug!("Sending {} as '{}'", local.display(), name);
    let bytes = session
        .put_file(&name, &mut reader)
        .map_err(|e| StorageError::transfer_failed(e.to_string()))?;

    // The artifact is durably stored at this point; a failed QUIT must not
    // downgrade the result.
    if let Err(e) = session.quit() {
        warn!("FTP session did not terminate cleanly after upload: {}", e);
    }

    info!(
        "Delivered {} ({} bytes) to {}",
        local.display(),
        bytes,
        location
    );
    Ok(name)
}

fn connect(store: &FtpStore) -> StorageResult<FtpStream> {
    let host = store.location.host.as_str();
    let addrs = (host, store.port)
        .to_socket_addrs()
        .map_err(|e| StorageError::connect_failed(format!("{}: {}", host, e)))?;

    let mut last_err = None;
    for addr in addrs {
        match FtpStream::connect_timeout(addr, store.connect_timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }

    Err(StorageError::connect_failed(match last_err {
        Some(e) => format!("{}: {}", host, e),
        None => format!("{}: no addresses resolved", host),
    }))
}

/// Walk the base path, creating any segment that cannot be entered.
///
/// An empty namespace (first-ever run) and a fully pre-populated one are
/// both normal paths. A concurrent job may win the MKD race; only the final
/// CWD verdict matters.
fn descend(session: &mut FtpStream, segments: &[String]) -> StorageResult<()> {
    for segment in segments {
        if session.cwd(segment).is_ok() {
            continue;
        }
        debug!("cd '{}' failed, creating it", segment);
        let _ = session.mkdir(segment);
        session
            .cwd(segment)
            .map_err(|_| StorageError::PathUnavailable(segment.clone()))?;
    }
    Ok(())
}
