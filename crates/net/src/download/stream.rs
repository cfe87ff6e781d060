//! Low-level streaming download mechanics

use super::config::DownloadOptions;
use super::session::DownloadSession;
use futures::StreamExt;
use spout_errors::{Error, NetworkError};
use spout_hash::{Md5Digest, Md5Hasher};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Stream a response body into `part_path`, hashing as it is written
///
/// Every `chunk_size` bytes written are added to the session counter.
pub(super) async fn stream_to_part(
    response: reqwest::Response,
    part_path: &Path,
    session: &DownloadSession,
    options: &DownloadOptions,
    url: &str,
) -> Result<(u64, Md5Digest), Error> {
    let mut file = File::create(part_path)
        .await
        .map_err(|e| Error::io_with_path(&e, part_path))?;
    let mut hasher = Md5Hasher::new();

    let mut stream = response.bytes_stream();
    loop {
        let next = tokio::time::timeout(options.chunk_timeout, stream.next()).await;
        let chunk = match next {
            Ok(Some(chunk)) => chunk.map_err(|e| NetworkError::DownloadFailed(e.to_string()))?,
            Ok(None) => break,
            Err(_) => {
                return Err(NetworkError::Timeout {
                    url: url.to_string(),
                }
                .into());
            }
        };

        for piece in chunk.chunks(options.chunk_size.max(1)) {
            file.write_all(piece)
                .await
                .map_err(|e| Error::io_with_path(&e, part_path))?;
            hasher.update(piece);
            session.add_bytes(piece.len() as u64);
        }
    }

    file.flush()
        .await
        .map_err(|e| Error::io_with_path(&e, part_path))?;
    file.sync_all()
        .await
        .map_err(|e| Error::io_with_path(&e, part_path))?;
    drop(file);

    let written = hasher.bytes_hashed();
    Ok((written, hasher.finalize()))
}
