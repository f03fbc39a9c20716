use crate::ipc::wire::{Request, Response};
use crate::{Result, XsnapError};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

/// One-shot connection to the daemon socket: send one request line, read one
/// response line. External hotkey bindings go through this via `xsnap snap`.
#[derive(Debug)]
pub struct IpcClient {
    stream: UnixStream,
}

impl IpcClient {
    pub async fn connect(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path).await.map_err(|err| {
            XsnapError::IpcError(format!("cannot reach daemon at {}: {}", path.display(), err))
        })?;
        Ok(Self { stream })
    }

    pub async fn send(mut self, request: &Request) -> Result<Response> {
        let mut line = serde_json::to_string(request)
            .map_err(|err| XsnapError::IpcError(format!("encode request: {err}")))?;
        line.push('\n');
        self.stream
            .write_all(line.as_bytes())
            .await
            .map_err(|err| XsnapError::IpcError(format!("send request: {err}")))?;

        let mut reader = BufReader::new(self.stream);
        let mut response_line = String::new();
        let bytes_read = reader
            .read_line(&mut response_line)
            .await
            .map_err(|err| XsnapError::IpcError(format!("read response: {err}")))?;
        if bytes_read == 0 {
            return Err(XsnapError::IpcError(
                "daemon closed the connection without replying".to_string(),
            )
            .into());
        }

        serde_json::from_str(response_line.trim())
            .map_err(|err| XsnapError::IpcError(format!("malformed response: {err}")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connecting_without_a_daemon_reports_the_socket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xsnap.sock");

        let err = IpcClient::connect(&path).await.unwrap_err();
        assert!(err.to_string().contains("cannot reach daemon"));
    }
}
