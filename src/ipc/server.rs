use crate::ipc::wire::{Request, Response, MAX_REQUEST_BYTES};
use crate::ipc::EngineCommand;
use crate::{Result, XsnapError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Clients must send their request line within this window.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Accepts client connections on the daemon socket and forwards each request
/// into the engine's command channel.
#[derive(Debug)]
pub struct IpcServer {
    listener: UnixListener,
    path: PathBuf,
}

impl IpcServer {
    /// Bind the daemon socket. A socket file left behind by an unclean
    /// shutdown is replaced, but a socket with a live daemon behind it is a
    /// hard error.
    pub async fn bind(path: PathBuf) -> Result<Self> {
        if path.exists() {
            match UnixStream::connect(&path).await {
                Ok(_) => {
                    return Err(XsnapError::IpcError(format!(
                        "another daemon is already listening on {}",
                        path.display()
                    ))
                    .into());
                }
                Err(_) => {
                    debug!("Removing stale socket {}", path.display());
                    let _ = std::fs::remove_file(&path);
                }
            }
        }

        let listener = UnixListener::bind(&path).map_err(|err| {
            XsnapError::IpcError(format!("cannot bind {}: {}", path.display(), err))
        })?;
        Ok(Self { listener, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accept loop. Each connection is handled on its own task; the engine
    /// channel keeps execution serial regardless of connection concurrency.
    pub async fn serve(self, commands: mpsc::Sender<EngineCommand>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let commands = commands.clone();
                    tokio::spawn(async move {
                        if let Err(err) = handle_connection(stream, commands).await {
                            warn!("IPC connection failed: {}", err);
                        }
                    });
                }
                Err(err) => {
                    warn!("IPC accept failed: {}", err);
                }
            }
        }
    }
}

/// One request per connection: read a JSON line, forward it to the engine,
/// write the JSON response line back.
async fn handle_connection(
    stream: UnixStream,
    commands: mpsc::Sender<EngineCommand>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader.take(MAX_REQUEST_BYTES));
    let mut line = String::new();

    let bytes_read = match tokio::time::timeout(READ_TIMEOUT, reader.read_line(&mut line)).await {
        Ok(Ok(n)) => n,
        Ok(Err(err)) => return Err(err.into()),
        // Client connected but never sent, close quietly
        Err(_) => return Ok(()),
    };
    if bytes_read == 0 {
        return Ok(());
    }

    let line = line.trim();
    debug!("IPC request: {}", line);

    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            let response = Response::error(format!("Invalid request: {err}"));
            return write_response(&mut writer, &response).await;
        }
    };

    let (command, reply) = EngineCommand::from_request(request);
    if commands.send(command).await.is_err() {
        let response = Response::error("Daemon is shutting down");
        return write_response(&mut writer, &response).await;
    }

    let response = match reply.await {
        Ok(response) => response,
        Err(_) => Response::error("Daemon dropped the request"),
    };
    write_response(&mut writer, &response).await
}

async fn write_response<W>(writer: &mut W, response: &Response) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(response)?;
    json.push('\n');
    writer.write_all(json.as_bytes()).await?;
    Ok(())
}
