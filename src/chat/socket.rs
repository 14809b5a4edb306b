//! WebSocket connection for one chat session

use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::config::Settings;

/// One frame of assistant output. Replies stream in chunks; the final chunk
/// of a reply carries `done = true`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEvent {
    #[serde(default)]
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    content: &'a str,
}

/// Live WebSocket connection to one chat session.
pub struct ChatSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl ChatSocket {
    /// Connect to the chat endpoint for `session_id`, authenticating with
    /// the cached token.
    pub async fn connect(settings: &Settings, session_id: &str) -> Result<Self> {
        let token = settings
            .resolve_token()
            .context("Not logged in. Run `reps login` first.")?;

        let url = settings.chat_ws_url(session_id);
        let mut request = url
            .clone()
            .into_client_request()
            .with_context(|| format!("Invalid chat URL: {}", url))?;
        request.headers_mut().insert(
            "Authorization",
            format!("Token {}", token)
                .parse()
                .context("Invalid token header")?,
        );

        let (stream, _) = connect_async(request)
            .await
            .context("Failed to connect to chat")?;

        Ok(Self { stream })
    }

    /// Send one user message.
    pub async fn send(&mut self, content: &str) -> Result<()> {
        let payload = serde_json::to_string(&OutgoingMessage { content })?;
        self.stream
            .send(Message::Text(payload))
            .await
            .context("Failed to send chat message")?;
        Ok(())
    }

    /// Receive the next assistant frame. Returns `None` when the server
    /// closes the connection.
    pub async fn next_event(&mut self) -> Result<Option<ChatEvent>> {
        while let Some(frame) = self.stream.next().await {
            match frame.context("Chat connection error")? {
                Message::Text(text) => {
                    let event: ChatEvent =
                        serde_json::from_str(&text).context("Malformed chat frame")?;
                    return Ok(Some(event));
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                Message::Close(_) => return Ok(None),
                _ => continue,
            }
        }
        Ok(None)
    }

    /// Receive frames until the assistant finishes one reply, returning the
    /// assembled text.
    pub async fn receive_reply(&mut self) -> Result<String> {
        let mut reply = String::new();

        while let Some(event) = self.next_event().await? {
            if event.role == "assistant" || event.role.is_empty() {
                reply.push_str(&event.content);
                if event.done {
                    break;
                }
            }
        }

        if reply.is_empty() {
            anyhow::bail!("Chat connection closed before a reply arrived");
        }

        Ok(reply)
    }

    pub async fn close(mut self) -> Result<()> {
        let _ = self.stream.send(Message::Close(None)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_event_defaults_done_to_false() {
        let event: ChatEvent =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert!(!event.done);
        assert_eq!(event.content, "hi");
    }
}
