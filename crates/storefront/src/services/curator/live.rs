//! Bidirectional audio session with the live curator.
//!
//! Thin plumbing around the vendor's streaming WebSocket API: the session is
//! negotiated with a voice/persona configuration and a system instruction,
//! microphone PCM goes up as base64 chunks, and decoded model audio comes
//! back as [`LiveEvent::Audio`]. An [`LiveEvent::Interrupted`] means the
//! caller must immediately discard any playback it has queued. There is no
//! reconnect: when the socket drops the session is over.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::{SinkExt, StreamExt};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

use crate::config::CuratorConfig;

use super::CURATOR_SYSTEM_INSTRUCTION;
use super::error::CuratorError;
use super::playback::INPUT_SAMPLE_RATE;

const LIVE_ENDPOINT: &str = "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent";

/// Buffered microphone chunks waiting for the socket.
const AUDIO_QUEUE_DEPTH: usize = 32;

/// Buffered server events waiting for the bridge.
const EVENT_QUEUE_DEPTH: usize = 64;

/// Something the live session wants the caller to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    /// A decoded 16-bit PCM chunk (24 kHz mono) to schedule for playback.
    Audio(Vec<u8>),
    /// The model was interrupted; stop and discard all pending playback now.
    Interrupted,
    /// The model finished its turn.
    TurnComplete,
    /// The socket closed; the session is over.
    Closed,
}

/// Handle for one live curator conversation.
pub struct LiveSession {
    id: Uuid,
    audio_tx: Option<mpsc::Sender<Vec<u8>>>,
    events_rx: mpsc::Receiver<LiveEvent>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl LiveSession {
    /// Open the streaming connection and negotiate the session.
    ///
    /// # Errors
    ///
    /// Returns `CuratorError::Session` if the socket cannot be opened or the
    /// setup message cannot be sent.
    pub(super) async fn connect(config: &CuratorConfig) -> Result<Self, CuratorError> {
        let id = Uuid::new_v4();
        let url = format!("{LIVE_ENDPOINT}?key={}", config.api_key.expose_secret());

        let (socket, _) = connect_async(url)
            .await
            .map_err(|e| CuratorError::Session(format!("connect failed: {e}")))?;
        let (mut sink, mut stream) = socket.split();

        sink.send(Message::text(setup_message(config)))
            .await
            .map_err(|e| CuratorError::Session(format!("setup failed: {e}")))?;

        tracing::info!(session = %id, model = %config.live_model, "live curator session opened");

        let (audio_tx, mut audio_rx) = mpsc::channel::<Vec<u8>>(AUDIO_QUEUE_DEPTH);
        let (events_tx, events_rx) = mpsc::channel::<LiveEvent>(EVENT_QUEUE_DEPTH);

        let writer = tokio::spawn(async move {
            while let Some(pcm) = audio_rx.recv().await {
                if let Err(e) = sink.send(Message::text(realtime_input_message(&pcm))).await {
                    tracing::warn!("live session send failed: {e}");
                    break;
                }
            }
            // Sender dropped or socket failed; either way the session ends.
            let _ = sink.send(Message::Close(None)).await;
        });

        let reader = tokio::spawn(async move {
            while let Some(message) = stream.next().await {
                let raw = match message {
                    Ok(Message::Text(text)) => text.to_string(),
                    Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!("live session sent non-UTF8 frame: {e}");
                            continue;
                        }
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!("live session read failed: {e}");
                        break;
                    }
                };

                for event in parse_server_events(&raw) {
                    if events_tx.send(event).await.is_err() {
                        return;
                    }
                }
            }
            let _ = events_tx.send(LiveEvent::Closed).await;
        });

        Ok(Self {
            id,
            audio_tx: Some(audio_tx),
            events_rx,
            reader,
            writer,
        })
    }

    /// Session id, for log correlation.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Feed one microphone chunk (16-bit PCM, 16 kHz mono) to the model.
    ///
    /// # Errors
    ///
    /// Returns `CuratorError::Session` if the session has been closed.
    pub async fn send_audio(&self, pcm: Vec<u8>) -> Result<(), CuratorError> {
        let tx = self
            .audio_tx
            .as_ref()
            .ok_or_else(|| CuratorError::Session("session closed".to_string()))?;
        tx.send(pcm)
            .await
            .map_err(|_| CuratorError::Session("session closed".to_string()))
    }

    /// Wait for the next server event. `None` after [`LiveEvent::Closed`].
    pub async fn next_event(&mut self) -> Option<LiveEvent> {
        self.events_rx.recv().await
    }

    /// Tear the session down: stop sending, close the socket, drop whatever
    /// the server still had queued.
    pub fn close(&mut self) {
        if self.audio_tx.take().is_some() {
            tracing::info!(session = %self.id, "live curator session closed");
        }
        self.reader.abort();
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.close();
        self.writer.abort();
    }
}

/// The session negotiation message: model, audio response modality, voice,
/// and the curator persona.
fn setup_message(config: &CuratorConfig) -> String {
    json!({
        "setup": {
            "model": format!("models/{}", config.live_model),
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": config.voice }
                    }
                }
            },
            "systemInstruction": {
                "parts": [{ "text": CURATOR_SYSTEM_INSTRUCTION }]
            }
        }
    })
    .to_string()
}

/// One microphone chunk as a realtime-input message.
fn realtime_input_message(pcm: &[u8]) -> String {
    json!({
        "realtimeInput": {
            "mediaChunks": [{
                "mimeType": format!("audio/pcm;rate={INPUT_SAMPLE_RATE}"),
                "data": BASE64.encode(pcm)
            }]
        }
    })
    .to_string()
}

/// Decode the events carried by one server frame.
///
/// Unknown or malformed frames produce no events; the stream carries on.
fn parse_server_events(raw: &str) -> Vec<LiveEvent> {
    let message: ServerMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("ignoring unparseable live frame: {e}");
            return Vec::new();
        }
    };

    let Some(content) = message.server_content else {
        return Vec::new();
    };

    let mut events = Vec::new();

    if content.interrupted.unwrap_or(false) {
        events.push(LiveEvent::Interrupted);
    }

    if let Some(turn) = content.model_turn {
        for part in turn.parts {
            let Some(inline) = part.inline_data else {
                continue;
            };
            match BASE64.decode(inline.data.as_bytes()) {
                Ok(bytes) if !bytes.is_empty() => events.push(LiveEvent::Audio(bytes)),
                Ok(_) => {}
                Err(e) => tracing::warn!("undecodable audio chunk: {e}"),
            }
        }
    }

    if content.turn_complete.unwrap_or(false) {
        events.push(LiveEvent::TurnComplete);
    }

    events
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerMessage {
    server_content: Option<ServerContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerContent {
    model_turn: Option<ModelTurn>,
    interrupted: Option<bool>,
    turn_complete: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ModelTurn {
    #[serde(default)]
    parts: Vec<TurnPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TurnPart {
    inline_data: Option<TurnInlineData>,
}

#[derive(Debug, Deserialize)]
struct TurnInlineData {
    data: String,
}
