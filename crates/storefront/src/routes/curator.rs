//! Curator route handlers: garment analysis and the live voice bridge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{
        Multipart, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use std::time::Instant;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::curator::playback::OUTPUT_SAMPLE_RATE;
use crate::services::curator::{
    CuratorClient, LiveEvent, PlaybackScheduler, pcm16_duration,
};
use crate::state::AppState;

/// Analysis result fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/curator_analysis.html")]
pub struct AnalysisTemplate {
    pub text: String,
}

/// Analyze an uploaded garment photo (HTMX fragment).
///
/// Single-shot: blocks until the hosted model responds, no retry.
#[instrument(skip(state, multipart))]
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let Some(curator) = state.curator() else {
        return Err(AppError::BadRequest(
            "the curator is not configured".to_string(),
        ));
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let mime_type = field.content_type().unwrap_or("image/jpeg").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let text = curator.analyze(&bytes, &mime_type).await?;
        return Ok(AnalysisTemplate { text }.into_response());
    }

    Err(AppError::BadRequest(
        "no image field in upload".to_string(),
    ))
}

/// Open the live curator voice session (WebSocket).
///
/// The browser captures microphone audio, downsamples it to 16 kHz PCM and
/// sends it as binary frames; the bridge returns JSON frames carrying
/// base64 PCM chunks with playback start hints, plus interruption and
/// turn-complete signals.
#[instrument(skip(state, ws))]
pub async fn live(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let Some(curator) = state.curator().cloned() else {
        return AppError::BadRequest("the curator is not configured".to_string()).into_response();
    };

    ws.on_upgrade(move |socket| bridge(socket, curator))
}

/// Pump frames between the browser socket and the vendor session.
///
/// Playback scheduling happens here so every client gets the same gapless
/// behavior: each audio frame carries the offset (on the bridge clock) at
/// which it should start, back-to-back with its predecessor, and an
/// interruption resets the watermark so pending buffers are discarded.
async fn bridge(mut socket: WebSocket, curator: CuratorClient) {
    let mut session = match curator.start_live_session().await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("live session failed to open: {e}");
            let frame = json!({"type": "error", "message": "curator unavailable"}).to_string();
            let _ = socket.send(Message::Text(frame.into())).await;
            return;
        }
    };

    let started = Instant::now();
    let mut scheduler = PlaybackScheduler::new();

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Binary(pcm))) => {
                    if session.send_audio(pcm.to_vec()).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("browser socket error: {e}");
                    break;
                }
            },
            event = session.next_event() => match event {
                Some(LiveEvent::Audio(pcm)) => {
                    let start = scheduler.schedule(
                        started.elapsed(),
                        pcm16_duration(pcm.len(), OUTPUT_SAMPLE_RATE),
                    );
                    let frame = json!({
                        "type": "audio",
                        "startAtMs": u64::try_from(start.as_millis()).unwrap_or(u64::MAX),
                        "data": BASE64.encode(&pcm),
                    })
                    .to_string();
                    if socket.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Some(LiveEvent::Interrupted) => {
                    // Pending buffers must stop now; the next chunk starts
                    // from the interruption point, not after them.
                    scheduler.interrupt();
                    let frame = json!({"type": "interrupted"}).to_string();
                    if socket.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Some(LiveEvent::TurnComplete) => {
                    let frame = json!({"type": "turnComplete"}).to_string();
                    if socket.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Some(LiveEvent::Closed) | None => {
                    let frame = json!({"type": "closed"}).to_string();
                    let _ = socket.send(Message::Text(frame.into())).await;
                    break;
                }
            }
        }
    }

    session.close();
}
