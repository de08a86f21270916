use std::time::Duration;

use futures::{SinkExt, StreamExt};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::config::{DERIV, DerivApiConfig, Timeframe};
use crate::data::{MarketDataProvider, ProviderError};
use crate::domain::Candle;

/// Candle source backed by the Deriv WebSocket API.
///
/// Each fetch opens a fresh connection, optionally authorizes, issues one
/// `ticks_history` request in candle style, and hangs up. Transport failures
/// are retried with a flat backoff; API rejections are surfaced as-is.
pub struct DerivProvider {
    endpoint: String,
    token: Option<String>,
    cfg: DerivApiConfig,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    msg_type: Option<String>,
    error: Option<ApiErrorBody>,
    candles: Option<Vec<RawCandle>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RawCandle {
    epoch: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl From<RawCandle> for Candle {
    fn from(raw: RawCandle) -> Self {
        Candle::new(raw.epoch * 1000, raw.open, raw.high, raw.low, raw.close)
    }
}

impl DerivProvider {
    pub fn new(app_id: impl Into<String>, token: Option<String>) -> Self {
        Self {
            endpoint: format!(
                "{}?app_id={}&l={}",
                DERIV.ws.base_url,
                app_id.into(),
                DERIV.ws.language
            ),
            token,
            cfg: DerivApiConfig::default(),
        }
    }

    /// Point the client at a non-default endpoint with explicit timing knobs,
    /// e.g. a local fixture server under test.
    pub fn with_endpoint(endpoint: impl Into<String>, cfg: DerivApiConfig) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            cfg,
        }
    }

    async fn request_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let (mut ws, _) = connect_async(self.endpoint.as_str())
            .await
            .map_err(|e| ProviderError::Transport(format!("connect: {e}")))?;

        if let Some(token) = &self.token {
            let auth = json!({ "authorize": token });
            send_json(&mut ws, &auth).await?;
            let reply = await_msg_type(&mut ws, "authorize").await?;
            debug!("authorized, msg_type={:?}", reply.msg_type);
        }

        let request = json!({
            "ticks_history": symbol,
            "style": "candles",
            "granularity": timeframe.granularity_secs(),
            "count": count.min(DERIV.max_candles_per_request),
            "end": "latest",
        });
        send_json(&mut ws, &request).await?;
        let reply = await_msg_type(&mut ws, "candles").await?;

        let _ = ws.close(None).await;

        let raw = reply.candles.ok_or(ProviderError::Empty)?;
        if raw.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(raw.into_iter().map(Candle::from).collect())
    }
}

type Ws = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn send_json(ws: &mut Ws, payload: &serde_json::Value) -> Result<(), ProviderError> {
    ws.send(Message::Text(payload.to_string().into()))
        .await
        .map_err(|e| ProviderError::Transport(format!("send: {e}")))
}

/// Read frames until a message of the wanted type (or an error body) shows
/// up. Deriv multiplexes everything over one socket, so unrelated frames are
/// skipped rather than treated as failures.
async fn await_msg_type(ws: &mut Ws, wanted: &str) -> Result<ApiResponse, ProviderError> {
    while let Some(frame) = ws.next().await {
        let frame = frame.map_err(|e| ProviderError::Transport(format!("recv: {e}")))?;
        let text = match frame {
            Message::Text(text) => text,
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Close(_) => {
                return Err(ProviderError::Transport("socket closed by peer".into()));
            }
            _ => continue,
        };

        let parsed: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Transport(format!("bad frame: {e}")))?;
        if let Some(err) = parsed.error {
            return Err(ProviderError::Api {
                code: err.code,
                message: err.message,
            });
        }
        if parsed.msg_type.as_deref() == Some(wanted) {
            return Ok(parsed);
        }
    }
    Err(ProviderError::Transport("stream ended mid-request".into()))
}

/// Candles must come back oldest-first with unique timestamps; anything else
/// points at a mangled response worth refetching.
fn validate_ordering(candles: &[Candle]) -> Result<(), ProviderError> {
    let ordered = candles
        .windows(2)
        .all(|w| w[0].timestamp_ms < w[1].timestamp_ms);
    if ordered {
        Ok(())
    } else {
        Err(ProviderError::Transport(
            "candles out of order or duplicated".into(),
        ))
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for DerivProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let timeout = Duration::from_millis(self.cfg.timeout_ms);
        let mut last_err = ProviderError::Transport("no attempts made".into());

        for attempt in 0..=self.cfg.retries {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(self.cfg.backoff_ms)).await;
            }

            let outcome = tokio::time::timeout(
                timeout,
                self.request_candles(symbol, timeframe, count),
            )
            .await;

            match outcome {
                Ok(Ok(candles)) => match validate_ordering(&candles) {
                    Ok(()) => return Ok(candles),
                    Err(err) => {
                        warn!(
                            "{symbol} {timeframe}: attempt {} returned mangled candles: {err}",
                            attempt + 1
                        );
                        last_err = err;
                    }
                },
                Ok(Err(err @ ProviderError::Transport(_))) => {
                    warn!("{symbol} {timeframe}: attempt {} failed: {err}", attempt + 1);
                    last_err = err;
                }
                Ok(Err(err)) => return Err(err),
                Err(_) => {
                    warn!(
                        "{symbol} {timeframe}: attempt {} timed out after {timeout:?}",
                        attempt + 1
                    );
                    last_err = ProviderError::Transport("request timed out".into());
                }
            }
        }
        Err(last_err)
    }
}
