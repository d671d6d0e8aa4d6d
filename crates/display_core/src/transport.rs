use futures::{SinkExt, StreamExt};
use shared::protocol::Dictionary;
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::{session::SessionEvent, sync::ChannelActionSink};

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to connect to controller at {url}: {source}")]
    Connect {
        url: String,
        source: tokio_tungstenite::tungstenite::Error,
    },
}

/// WebSocket link to the paired controller. Inbound frames are forwarded
/// onto the session event queue; outbound actions are written without
/// waiting for delivery. Dropping the link stops both tasks.
pub struct ControllerLink {
    actions: mpsc::UnboundedSender<Dictionary>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl ControllerLink {
    pub async fn connect(
        url: &Url,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Result<Self, LinkError> {
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|source| LinkError::Connect {
                url: url.to_string(),
                source,
            })?;
        info!(%url, "connected to controller");

        let (mut sink, mut source) = stream.split();
        let (actions, mut outbound) = mpsc::unbounded_channel::<Dictionary>();

        let writer = tokio::spawn(async move {
            while let Some(dict) = outbound.recv().await {
                let frame = match dict.to_json() {
                    Ok(frame) => frame,
                    Err(err) => {
                        warn!(%err, "failed to encode action");
                        continue;
                    }
                };
                if let Err(err) = sink.send(Message::Text(frame)).await {
                    warn!(%err, "controller write failed");
                    break;
                }
            }
        });

        let reader = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(Message::Text(raw)) => match Dictionary::from_json(&raw) {
                        Ok(dict) => {
                            debug!(fields = dict.len(), "controller update");
                            if events.send(SessionEvent::Inbound(dict)).is_err() {
                                break;
                            }
                        }
                        Err(err) => warn!(%err, "dropping malformed controller frame"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(err) => {
                        warn!(%err, "controller link failed");
                        break;
                    }
                }
            }
            info!("controller link closed");
        });

        Ok(Self {
            actions,
            reader,
            writer,
        })
    }

    pub fn action_sink(&self) -> ChannelActionSink {
        ChannelActionSink::new(self.actions.clone())
    }
}

impl Drop for ControllerLink {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
