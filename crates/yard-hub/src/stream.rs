//! Push-channel connection: fence events in, location commands out.
//!
//! [`connect`] opens the WebSocket, subscribes to `fence_events`, and
//! splits the socket into two background tasks:
//!
//! - the **reader** parses inbound envelopes and forwards fence-event
//!   batches over an unbounded mpsc channel (malformed frames are logged
//!   and skipped — one bad payload must not wedge the scheduler);
//! - the **writer** drains queued [`LocationUpdate`]s and sends them as
//!   `location_updates` messages.
//!
//! [`LocationFeed::send`] is fire-and-forget by design: a location command
//! is a position sample, and a lost sample is repaired by the next tick.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::warn;

use crate::error::HubResult;
use crate::wire::{Envelope, FenceEvent, LocationUpdate, TOPIC_FENCE_EVENTS};

/// The two ends of an established push-channel connection.
pub struct EventChannel {
    /// Inbound fence-crossing batches, in arrival order.
    pub fences: mpsc::UnboundedReceiver<Vec<FenceEvent>>,

    /// Outbound movement-command handle; clone freely.
    pub locations: LocationFeed,
}

/// Cloneable handle for enqueueing outbound location updates.
#[derive(Clone)]
pub struct LocationFeed {
    tx: mpsc::UnboundedSender<LocationUpdate>,
}

impl LocationFeed {
    /// A feed plus the receiver draining it.  [`connect`] wires the receiver
    /// to the socket; tests read it directly.
    pub fn channel() -> (LocationFeed, mpsc::UnboundedReceiver<LocationUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LocationFeed { tx }, rx)
    }

    /// Queue one movement command.  Never blocks; a closed channel is
    /// logged and the command dropped (the next tick re-emits a position).
    pub fn send(&self, update: LocationUpdate) {
        if self.tx.send(update).is_err() {
            warn!("location feed closed; dropping movement command");
        }
    }
}

/// Connect to the platform's push channel and subscribe to fence events.
pub async fn connect(ws_url: &str) -> HubResult<EventChannel> {
    let (socket, _) = connect_async(ws_url).await?;
    let (mut sink, mut source) = socket.split();

    let subscribe = serde_json::to_string(&Envelope::subscribe(TOPIC_FENCE_EVENTS))?;
    sink.send(Message::Text(subscribe)).await?;

    let (fence_tx, fence_rx) = mpsc::unbounded_channel();
    let (feed, mut location_rx) = LocationFeed::channel();

    // Writer: location commands → socket.
    tokio::spawn(async move {
        while let Some(update) = location_rx.recv().await {
            let envelope = Envelope::location_message(&[update]);
            let Ok(text) = serde_json::to_string(&envelope) else {
                continue;
            };
            if let Err(err) = sink.send(Message::Text(text)).await {
                warn!(%err, "push channel write failed; stopping writer");
                break;
            }
        }
    });

    // Reader: socket → fence-event batches.
    tokio::spawn(async move {
        while let Some(frame) = source.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(_) => continue, // pings, pongs, binary: not ours
                Err(err) => {
                    warn!(%err, "push channel read failed; stopping reader");
                    break;
                }
            };

            let envelope: Envelope = match serde_json::from_str(&text) {
                Ok(envelope) => envelope,
                Err(err) => {
                    warn!(%err, "unparseable push frame; skipping");
                    continue;
                }
            };
            if !envelope.is_message_for(TOPIC_FENCE_EVENTS) {
                continue;
            }

            match envelope.fence_events() {
                Ok(batch) => {
                    if fence_tx.send(batch).is_err() {
                        break; // scheduler gone; nothing left to feed
                    }
                }
                Err(err) => warn!(%err, "malformed fence-event payload; skipping"),
            }
        }
    });

    Ok(EventChannel {
        fences: fence_rx,
        locations: feed,
    })
}
