//! Real-time order channel protocol
//!
//! Server → client frames are JSON text of the form
//! `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderStatus};

/// Server → client push message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum LiveEvent {
    /// Handshake complete, lists the topics this connection is enrolled in
    #[serde(rename = "ready")]
    Ready { topics: Vec<String> },

    /// A new order was committed
    #[serde(rename = "order:created")]
    OrderCreated(Box<Order>),

    /// An order changed status
    #[serde(rename = "order:updated")]
    OrderUpdated {
        order: Box<Order>,
        previous_status: OrderStatus,
    },
}

impl LiveEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LiveEvent::Ready { .. } => "ready",
            LiveEvent::OrderCreated(_) => "order:created",
            LiveEvent::OrderUpdated { .. } => "order:updated",
        }
    }
}
