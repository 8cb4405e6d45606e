// Network interface counters and per-interval deltas

use serde::{Deserialize, Serialize};

/// Interface excluded from traffic totals.
pub const LOOPBACK_INTERFACE: &str = "lo";

/// Raw cumulative counters for one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceCounters {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl InterfaceCounters {
    pub fn new(name: impl Into<String>, rx_bytes: u64, tx_bytes: u64) -> Self {
        Self {
            name: name.into(),
            rx_bytes,
            tx_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTotals {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl NetworkTotals {
    /// Sums every interface except loopback.
    pub fn aggregate<'a>(interfaces: impl IntoIterator<Item = &'a InterfaceCounters>) -> Self {
        interfaces
            .into_iter()
            .filter(|i| i.name != LOOPBACK_INTERFACE)
            .fold(Self::default(), |acc, i| Self {
                rx_bytes: acc.rx_bytes.saturating_add(i.rx_bytes),
                tx_bytes: acc.tx_bytes.saturating_add(i.tx_bytes),
            })
    }
}

/// Traffic since the previous sample. Zero on the baseline sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDelta {
    pub bytes_received: u64,
    pub bytes_sent: u64,
    #[serde(default)]
    pub received_bytes_per_sec: f64,
    #[serde(default)]
    pub transmitted_bytes_per_sec: f64,
}

impl NetworkDelta {
    pub fn between(prev: &NetworkTotals, cur: &NetworkTotals, elapsed_secs: f64) -> Self {
        let bytes_received = cur.rx_bytes.saturating_sub(prev.rx_bytes);
        let bytes_sent = cur.tx_bytes.saturating_sub(prev.tx_bytes);
        let (received_bytes_per_sec, transmitted_bytes_per_sec) = if elapsed_secs > 0.0 {
            (
                bytes_received as f64 / elapsed_secs,
                bytes_sent as f64 / elapsed_secs,
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            bytes_received,
            bytes_sent,
            received_bytes_per_sec,
            transmitted_bytes_per_sec,
        }
    }
}
