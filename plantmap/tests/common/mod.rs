//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use plantmap::boundary::{BoundarySource, FetchError};
use plantmap::model::Tier;

/// What a gated fetch resolves to.
#[derive(Debug)]
pub enum Payload {
    Body(Vec<u8>),
    Status(u16),
}

/// Boundary source whose fetches resolve only when the test says so.
///
/// Each call to [`GatedSource::gate`] queues one fetch for a tier; fetches
/// take gates in FIFO order.
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<HashMap<Tier, VecDeque<oneshot::Receiver<Payload>>>>,
}

impl GatedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fetch for `tier`, returning the sender that resolves it.
    pub fn gate(&self, tier: Tier) -> oneshot::Sender<Payload> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().entry(tier).or_default().push_back(rx);
        tx
    }
}

impl BoundarySource for GatedSource {
    async fn fetch(&self, tier: Tier) -> Result<Vec<u8>, FetchError> {
        let gate = self.gates.lock().get_mut(&tier).and_then(VecDeque::pop_front);
        let Some(gate) = gate else {
            return Err(FetchError::Transport {
                tier,
                message: "no gate queued".to_string(),
            });
        };
        match gate.await {
            Ok(Payload::Body(bytes)) => Ok(bytes),
            Ok(Payload::Status(status)) => Err(FetchError::Status { tier, status }),
            Err(_) => Err(FetchError::Transport {
                tier,
                message: "gate dropped".to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

/// A small square polygon around `(lat, lng)`.
fn square(lat: f64, lng: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [lng - 0.01, lat - 0.01],
            [lng + 0.01, lat - 0.01],
            [lng + 0.01, lat + 0.01],
            [lng - 0.01, lat + 0.01],
            [lng - 0.01, lat - 0.01]
        ]]
    })
}

/// Feature collection payload with one feature per property object.
pub fn collection(properties: Vec<Value>) -> Payload {
    let features: Vec<Value> = properties
        .into_iter()
        .enumerate()
        .map(|(i, props)| {
            json!({
                "type": "Feature",
                "properties": props,
                "geometry": square(6.6 + i as f64 * 0.05, 99.95)
            })
        })
        .collect();
    Payload::Body(
        json!({ "type": "FeatureCollection", "features": features })
            .to_string()
            .into_bytes(),
    )
}

/// Payload the boundary service sends when its query fails.
pub fn error_payload(message: &str) -> Payload {
    Payload::Body(json!({ "error": message }).to_string().into_bytes())
}

pub fn districts() -> Payload {
    collection(vec![
        json!({ "name": "Mueang Satun", "provinceName": "Satun" }),
        json!({ "name": "La-ngu", "provinceName": "Satun" }),
    ])
}

pub fn villages(names: &[&str]) -> Payload {
    collection(
        names
            .iter()
            .map(|name| {
                json!({ "name": name, "tambonName": "Phiman", "districtName": "Mueang Satun" })
            })
            .collect(),
    )
}
