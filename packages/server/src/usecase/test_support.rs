//! Test doubles shared by the use case tests.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::domain::{
    Color, ConnectionId, DisplayName, IdentityGenerator, MessagePushError, MessagePusher,
    OutboundEvent, PusherChannel, Room,
};

/// MessagePusher that records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingPusher {
    registered: Mutex<HashSet<ConnectionId>>,
    deliveries: Mutex<Vec<(ConnectionId, OutboundEvent)>>,
}

impl RecordingPusher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Events delivered to `connection_id`, in delivery order.
    pub fn events_for(&self, connection_id: &ConnectionId) -> Vec<OutboundEvent> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|(target, _)| target == connection_id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.deliveries.lock().unwrap().clear();
    }

    fn record(&self, connection_id: &ConnectionId, event: &OutboundEvent) -> bool {
        if !self.registered.lock().unwrap().contains(connection_id) {
            return false;
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((connection_id.clone(), event.clone()));
        true
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, connection_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().unwrap().insert(connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.registered.lock().unwrap().remove(connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        if self.record(connection_id, event) {
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(connection_id.to_string()))
        }
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        for target in targets {
            self.record(target, event);
        }
        Ok(())
    }
}

/// IdentityGenerator returning `User-<n>` with a counter and a fixed color.
#[derive(Default)]
pub struct SequentialIdentityGenerator {
    next: Mutex<u32>,
}

impl IdentityGenerator for SequentialIdentityGenerator {
    fn display_name(&self) -> DisplayName {
        let mut next = self.next.lock().unwrap();
        let name = DisplayName::numbered(*next);
        *next += 1;
        name
    }

    fn color(&self) -> Color {
        Color::from_rgb(0x336699)
    }
}

pub fn connection_id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

/// Register `ids` in `room` and with `pusher`, as if each had connected.
pub async fn join_all(room: &mut Room, pusher: &RecordingPusher, ids: &[&str]) {
    let generator = SequentialIdentityGenerator::default();
    for id in ids {
        let id = connection_id(id);
        room.registry.register(id.clone(), &generator);
        let (sender, _frames, _evicted) = PusherChannel::bounded(1);
        pusher.register_client(id, sender).await;
    }
}
