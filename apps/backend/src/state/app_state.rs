use std::sync::Arc;

use crate::ws::hub::RoomRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Registry of live rooms and the connections seated at them
    rooms: Arc<RoomRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RoomRegistry::new()),
        }
    }

    pub fn rooms(&self) -> Arc<RoomRegistry> {
        self.rooms.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
