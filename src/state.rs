use crate::prayer::{AladhanClient, PrayerTimeProvider};
use crate::storage::SharedStore;
use std::sync::Arc;

pub type Provider = PrayerTimeProvider<AladhanClient, SharedStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub prayers: Arc<Provider>,
}

impl AppState {
    pub fn new(store: SharedStore, source: AladhanClient) -> Self {
        Self {
            prayers: Arc::new(PrayerTimeProvider::new(source, Arc::clone(&store))),
            store,
        }
    }
}
