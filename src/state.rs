//! Services shared by every Telegram handler
//!
//! Built once at startup and injected into the dispatcher as
//! `Arc<AppState>`.

use crate::database::Store;
use crate::solana::ChainClient;
use crate::telegram::session::SessionStore;
use crate::upload::AssetUploader;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub chain: ChainClient,
    pub uploader: AssetUploader,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        chain: ChainClient,
        uploader: AssetUploader,
        sessions: SessionStore,
    ) -> Self {
        Self {
            store,
            chain,
            uploader,
            sessions,
        }
    }
}
