//! UseCase: クライアント接続処理
//!
//! WebSocket 接続ごとに ConnectionId を払い出し、送信キューを Registry に登録します。

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{ConnectionId, ConnectionIdFactory, RoomEvent, SubscriptionRegistry};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Subscription Registry
    registry: Arc<dyn SubscriptionRegistry>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(registry: Arc<dyn SubscriptionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を登録し、払い出した ConnectionId を返す
    ///
    /// # Arguments
    ///
    /// * `outbound` - この接続に向けたイベントの送信チャンネル
    pub async fn execute(&self, outbound: UnboundedSender<RoomEvent>) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate();
        self.registry.register(connection_id.clone(), outbound).await;
        connection_id
    }
}
