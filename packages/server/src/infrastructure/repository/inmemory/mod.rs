//! インメモリ実装

pub mod room;
pub mod subscription;

pub use room::InMemoryRoomRepository;
pub use subscription::InMemorySubscriptionRegistry;
