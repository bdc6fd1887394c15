//! Infrastructure layer
//!
//! ドメイン層が定義する trait の具体的な実装（インメモリストア、外部 AI クライアント）と
//! 通信用の DTO を提供します。

pub mod ai_responder;
pub mod dto;
pub mod repository;
