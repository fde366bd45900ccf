//! Внешний API слот-машины для любого слоя отрисовки (веб, натив, терминал).
//!
//! Здесь описываются:
//! - команды (commands.rs): всё, что меняет состояние;
//! - запросы (queries.rs): только чтение;
//! - DTO (dto.rs): сериализуемые снимки для перерисовки;
//! - ошибки (errors.rs): то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
