//! Загрузка конфига игры из текста `key=value`.
//!
//! - `parser`: чистое преобразование текста в `GameConfig`;
//! - `resolver`: стратегии разрешения путей к картинкам (без I/O).

pub mod parser;
pub mod resolver;

pub use parser::parse_config;
pub use resolver::{
    ImagePathResolver, ImagesDirResolver, LocalProtocolResolver, DEFAULT_IMAGES_ROOT,
    LOCAL_PROTOCOL_PREFIX,
};
