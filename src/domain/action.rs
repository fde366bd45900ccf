use serde::{Deserialize, Serialize};

/// Одно действие из конфига: подпись + ссылка на картинку.
///
/// После парсинга не меняется. `image` — уже разрешённая ссылка
/// (относительный путь, `local://...` или абсолютный URL).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub image: String,
}

impl Action {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}
