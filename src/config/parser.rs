//! Парсер текстового конфига.
//!
//! Формат построчный:
//!
//! ```text
//! title=Demo
//! action1=Hug,hug.png
//! action2=Wink,https://example.com/wink.png
//! ```
//!
//! Разделители — только первый `=` и первый `,`; экранирования нет.
//! Порядок действий = порядок строк, номер в ключе `actionN` не важен.

use log::{debug, warn};

use crate::domain::{Action, GameConfig, DEFAULT_TITLE};
use crate::engine::EngineError;

use super::ImagePathResolver;

/// Префикс ключей, задающих действия.
const ACTION_KEY_PREFIX: &str = "action";
const TITLE_KEY: &str = "title";

/// Разобрать текст конфига.
///
/// Строки без `=` или с пустой (до обрезки пробелов) частью молча пропускаются.
/// Если не нашлось ни одного действия — `EngineError::InvalidConfig`.
pub fn parse_config(
    text: &str,
    resolver: &dyn ImagePathResolver,
) -> Result<GameConfig, EngineError> {
    let mut title: Option<String> = None;
    let mut actions = Vec::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let Some((key, value)) = split_pair(line, '=') else {
            continue;
        };

        if key == TITLE_KEY {
            // Последнее вхождение побеждает.
            title = Some(value.to_string());
        } else if key.starts_with(ACTION_KEY_PREFIX) {
            match split_pair(value, ',').filter(|(n, p)| !n.is_empty() && !p.is_empty()) {
                Some((name, image_path)) => {
                    actions.push(Action::new(name, resolver.resolve(image_path)));
                }
                None => debug!("config: skipping incomplete action line for key `{}`", key),
            }
        }
    }

    if actions.is_empty() {
        warn!("config: no usable action lines found");
        return Err(EngineError::InvalidConfig);
    }

    Ok(GameConfig::new(
        title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        actions,
    ))
}

/// Разбить по первому разделителю и обрезать пробелы.
/// `None`, если разделителя нет или одна из частей пустая до обрезки:
/// `title=   ` даёт пустой заголовок, а не пропуск строки.
fn split_pair(s: &str, sep: char) -> Option<(&str, &str)> {
    let (left, right) = s.split_once(sep)?;
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.trim(), right.trim()))
}

#[cfg(test)]
mod tests {
    use super::split_pair;

    #[test]
    fn split_pair_uses_first_separator_only() {
        assert_eq!(split_pair("a = b = c", '='), Some(("a", "b = c")));
        assert_eq!(split_pair("Hug, a,b.png", ','), Some(("Hug", "a,b.png")));
    }

    #[test]
    fn split_pair_rejects_missing_parts() {
        assert_eq!(split_pair("no separator", '='), None);
        assert_eq!(split_pair("key=", '='), None);
        assert_eq!(split_pair("=value", '='), None);
    }

    #[test]
    fn split_pair_checks_emptiness_before_trim() {
        assert_eq!(split_pair("title=   ", '='), Some(("title", "")));
        assert_eq!(split_pair("  =value", '='), Some(("", "value")));
    }
}
