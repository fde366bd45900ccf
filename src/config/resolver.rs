//! Разрешение путей к картинкам на этапе парсинга.
//!
//! Парсер отдаёт сырой путь из конфига стратегии и кладёт в `Action`
//! то, что она вернула. Никакого I/O здесь нет: проверка, что картинка
//! действительно существует, делается при отрисовке (`infra::assets`).

/// Корень каталога с картинками по умолчанию.
pub const DEFAULT_IMAGES_ROOT: &str = "images/";

/// Схема локальных ресурсов десктопной оболочки.
pub const LOCAL_PROTOCOL_PREFIX: &str = "local://";

/// Стратегия превращения сырого пути из конфига в ссылку на картинку.
pub trait ImagePathResolver {
    fn resolve(&self, raw_path: &str) -> String;
}

/// Абсолютные URL не трогаем.
fn is_remote(path: &str) -> bool {
    path.starts_with("http")
}

/// Обычный режим (статическая страница / браузер):
/// URL проходит как есть, остальное — относительно `root`.
#[derive(Clone, Debug)]
pub struct ImagesDirResolver {
    pub root: String,
}

impl ImagesDirResolver {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ImagesDirResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGES_ROOT)
    }
}

impl ImagePathResolver for ImagesDirResolver {
    fn resolve(&self, raw_path: &str) -> String {
        if is_remote(raw_path) {
            raw_path.to_string()
        } else {
            format!("{}{}", self.root, raw_path)
        }
    }
}

/// Режим десктопной оболочки с привилегированным доступом к файлам:
/// локальные пути дополнительно заворачиваются в `local://`.
#[derive(Clone, Debug, Default)]
pub struct LocalProtocolResolver<R> {
    inner: R,
}

impl<R: ImagePathResolver> LocalProtocolResolver<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: ImagePathResolver> ImagePathResolver for LocalProtocolResolver<R> {
    fn resolve(&self, raw_path: &str) -> String {
        let resolved = self.inner.resolve(raw_path);
        if is_remote(raw_path) {
            resolved
        } else {
            format!("{}{}", LOCAL_PROTOCOL_PREFIX, resolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_dir_prefixes_local_paths() {
        let r = ImagesDirResolver::default();
        assert_eq!(r.resolve("hug.png"), "images/hug.png");
        assert_eq!(r.resolve("https://x.io/a.png"), "https://x.io/a.png");
    }

    #[test]
    fn local_protocol_wraps_only_local_paths() {
        let r = LocalProtocolResolver::new(ImagesDirResolver::default());
        assert_eq!(r.resolve("hug.png"), "local://images/hug.png");
        assert_eq!(r.resolve("http://x.io/a.png"), "http://x.io/a.png");
    }
}
