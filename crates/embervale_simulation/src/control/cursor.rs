//! Cursor presenter: категория взаимодействия → (image, hotspot)
//!
//! Таблица mapping'ов фиксируется при authoring. Lookup тотальный:
//! отсутствующая категория падает на первую запись таблицы (index 0),
//! с warning'ом в лог — это конфигурационный баг, но не ошибка рантайма.

use bevy::prelude::*;

use crate::logger;

/// Закрытый набор категорий взаимодействия
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorType {
    None,
    Movement,
    Combat,
    Pickup,
    Ui,
}

/// Авторская запись: категория → изображение курсора + hotspot
#[derive(Debug, Clone)]
pub struct CursorMapping {
    pub cursor_type: CursorType,
    /// Путь к asset'у курсора (host загружает сам)
    pub image: String,
    /// Смещение hotspot в пикселях от левого верхнего угла
    pub hotspot: Vec2,
}

impl CursorMapping {
    pub fn new(cursor_type: CursorType, image: &str, hotspot: Vec2) -> Self {
        Self {
            cursor_type,
            image: image.to_string(),
            hotspot,
        }
    }
}

/// Host-сторона отображения курсора (ОС/движок). Для headless — `NullCursorHost`.
pub trait CursorHost: Send + Sync {
    fn apply(&self, mapping: &CursorMapping);
}

/// Host для headless запусков: курсор никуда не выводится
pub struct NullCursorHost;

impl CursorHost for NullCursorHost {
    fn apply(&self, _mapping: &CursorMapping) {}
}

/// Presenter: хранит таблицу mapping'ов и текущую категорию,
/// проталкивает resolved mapping в `CursorHost`
#[derive(Resource)]
pub struct CursorPresenter {
    mappings: Vec<CursorMapping>,
    host: Box<dyn CursorHost>,
    current: Option<CursorType>,
}

impl Default for CursorPresenter {
    fn default() -> Self {
        Self::headless(default_mappings())
    }
}

impl CursorPresenter {
    pub fn new(mappings: Vec<CursorMapping>, host: Box<dyn CursorHost>) -> Self {
        Self {
            mappings,
            host,
            current: None,
        }
    }

    pub fn headless(mappings: Vec<CursorMapping>) -> Self {
        Self::new(mappings, Box::new(NullCursorHost))
    }

    /// Категория, установленная последним вызовом `set_cursor`
    pub fn current(&self) -> Option<CursorType> {
        self.current
    }

    /// Тотальный lookup: точное совпадение, иначе первая запись таблицы.
    /// `None` только для пустой таблицы.
    pub fn mapping_for(&self, cursor_type: CursorType) -> Option<&CursorMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.cursor_type == cursor_type)
            .or_else(|| self.mappings.first())
    }

    /// Устанавливает курсор категории (вызывается каждый тик контроллером)
    pub fn set_cursor(&mut self, cursor_type: CursorType) {
        let exact = self
            .mappings
            .iter()
            .any(|mapping| mapping.cursor_type == cursor_type);

        // Warning только при смене категории, иначе спам каждый тик
        if !exact && self.current != Some(cursor_type) {
            if self.mappings.is_empty() {
                logger::log_warning("CursorPresenter: mapping table is empty, cursor left unchanged");
            } else {
                logger::log_warning(&format!(
                    "CursorPresenter: no mapping for {:?}, falling back to first entry",
                    cursor_type
                ));
            }
        }

        let Some(mapping) = self.mapping_for(cursor_type) else {
            return;
        };

        self.host.apply(mapping);
        self.current = Some(cursor_type);
    }
}

/// Стандартная таблица (все категории, hotspot в нуле)
pub fn default_mappings() -> Vec<CursorMapping> {
    vec![
        CursorMapping::new(CursorType::None, "cursors/neutral.png", Vec2::ZERO),
        CursorMapping::new(CursorType::Movement, "cursors/movement.png", Vec2::new(4.0, 4.0)),
        CursorMapping::new(CursorType::Combat, "cursors/combat.png", Vec2::new(16.0, 16.0)),
        CursorMapping::new(CursorType::Pickup, "cursors/pickup.png", Vec2::ZERO),
        CursorMapping::new(CursorType::Ui, "cursors/ui.png", Vec2::ZERO),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_entry_table() -> Vec<CursorMapping> {
        vec![
            CursorMapping::new(CursorType::None, "cursors/neutral.png", Vec2::ZERO),
            CursorMapping::new(CursorType::Movement, "cursors/movement.png", Vec2::new(4.0, 4.0)),
        ]
    }

    #[test]
    fn test_lookup_exact_category() {
        let presenter = CursorPresenter::headless(two_entry_table());

        let mapping = presenter.mapping_for(CursorType::Movement).unwrap();
        assert_eq!(mapping.cursor_type, CursorType::Movement);
        assert_eq!(mapping.image, "cursors/movement.png");
    }

    #[test]
    fn test_lookup_missing_category_falls_back_to_index_0() {
        let presenter = CursorPresenter::headless(two_entry_table());

        // Combat не замаплен → первая запись таблицы, не ошибка
        let mapping = presenter.mapping_for(CursorType::Combat).unwrap();
        assert_eq!(mapping.cursor_type, CursorType::None);
    }

    #[test]
    fn test_set_cursor_tracks_current() {
        let mut presenter = CursorPresenter::headless(two_entry_table());
        assert_eq!(presenter.current(), None);

        presenter.set_cursor(CursorType::Movement);
        assert_eq!(presenter.current(), Some(CursorType::Movement));

        // Незамапленная категория устанавливается (через fallback)
        presenter.set_cursor(CursorType::Combat);
        assert_eq!(presenter.current(), Some(CursorType::Combat));
    }

    #[test]
    fn test_empty_table_does_not_panic() {
        let mut presenter = CursorPresenter::headless(Vec::new());
        presenter.set_cursor(CursorType::Movement);
        assert_eq!(presenter.current(), None);
    }
}
