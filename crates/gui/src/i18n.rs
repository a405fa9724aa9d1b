use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ru,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.world" => if ru { "Мир" } else { "World" },
        "menu.back_to_list" => if ru { "К списку миров" } else { "Back to worlds" },
        "menu.save_now" => if ru { "Сохранить  Ctrl+S" } else { "Save now  Ctrl+S" },
        "menu.import_world" => if ru { "Импорт мира..." } else { "Import world..." },
        "menu.import_title" => if ru { "Импорт JSON мира" } else { "Import World JSON" },
        "menu.export_world" => if ru { "Экспорт мира..." } else { "Export world..." },
        "menu.export_title" => if ru { "Экспорт JSON мира" } else { "Export World JSON" },
        "menu.export_glb" => if ru { "Экспорт GLB..." } else { "Export GLB..." },
        "menu.export_glb_title" => if ru { "Экспорт GLB" } else { "Export GLB" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.theme" => if ru { "Тема" } else { "Theme" },
        "menu.show_grid" => if ru { "Сетка" } else { "Grid" },
        "menu.reset_camera" => if ru { "Сбросить камеру  Home" } else { "Reset camera  Home" },
        "menu.frame_walls" => if ru { "Показать стены  F" } else { "Frame walls  F" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Edit modes ──────────────────────────────────────
        "mode.title" => if ru { "Режим" } else { "Mode" },
        "mode.current" => if ru { "Текущий режим" } else { "Current mode" },
        "mode.wall_add" => if ru { "Добавить стены" } else { "Add walls" },
        "mode.wall_delete" => if ru { "Удалить стены" } else { "Delete walls" },
        "mode.delete" => if ru { "Удалить мебель" } else { "Delete furniture" },

        // ── World list ──────────────────────────────────────
        "worlds.title" => if ru { "Миры" } else { "Worlds" },
        "worlds.new" => if ru { "Новый мир" } else { "New world" },
        "worlds.name_hint" => if ru { "Название мира" } else { "World name" },
        "worlds.create" => if ru { "Создать" } else { "Create" },
        "worlds.open" => if ru { "Открыть" } else { "Open" },
        "worlds.delete" => if ru { "Удалить" } else { "Delete" },
        "worlds.export" => if ru { "Экспорт" } else { "Export" },
        "worlds.import" => if ru { "Импорт..." } else { "Import..." },
        "worlds.empty" => if ru { "Миров пока нет" } else { "No worlds yet" },
        "worlds.created" => if ru { "Создан" } else { "Created" },
        "worlds.name_too_short" => if ru { "Название должно быть не короче 3 символов" } else { "Name must be at least 3 characters" },

        // ── Status bar ──────────────────────────────────────
        "status.walls" => if ru { "Стены" } else { "Walls" },
        "status.beams" => if ru { "Балки" } else { "Beams" },
        "status.autosave_ok" => if ru { "Мир автоматически сохранён" } else { "World autosave is success" },
        "status.autosave_failed" => if ru { "Ошибка автосохранения мира" } else { "World autosave is failed" },
        "status.saved" => if ru { "Мир сохранён" } else { "World saved" },
        "status.save_failed" => if ru { "Ошибка сохранения" } else { "Save failed" },
        "status.world_missing" => if ru { "Мир не найден" } else { "World not found" },
        "status.load_failed" => if ru { "Не удалось загрузить мир" } else { "Failed to load world" },
        "status.imported" => if ru { "Мир импортирован" } else { "World imported" },
        "status.import_failed" => if ru { "Ошибка импорта" } else { "Import failed" },
        "status.exported" => if ru { "Экспорт завершён" } else { "Export complete" },
        "status.export_failed" => if ru { "Ошибка экспорта" } else { "Export failed" },
        "status.nothing_to_export" => if ru { "Нет стен для экспорта" } else { "No walls to export" },
        "status.nav_hint" => if ru { "ЛКМ клик: правка • ЛКМ тянуть: вращение • ПКМ: сдвиг • Колесо: масштаб" } else { "LMB click: edit • LMB drag: orbit • RMB drag: pan • Wheel: zoom" },
        "status.no_gl" => if ru { "OpenGL недоступен" } else { "OpenGL unavailable" },

        // ── Settings window ────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.appearance" => if ru { "Оформление" } else { "Appearance" },
        "settings.theme" => if ru { "Тема" } else { "Theme" },
        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Размер ячейки" } else { "Cell size" },
        "settings.grid_range" => if ru { "Количество линий" } else { "Grid lines" },
        "settings.grid_opacity" => if ru { "Прозрачность" } else { "Opacity" },
        "settings.walls" => if ru { "Стены" } else { "Walls" },
        "settings.wall_height" => if ru { "Высота" } else { "Height" },
        "settings.wall_thickness" => if ru { "Толщина" } else { "Thickness" },
        "settings.wall_color" => if ru { "Цвет" } else { "Color" },
        "settings.wall_roughness" => if ru { "Шероховатость" } else { "Roughness" },
        "settings.wall_metalness" => if ru { "Металличность" } else { "Metalness" },
        "settings.input" => if ru { "Ввод" } else { "Input" },
        "settings.drag_threshold" => if ru { "Порог перетаскивания (пикс.)" } else { "Drag threshold (px)" },
        "settings.orbit_speed" => if ru { "Скорость вращения" } else { "Orbit speed" },
        "settings.pan_speed" => if ru { "Скорость сдвига" } else { "Pan speed" },
        "settings.zoom_speed" => if ru { "Скорость масштаба" } else { "Zoom speed" },
        "settings.autosave" => if ru { "Автосохранение" } else { "Autosave" },
        "settings.autosave_enabled" => if ru { "Включено" } else { "Enabled" },
        "settings.autosave_interval" => if ru { "Интервал (с)" } else { "Interval (s)" },
        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

/// Translation key for an edit mode label.
pub fn mode_key(mode: shared::EditMode) -> &'static str {
    match mode {
        shared::EditMode::WallAdd => "mode.wall_add",
        shared::EditMode::WallDelete => "mode.wall_delete",
        shared::EditMode::Delete => "mode.delete",
    }
}
