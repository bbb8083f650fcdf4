//! User-facing message and button templates.
//!
//! Button texts double as dispatch keys: the main-menu and clear-confirmation
//! keyboards are reply keyboards, so Telegram delivers a press as a plain
//! text message with exactly the button's text.

pub const START: &str = "👋 Вас вітає KinoBot! Я бот для пошуку фільмів.\nСкористайтесь кнопками для початку роботи.";

pub const START_DB_ERROR: &str = "💔 Щось пішло не так. Спробуйте команду /start ще раз пізніше\nФункціонал обраних фільмів тимчасово недоступний";
pub const GENERAL_ERROR: &str = "💔 Щось пішло не так. Спробуйте пізніше";
pub const STORE_ERROR: &str = "💔 Функціонал обраних фільмів тимчасово недоступний. Спробуйте пізніше";
pub const ERROR_ACCESS_DENIED: &str = "🚫 Цю команду можуть використовувати лише адміністратори";

pub const STATE_SEARCH_INPUT: &str = "🔎 Пошук фільму. Відправте мені назву фільму";
pub const SEARCH_NOT_FOUND: &str =
    "💔 Нічого не знайдено. Спробуйте інший пошуковий запит або англійську мову";
pub const SEARCH_MISSING_QUERY: &str =
    "💔 Неправильне використання команди, введіть параметри пошуку";
pub const SEARCH_MORE_PENDING: &str = "Буде показано ще результатів пошуку: ";
pub const SEARCH_MORE_DISPLAYED_ALERT: &str = "Показано ще варіантів: ";
pub const BUTTON_SHOW_MORE: &str = "🔎 Показати інші варіанти";

pub const BUTTON_FAVORITES_ADD: &str = "❤️ Додати до обраного";
pub const BUTTON_FAVORITES_REMOVE: &str = "❌ Видалити з обраного";

pub const ALERT_FAVORITES_ADDED: &str = "✅ Фільм додано до обраного";
pub const ALERT_FAVORITES_REMOVED: &str = "❌ Фільм видалено з обраного";

pub const FAVORITES_LIST_EMPTY: &str = "😞 У Вас поки немає обраних фільмів";

pub const BUTTON_SEARCH: &str = "🔎 Пошук фільму";
pub const BUTTON_FAVORITES_SHOW: &str = "❤️ Обрані фільми";
pub const BUTTON_TRENDING: &str = "🔥 Популярні фільми";
pub const BUTTON_FAVORITES_CLEAR: &str = "🗑️ Очистити обрані фільми";
pub const BUTTON_HELP: &str = "💡 Допомога";

pub const DIALOG_CLEAR_CONFIRM: &str = "❗️ Ви впевнені, що хочете очистити список обраних фільмів?\n\nЦю дію неможливо буде повернути";
pub const BUTTON_CLEAR_CONFIRM: &str = "✅ Так, очистити";
pub const BUTTON_CLEAR_CANCEL: &str = "🚫 Ні, не очищати";
pub const ALERT_CLEAR_SUCCESS: &str = "🗑️ Список обраних фільмів очищено";
pub const ALERT_CLEAR_CANCELLED: &str = "✅ Список обраних фільмів залишено без змін";

pub const RATING_NONE: &str = "Немає рейтингу";
pub const TRAILER_LINK: &str = "Трейлер (YouTube)";

pub const HELP: &str = "Перелік команд:\n/search - пошук фільму\n/favorites - список обраних фільмів\n/trending - популярні зараз фільми\n/clear_favorites - очистити список обраних фільмів\n/help - допомога";
