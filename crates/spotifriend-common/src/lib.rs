pub mod errors;
pub mod notifications;

pub use errors::{ConfigError, PlatformError, SpotifriendError};
pub use notifications::{Notification, NotificationSlot, DEFAULT_NOTIFICATION_TTL};

pub type Result<T> = std::result::Result<T, SpotifriendError>;
