//! First-launch detection.

use spotifriend_common::PlatformError;

use crate::store::KeyValueStore;

const HAS_LAUNCHED_KEY: &str = "__hasLaunched__";

/// Returns `true` the first time it is called against `store`, then
/// records that the app has launched.
pub fn is_first_launch(store: &dyn KeyValueStore) -> Result<bool, PlatformError> {
    if store.get(HAS_LAUNCHED_KEY)?.as_deref() == Some("true") {
        return Ok(false);
    }
    store.set(HAS_LAUNCHED_KEY, "true")?;
    Ok(true)
}
