use web_sys::{window, Storage};
use wheel_shared::ScreenSnapshot;

pub const IMAGE_URL: &str = "https://placebeard.it/640x360";
pub const STATE_STORAGE_KEY: &str = "fortune_wheel_state";
pub const LABEL_TEXT: &str = "It's a text.";
pub const LABEL_FONT: &str = "50px sans-serif";
pub const LABEL_COLOR: &str = "gray";

// Session storage lives exactly as long as the tab, which is the lifetime the
// restore snapshot is meant for.
fn session_storage() -> Option<Storage> {
    window().and_then(|w| w.session_storage().ok().flatten())
}

pub fn load_snapshot() -> Option<ScreenSnapshot> {
    let json = session_storage()?.get_item(STATE_STORAGE_KEY).ok().flatten()?;
    match ScreenSnapshot::from_json(&json) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            log::warn!("Discarding saved wheel state: {}", err);
            None
        }
    }
}

pub fn save_snapshot(snapshot: &ScreenSnapshot) {
    let Some(storage) = session_storage() else {
        return;
    };
    match snapshot.to_json() {
        Ok(json) => {
            if storage.set_item(STATE_STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to save wheel state");
            }
        }
        Err(err) => log::warn!("Failed to serialize wheel state: {}", err),
    }
}
