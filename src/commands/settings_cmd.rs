use crate::models::settings::AppSettings;
use crate::AppState;

pub fn get_settings(
    state: &AppState,
) -> Result<AppSettings, String> {
    state.db.load_settings().map_err(|e| e.to_string())
}

/// Persists settings. The export client picks up endpoint and timeout
/// changes on the next `AppState` construction.
pub fn save_settings(
    state: &AppState,
    settings: AppSettings,
) -> Result<(), String> {
    state.db.save_settings(&settings).map_err(|e| e.to_string())
}

pub fn update_settings(
    state: &AppState,
    update: impl FnOnce(&mut AppSettings),
) -> Result<AppSettings, String> {
    let mut settings = state.db.load_settings().map_err(|e| e.to_string())?;
    update(&mut settings);
    state.db.save_settings(&settings).map_err(|e| e.to_string())?;
    Ok(settings)
}
