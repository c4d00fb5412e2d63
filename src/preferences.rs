use crate::errors::StoreError;
use crate::storage::KeyValueStore;
use tracing::info;

pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DarkModePreference {
    Enabled,
    Disabled,
}

impl DarkModePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            DarkModePreference::Enabled => "enabled",
            DarkModePreference::Disabled => "disabled",
        }
    }

    /// Only the exact string `"enabled"` turns dark mode on.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("enabled") => DarkModePreference::Enabled,
            _ => DarkModePreference::Disabled,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == DarkModePreference::Enabled
    }
}

impl From<bool> for DarkModePreference {
    fn from(enabled: bool) -> Self {
        if enabled {
            DarkModePreference::Enabled
        } else {
            DarkModePreference::Disabled
        }
    }
}

pub trait ThemeSurface {
    fn set_dark_class(&mut self, on: bool);
    fn set_toggle_checked(&mut self, checked: bool);
}

pub struct DarkMode<K> {
    store: K,
}

impl<K: KeyValueStore> DarkMode<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn load(&self) -> DarkModePreference {
        DarkModePreference::from_stored(self.store.get(DARK_MODE_KEY).as_deref())
    }

    /// Applies a saved preference at startup. A light page is left untouched.
    pub fn init(&self, surface: &mut impl ThemeSurface) -> DarkModePreference {
        let preference = self.load();
        if preference.is_enabled() {
            surface.set_dark_class(true);
            surface.set_toggle_checked(true);
        }
        preference
    }

    pub async fn toggle(
        &self,
        surface: &mut impl ThemeSurface,
        enabled: bool,
    ) -> Result<DarkModePreference, StoreError> {
        let preference = DarkModePreference::from(enabled);
        surface.set_dark_class(enabled);
        self.save(preference).await?;
        Ok(preference)
    }

    pub async fn save(&self, preference: DarkModePreference) -> Result<(), StoreError> {
        self.store.set(DARK_MODE_KEY, preference.as_str()).await?;
        info!("dark mode {}", preference.as_str());
        Ok(())
    }
}
