use std::str::FromStr;
use std::sync::Arc;

use shared::Theme;
use tracing::warn;

use crate::error::Result;
use crate::storage::Storage;

pub const THEME_KEY: &str = "theme";

/// UI preferences, kept apart from the session.
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn Storage>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn theme(&self) -> Theme {
        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::from_str(raw.trim()).unwrap_or_else(|_| {
                warn!(value = %raw, "Unknown stored theme, using default");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(error) => {
                warn!(error = %error, "Fail to read theme preference");
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.storage.set(THEME_KEY, theme.as_ref())?;
        Ok(())
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }
}
