use stavba_shared::constants::KEY_THEME;
use stavba_shared::Theme;

use crate::error::Result;
use crate::store::DomainStore;

impl DomainStore {
    pub fn theme(&self) -> Result<Theme> {
        Ok(self.load(KEY_THEME)?.unwrap_or_default())
    }

    /// Flip light/dark and persist.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme()?.toggled();
        self.commit(vec![Self::write(KEY_THEME, &next)?])?;
        tracing::info!(theme = %next, "theme changed");
        Ok(next)
    }
}
