use std::collections::HashSet;

use serde::Serialize;

use crate::error::Result;
use crate::store::DomainStore;

/// Headline figures of the dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_projects: usize,
    pub photos_today: usize,
    pub reports_this_week: usize,
    /// Distinct users with an open check-in today.
    pub checked_in_now: usize,
}

impl DomainStore {
    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        let clock = self.clock();
        let checked_in: HashSet<_> = self
            .attendance()?
            .into_iter()
            .filter(|e| e.is_open() && clock.is_today(e.date))
            .map(|e| e.user_id)
            .collect();

        Ok(DashboardStats {
            active_projects: self.projects()?.iter().filter(|p| p.is_active()).count(),
            photos_today: self.photos_today()?.len(),
            reports_this_week: self.reports_this_week()?.len(),
            checked_in_now: checked_in.len(),
        })
    }
}
