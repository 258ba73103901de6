//! Site photos and reports.  Both are open records; only their `date` is
//! interpreted, for the "today" and "this week" dashboard figures.

use chrono::Duration;
use serde_json::{Map, Value};
use stavba_shared::constants::{KEY_PHOTOS, KEY_REPORTS, REPORT_WINDOW_DAYS};
use stavba_shared::types::next_time_id;

use crate::error::Result;
use crate::models::{Photo, Report};
use crate::store::DomainStore;

impl DomainStore {
    pub fn photos(&self) -> Result<Vec<Photo>> {
        self.load_list(KEY_PHOTOS)
    }

    pub fn reports(&self) -> Result<Vec<Report>> {
        self.load_list(KEY_REPORTS)
    }

    /// Store a photo record dated now.
    pub fn add_photo(&mut self, attributes: Map<String, Value>) -> Result<Photo> {
        let now = self.clock().now();
        let mut photos = self.photos()?;
        let photo = Photo {
            id: next_time_id(now, photos.iter().map(|p| p.id).max()),
            date: now,
            attributes,
        };
        photos.push(photo.clone());
        self.commit(vec![Self::write(KEY_PHOTOS, &photos)?])?;
        Ok(photo)
    }

    /// Store a report record dated now.
    pub fn add_report(&mut self, attributes: Map<String, Value>) -> Result<Report> {
        let now = self.clock().now();
        let mut reports = self.reports()?;
        let report = Report {
            id: next_time_id(now, reports.iter().map(|r| r.id).max()),
            date: now,
            attributes,
        };
        reports.push(report.clone());
        self.commit(vec![Self::write(KEY_REPORTS, &reports)?])?;
        Ok(report)
    }

    pub fn photos_today(&self) -> Result<Vec<Photo>> {
        let clock = self.clock();
        Ok(self
            .photos()?
            .into_iter()
            .filter(|p| clock.is_today(p.date))
            .collect())
    }

    /// Reports dated within the last seven days.
    pub fn reports_this_week(&self) -> Result<Vec<Report>> {
        let since = self.clock().now() - Duration::days(REPORT_WINDOW_DAYS);
        Ok(self
            .reports()?
            .into_iter()
            .filter(|r| r.date > since)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::seeded_store;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn photos_today_filters_by_local_day() {
        let (mut store, clock) = seeded_store();
        store.add_photo(attrs(json!({"caption": "včera"}))).unwrap();
        clock.advance(Duration::days(1));
        let fresh = store.add_photo(attrs(json!({"caption": "dnes"}))).unwrap();

        assert_eq!(store.photos().unwrap().len(), 2);
        assert_eq!(store.photos_today().unwrap(), vec![fresh]);
    }

    #[test]
    fn reports_this_week_window() {
        let (mut store, clock) = seeded_store();
        store.add_report(attrs(json!({"title": "stará"}))).unwrap();
        clock.advance(Duration::days(8));
        store.add_report(attrs(json!({"title": "nová"}))).unwrap();

        let week = store.reports_this_week().unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].attributes["title"], "nová");
    }
}
