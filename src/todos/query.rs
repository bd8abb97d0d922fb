use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Active,
}

impl StatusFilter {
    pub fn completed(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Completed => Some(true),
            Self::Active => Some(false),
        }
    }
}

/// Calendar window on `created_at`, evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    /// Sunday through Saturday.
    Week,
    Month,
}

impl DateFilter {
    /// Half-open `[start, end)` window containing `now`.
    pub fn window(self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.date_naive();
        let (start, end) = match self {
            Self::All => return None,
            Self::Today => (today, today + Duration::days(1)),
            Self::Week => {
                let offset = i64::from(today.weekday().num_days_from_sunday());
                let start = today - Duration::days(offset);
                (start, start + Duration::days(7))
            }
            Self::Month => {
                let start = today.with_day(1)?;
                let end = if start.month() == 12 {
                    start.with_year(start.year() + 1)?.with_month(1)?
                } else {
                    start.with_month(start.month() + 1)?
                };
                (start, end)
            }
        };

        Some((
            Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN)),
            Utc.from_utc_datetime(&end.and_time(NaiveTime::MIN)),
        ))
    }
}

/// Listing request as clients send it.
///
/// `cursor` is a plain row offset. Every field has a default, so an empty
/// query string lists the first page of everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoQuery {
    pub cursor: u64,
    pub status: StatusFilter,
    pub date: DateFilter,
    pub title: Option<String>,
}

/// Resolved filter handed to storage. Always scoped to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFilter {
    pub user_id: String,
    pub completed: Option<bool>,
    pub created_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
}

impl TodoQuery {
    pub fn filter_for(&self, user_id: &str, now: DateTime<Utc>) -> TodoFilter {
        TodoFilter {
            user_id: user_id.to_owned(),
            completed: self.status.completed(),
            created_between: self.date.window(now),
            title_contains: self
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToOwned::to_owned),
        }
    }
}

impl TodoFilter {
    pub fn matches(&self, todo: &super::Todo) -> bool {
        todo.user_id == self.user_id
            && self.completed.is_none_or(|c| todo.completed == c)
            && self
                .created_between
                .is_none_or(|(start, end)| todo.created_at >= start && todo.created_at < end)
            && self.title_contains.as_deref().is_none_or(|needle| {
                todo.title.to_lowercase().contains(&needle.to_lowercase())
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_today_window() {
        let (start, end) = DateFilter::Today.window(at(2024, 3, 14, 15)).unwrap();
        assert_eq!(start, at(2024, 3, 14, 0));
        assert_eq!(end, at(2024, 3, 15, 0));
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-03-14 was a Thursday
        let (start, end) = DateFilter::Week.window(at(2024, 3, 14, 15)).unwrap();
        assert_eq!(start, at(2024, 3, 10, 0));
        assert_eq!(end, at(2024, 3, 17, 0));
    }

    #[test]
    fn test_month_window_rolls_over_year() {
        let (start, end) = DateFilter::Month.window(at(2024, 12, 31, 23)).unwrap();
        assert_eq!(start, at(2024, 12, 1, 0));
        assert_eq!(end, at(2025, 1, 1, 0));
    }

    #[test]
    fn test_all_has_no_window() {
        assert_eq!(DateFilter::All.window(Utc::now()), None);
    }

    #[test]
    fn test_query_defaults_from_empty_json() {
        let query: TodoQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, TodoQuery::default());

        let query: TodoQuery =
            serde_json::from_str(r#"{"cursor":10,"status":"active","date":"week"}"#).unwrap();
        assert_eq!(query.cursor, 10);
        assert_eq!(query.status, StatusFilter::Active);
        assert_eq!(query.date, DateFilter::Week);
    }

    #[test]
    fn test_blank_title_is_no_filter() {
        let query = TodoQuery {
            title: Some("  ".to_owned()),
            ..TodoQuery::default()
        };
        assert_eq!(query.filter_for("user123", Utc::now()).title_contains, None);
    }
}
