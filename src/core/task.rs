use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    /// Sort weight: higher sorts first.
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, with = "due_time_serde", skip_serializing_if = "Option::is_none")]
    pub due_time: Option<NaiveTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_local();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            completed: false,
            priority: Priority::default(),
            due_date: None,
            due_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The instant this task is due: the due date at the due time, or at
    /// 23:59:59 local when no time is set. None without a due date.
    pub fn due_instant(&self) -> Option<NaiveDateTime> {
        let date = self.due_date?;
        let time = self
            .due_time
            .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        Some(date.and_time(time))
    }

    /// Returns true if this task's due instant has passed. Completed
    /// tasks and tasks without a due date are never overdue.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        if self.completed {
            return false;
        }
        match self.due_instant() {
            Some(due) => now > due,
            None => false,
        }
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == Some(date)
    }
}

/// Stored as "HH:MM"; accepts "HH:MM:SS" on load. Unparseable values
/// load as None rather than failing the whole document.
mod due_time_serde {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.as_deref().and_then(parse_time))
    }

    pub fn parse_time(s: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn new_task_defaults() {
        let task = Task::new("Water the plants");
        assert_eq!(task.title, "Water the plants");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.created_at, task.updated_at);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn due_instant_falls_back_to_end_of_day() {
        let task = Task {
            due_date: Some(date(2026, 3, 10)),
            ..Task::new("unused")
        };
        assert_eq!(
            task.due_instant(),
            Some(date(2026, 3, 10).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap()))
        );
    }

    #[test]
    fn due_instant_uses_due_time_when_set() {
        let task = Task {
            due_date: Some(date(2026, 3, 10)),
            due_time: Some(time(9, 30)),
            ..Task::new("unused")
        };
        assert_eq!(task.due_instant(), Some(date(2026, 3, 10).and_time(time(9, 30))));
    }

    #[test]
    fn overdue_is_strictly_after_due_instant() {
        let task = Task {
            due_date: Some(date(2026, 3, 10)),
            ..Task::new("unused")
        };
        let end_of_day = date(2026, 3, 10).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert!(!task.is_overdue(end_of_day));
        assert!(task.is_overdue(end_of_day + chrono::Duration::seconds(1)));
    }

    #[test]
    fn completed_task_is_never_overdue() {
        let task = Task {
            completed: true,
            due_date: Some(date(2020, 1, 1)),
            ..Task::new("unused")
        };
        assert!(!task.is_overdue(date(2026, 3, 10).and_time(time(12, 0))));
    }

    #[test]
    fn no_due_date_is_never_overdue() {
        let task = Task::new("Someday");
        assert!(!task.is_overdue(date(2099, 1, 1).and_time(time(0, 0))));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let task = Task {
            due_date: Some(date(2026, 3, 10)),
            due_time: Some(time(14, 5)),
            ..Task::new("Call the bank")
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"dueDate\":\"2026-03-10\""));
        assert!(json.contains("\"dueTime\":\"14:05\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"priority\":\"medium\""));
        // Unset optionals are omitted entirely
        assert!(!json.contains("description"));
    }

    #[test]
    fn deserializes_with_absent_optional_fields() {
        let json = r#"{
            "id": "7f2c1d8e-3b4a-4c5d-9e6f-0a1b2c3d4e5f",
            "title": "Minimal",
            "createdAt": "2026-03-01T08:00:00",
            "updatedAt": "2026-03-01T08:00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "Minimal");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.due_date.is_none());
        assert!(task.due_time.is_none());
    }

    #[test]
    fn due_time_accepts_seconds_on_load() {
        let json = r#"{
            "id": "7f2c1d8e-3b4a-4c5d-9e6f-0a1b2c3d4e5f",
            "title": "With seconds",
            "dueDate": "2026-03-10",
            "dueTime": "09:30:15",
            "createdAt": "2026-03-01T08:00:00",
            "updatedAt": "2026-03-01T08:00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_time, Some(NaiveTime::from_hms_opt(9, 30, 15).unwrap()));
    }

    #[test]
    fn priority_weight_ordering() {
        assert!(Priority::High.weight() > Priority::Medium.weight());
        assert!(Priority::Medium.weight() > Priority::Low.weight());
    }

    #[test]
    fn priority_round_trips_through_names() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(Priority::parse(p.as_str()), Some(p));
        }
        assert_eq!(Priority::parse("urgent"), None);
    }
}
