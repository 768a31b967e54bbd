//! Scheduled household tasks and their recurrence rules.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TaskId, TenantId, UserId};

/// Unit of a task's recurrence interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    /// Repeat every N days.
    Days,
    /// Repeat every N weeks.
    Weeks,
    /// Repeat every N calendar months.
    Months,
}

impl std::str::FromStr for FrequencyUnit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            "month" | "months" => Ok(Self::Months),
            other => Err(format!("unknown frequency unit `{other}`; expected days|weeks|months")),
        }
    }
}

/// `frequency_unit` on the wire, where `""` marks a one-off task.
mod optional_unit {
    use serde::de::IntoDeserializer;
    use serde::de::value::StrDeserializer;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::FrequencyUnit;

    pub(super) fn serialize<S: Serializer>(
        unit: &Option<FrequencyUnit>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match unit {
            Some(unit) => unit.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<FrequencyUnit>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => {
                let raw: StrDeserializer<'_, D::Error> = raw.into_deserializer();
                FrequencyUnit::deserialize(raw).map(Some)
            }
        }
    }
}

/// How often a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    /// Number of units between occurrences.
    pub value: i32,
    /// Interval unit.
    pub unit: FrequencyUnit,
}

impl Recurrence {
    /// Due date of the occurrence following a completion at `completed_at`.
    ///
    /// Returns `None` when `value` is not positive or the date overflows.
    pub fn next_due(&self, completed_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let value = u32::try_from(self.value).ok().filter(|v| *v > 0)?;
        match self.unit {
            FrequencyUnit::Days => completed_at.checked_add_signed(Duration::days(value.into())),
            FrequencyUnit::Weeks => {
                completed_at.checked_add_signed(Duration::weeks(value.into()))
            }
            FrequencyUnit::Months => completed_at.checked_add_months(Months::new(value)),
        }
    }
}

/// A task as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub points: i32,
    pub status: String,
    pub scheduled_to: Option<DateTime<Utc>>,
    pub scheduled_by_id: Option<UserId>,
    pub frequency_value: i32,
    /// `None` for a one-off task.
    #[serde(with = "optional_unit")]
    pub frequency_unit: Option<FrequencyUnit>,
    pub completed: bool,
    pub completed_by_id: Option<UserId>,
    pub tenant_id: TenantId,
    pub created_at: DateTime<Utc>,
    pub created_by_id: UserId,
    pub updated_at: DateTime<Utc>,
    pub updated_by_id: Option<UserId>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Recurrence rule of this task, or `None` for a one-off task.
    pub fn recurrence(&self) -> Option<Recurrence> {
        self.frequency_unit.map(|unit| Recurrence {
            value: self.frequency_value,
            unit,
        })
    }

    /// Due date of the follow-up occurrence the backend schedules when a
    /// recurring task is completed.
    ///
    /// The backend stamps the completion as the task's `updated_at`. Open and
    /// one-off tasks have no follow-up.
    pub fn next_occurrence(&self) -> Option<DateTime<Utc>> {
        if !self.completed {
            return None;
        }
        self.recurrence()?.next_due(self.updated_at)
    }

    /// Completer of the task; always `None` while the task is open.
    pub fn completed_by(&self) -> Option<UserId> {
        if self.completed {
            self.completed_by_id
        } else {
            None
        }
    }
}

/// A completed task joined with the completer's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithCompleter {
    #[serde(flatten)]
    pub task: Task,
    pub completed_by_name: Option<String>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub points: i32,
    pub status: String,
    pub scheduled_to: Option<DateTime<Utc>>,
    pub scheduled_by_id: Option<UserId>,
    pub frequency_value: i32,
    /// `None` creates a one-off task.
    #[serde(serialize_with = "optional_unit::serialize")]
    pub frequency_unit: Option<FrequencyUnit>,
}

/// Body of `POST /tasks/{id}/complete`.
///
/// Without a completer the backend credits the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CompleteTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_by_id: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(FrequencyUnit::Days, 3, at(2025, 1, 31), at(2025, 2, 3))]
    #[case(FrequencyUnit::Weeks, 2, at(2025, 1, 31), at(2025, 2, 14))]
    #[case(FrequencyUnit::Months, 1, at(2025, 1, 31), at(2025, 2, 28))]
    fn computes_next_due(
        #[case] unit: FrequencyUnit,
        #[case] value: i32,
        #[case] completed_at: DateTime<Utc>,
        #[case] expected: DateTime<Utc>,
    ) {
        let recurrence = Recurrence { value, unit };
        assert_eq!(recurrence.next_due(completed_at), Some(expected));
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn undefined_frequency_has_no_due_date(#[case] value: i32) {
        let recurrence = Recurrence {
            value,
            unit: FrequencyUnit::Days,
        };
        assert_eq!(recurrence.next_due(at(2025, 1, 1)), None);
    }

    #[rstest]
    #[case("days", FrequencyUnit::Days)]
    #[case(" Week ", FrequencyUnit::Weeks)]
    #[case("MONTHS", FrequencyUnit::Months)]
    fn parses_frequency_units(#[case] raw: &str, #[case] expected: FrequencyUnit) {
        assert_eq!(raw.parse::<FrequencyUnit>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_frequency_units() {
        assert!("years".parse::<FrequencyUnit>().is_err());
        let err = serde_json::from_value::<FrequencyUnit>(json!("years"));
        assert!(err.is_err());
    }

    #[test]
    fn complete_body_omits_absent_completer() {
        let anonymous = serde_json::to_value(CompleteTask::default()).expect("serialise");
        assert_eq!(anonymous, json!({}));

        let credited = CompleteTask {
            completed_by_id: Some(UserId::new(8)),
        };
        assert_eq!(
            serde_json::to_value(credited).expect("serialise"),
            json!({ "completed_by_id": 8 })
        );
    }

    fn task_json(frequency_value: i32, frequency_unit: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 1,
            "title": "Dishes",
            "description": "",
            "points": 2,
            "status": "pending",
            "scheduled_to": null,
            "scheduled_by_id": null,
            "frequency_value": frequency_value,
            "frequency_unit": frequency_unit,
            "completed": false,
            "completed_by_id": 4,
            "tenant_id": 1,
            "created_at": "2025-01-01T00:00:00Z",
            "created_by_id": 1,
            "updated_at": "2025-01-31T09:00:00Z",
            "updated_by_id": null,
            "deleted_at": null
        })
    }

    #[test]
    fn open_task_never_reports_a_completer() {
        let mut task: Task =
            serde_json::from_value(task_json(1, json!("days"))).expect("decode task");

        assert_eq!(task.completed_by(), None);
        task.completed = true;
        assert_eq!(task.completed_by(), Some(UserId::new(4)));
    }

    #[rstest]
    #[case(json!(""))]
    #[case(json!(null))]
    fn blank_unit_decodes_as_one_off_task(#[case] unit: serde_json::Value) {
        let tasks: Vec<Task> =
            serde_json::from_value(json!([task_json(0, unit), task_json(2, json!("weeks"))]))
                .expect("decode tasks");

        assert_eq!(tasks[0].frequency_unit, None);
        assert_eq!(tasks[0].recurrence(), None);
        assert_eq!(tasks[1].frequency_unit, Some(FrequencyUnit::Weeks));
    }

    #[test]
    fn unknown_unit_on_a_task_is_rejected() {
        let err = serde_json::from_value::<Task>(task_json(1, json!("years")));
        assert!(err.is_err());
    }

    #[test]
    fn one_off_task_serialises_with_blank_unit() {
        let task: Task = serde_json::from_value(task_json(0, json!(""))).expect("decode task");
        let encoded = serde_json::to_value(&task).expect("encode task");
        assert_eq!(encoded["frequency_unit"], json!(""));

        let new_task = NewTask {
            title: "Fix tap".to_owned(),
            description: String::new(),
            points: 3,
            status: "pending".to_owned(),
            scheduled_to: None,
            scheduled_by_id: None,
            frequency_value: 0,
            frequency_unit: None,
        };
        let body = serde_json::to_value(&new_task).expect("encode body");
        assert_eq!(body["frequency_unit"], json!(""));
    }

    #[rstest]
    #[case(true, json!("months"), Some(at(2025, 2, 28)))]
    #[case(false, json!("months"), None)]
    #[case(true, json!(""), None)]
    fn next_occurrence_follows_completion(
        #[case] completed: bool,
        #[case] unit: serde_json::Value,
        #[case] expected: Option<DateTime<Utc>>,
    ) {
        let mut task: Task = serde_json::from_value(task_json(1, unit)).expect("decode task");
        task.completed = completed;

        assert_eq!(task.next_occurrence(), expected);
    }
}
