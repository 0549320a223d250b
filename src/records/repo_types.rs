use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Account status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Active,
    Blocked,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(RecordStatus::Active),
            "Blocked" => Ok(RecordStatus::Blocked),
            other => anyhow::bail!("unknown record status {other:?}"),
        }
    }
}

/// User record as held by the controller and returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String, // stored and compared in the clear
    #[serde(with = "iso_date")]
    pub registration_date: Date,
    #[serde(with = "iso_date::option")]
    pub last_login: Option<Date>,
    pub status: RecordStatus,
}

impl Record {
    pub fn is_blocked(&self) -> bool {
        self.status == RecordStatus::Blocked
    }
}

/// A record the store has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub registration_date: Date,
    pub status: RecordStatus,
}

impl NewRecord {
    pub fn with_id(self, id: String) -> Record {
        Record {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            registration_date: self.registration_date,
            last_login: None,
            status: self.status,
        }
    }
}

/// Row in the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct RecordRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub registration_date: Date,
    pub last_login: Option<Date>,
    pub status: String,
}

impl TryFrom<RecordRow> for Record {
    type Error = anyhow::Error;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Ok(Record {
            status: row.status.parse()?,
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            registration_date: row.registration_date,
            last_login: row.last_login,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample() -> Record {
        Record {
            id: "1".into(),
            name: "Ann".into(),
            email: "a@x.com".into(),
            password: "p".into(),
            registration_date: date!(2024 - 03 - 05),
            last_login: None,
            status: RecordStatus::Active,
        }
    }

    #[test]
    fn serialized_record_hides_password_and_uses_calendar_dates() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["registrationDate"], "2024-03-05");
        assert_eq!(json["lastLogin"], serde_json::Value::Null);
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let row = RecordRow {
            id: "1".into(),
            name: "Ann".into(),
            email: "a@x.com".into(),
            password: "p".into(),
            registration_date: date!(2024 - 03 - 05),
            last_login: Some(date!(2024 - 03 - 06)),
            status: "Suspended".into(),
        };
        let err = Record::try_from(row).unwrap_err();
        assert!(err.to_string().contains("Suspended"));
    }

    #[test]
    fn row_converts_into_record() {
        let row = RecordRow {
            id: "7".into(),
            name: "Bo".into(),
            email: "b@x.com".into(),
            password: "q".into(),
            registration_date: date!(2024 - 01 - 01),
            last_login: Some(date!(2024 - 02 - 01)),
            status: "Blocked".into(),
        };
        let record = Record::try_from(row).unwrap();
        assert!(record.is_blocked());
        assert_eq!(record.last_login, Some(date!(2024 - 02 - 01)));
    }
}
