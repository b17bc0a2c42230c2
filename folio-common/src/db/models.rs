//! Database models and insert schemas
//!
//! Each entity has a row type (serialized to clients) and a `New*` type,
//! the insert schema: the table minus `id` and the managed timestamps. POST
//! and PUT bodies deserialize into the `New*` type. Missing optional fields
//! become `None`; unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Site owner profile (single row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technologies: Option<Vec<String>>,
    pub code_url: Option<String>,
    pub demo_url: Option<String>,
    pub featured: bool,
    pub image_url: Option<String>,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// technologies is a JSON array in a TEXT column; order lives in sort_order
impl<'r> FromRow<'r, SqliteRow> for Project {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let technologies: Option<String> = row.try_get("technologies")?;
        let technologies = technologies
            .map(|raw| serde_json::from_str::<Vec<String>>(&raw))
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "technologies".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            technologies,
            code_url: row.try_get("code_url")?,
            demo_url: row.try_get("demo_url")?,
            featured: row.try_get("featured")?,
            image_url: row.try_get("image_url")?,
            order: row.try_get("sort_order")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub technologies: Option<Vec<String>>,
    pub code_url: Option<String>,
    pub demo_url: Option<String>,
    /// Defaults to false
    pub featured: Option<bool>,
    pub image_url: Option<String>,
    /// Defaults to 0
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// programming, frontend, backend, database, tools, soft
    pub category: String,
    pub icon_url: Option<String>,
    /// 1-5 by convention; the server stores whatever it is given
    pub level: i64,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub name: String,
    pub category: String,
    pub icon_url: Option<String>,
    /// Defaults to 1
    pub level: Option<i64>,
    /// Defaults to 0
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// certificate, award, competition
    #[serde(rename = "type")]
    pub kind: String,
    pub issuer: Option<String>,
    pub certificate_url: Option<String>,
    pub verified: bool,
    pub achieved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAchievement {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub issuer: Option<String>,
    pub certificate_url: Option<String>,
    /// Defaults to false
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "flexible_datetime::deserialize")]
    pub achieved_at: Option<DateTime<Utc>>,
}

/// Message captured from the public contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub replied: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Defaults to false
    pub replied: Option<bool>,
}

/// Partial contact update from the admin view (mark as replied)
#[derive(Debug, Clone, Deserialize)]
pub struct ContactUpdate {
    pub replied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminSetting {
    pub id: String,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminSetting {
    pub key: String,
    pub value: String,
}

/// Reorder projects for display: featured first, otherwise keep the
/// incoming (`order` ascending) sequence
pub fn featured_first(projects: &mut [Project]) {
    // sort_by_key is stable, so ties keep their `order` sequence
    projects.sort_by_key(|p| !p.featured);
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC),
/// which is what HTML date inputs submit
mod flexible_datetime {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(ts.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Some(dt.and_utc()))
            .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use serde_json::json;

    fn project(title: &str, featured: bool, order: i64) -> Project {
        let now = Utc::now();
        Project {
            id: title.to_string(),
            title: title.to_string(),
            description: String::new(),
            technologies: None,
            code_url: None,
            demo_url: None,
            featured,
            image_url: None,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_featured_first_is_stable() {
        let mut projects = vec![
            project("a", false, 0),
            project("b", true, 1),
            project("c", false, 2),
            project("d", true, 3),
        ];
        featured_first(&mut projects);
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_new_project_requires_title_and_description() {
        let missing = serde_json::from_value::<NewProject>(json!({ "title": "Only title" }));
        assert!(missing.is_err());

        let ok: NewProject = serde_json::from_value(json!({
            "title": "Folio",
            "description": "Portfolio backend",
            "codeUrl": "https://example.com/code",
            "unknownField": 42
        }))
        .unwrap();
        assert_eq!(ok.code_url.as_deref(), Some("https://example.com/code"));
        assert!(ok.featured.is_none());
        assert!(ok.technologies.is_none());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let bad = serde_json::from_value::<NewSkill>(json!({
            "name": "Rust",
            "category": "programming",
            "level": "expert"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_achievement_uses_type_on_the_wire() {
        let new: NewAchievement = serde_json::from_value(json!({
            "title": "Hackathon winner",
            "type": "competition",
            "achievedAt": "2023-11-04"
        }))
        .unwrap();
        assert_eq!(new.kind, "competition");
        let at = new.achieved_at.unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2023, 11, 4));

        let row = Achievement {
            id: "1".into(),
            title: new.title,
            description: None,
            kind: new.kind,
            issuer: None,
            certificate_url: None,
            verified: false,
            achieved_at: Some(at),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "competition");
        assert!(value.get("kind").is_none());
        assert!(value["achievedAt"].is_string());
    }

    #[test]
    fn test_achieved_at_accepts_rfc3339_null_and_blank() {
        let rfc: NewAchievement = serde_json::from_value(json!({
            "title": "t", "type": "award", "achievedAt": "2022-06-01T12:30:00+02:00"
        }))
        .unwrap();
        assert_eq!(
            rfc.achieved_at.unwrap(),
            Utc.with_ymd_and_hms(2022, 6, 1, 10, 30, 0).unwrap()
        );

        let null: NewAchievement =
            serde_json::from_value(json!({ "title": "t", "type": "award", "achievedAt": null }))
                .unwrap();
        assert!(null.achieved_at.is_none());

        let blank: NewAchievement =
            serde_json::from_value(json!({ "title": "t", "type": "award", "achievedAt": "" }))
                .unwrap();
        assert!(blank.achieved_at.is_none());

        let absent: NewAchievement =
            serde_json::from_value(json!({ "title": "t", "type": "award" })).unwrap();
        assert!(absent.achieved_at.is_none());
    }

    #[test]
    fn test_achieved_at_rejects_garbage() {
        let bad = serde_json::from_value::<NewAchievement>(json!({
            "title": "t", "type": "award", "achievedAt": "last tuesday"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let now = Utc::now();
        let profile = Profile {
            id: "p".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "555".into(),
            bio: None,
            profile_image_url: Some("img.png".into()),
            linkedin_url: None,
            github_url: None,
            resume_url: None,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["profileImageUrl"], "img.png");
        assert!(value.get("updatedAt").is_some());
        assert!(value["bio"].is_null());
    }
}
