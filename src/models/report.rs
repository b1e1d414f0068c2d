use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub reporter_id: String,
    pub subject_kind: ReportSubject,
    pub subject_id: String,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportSubject {
    Venue,
    Review,
    User,
}

impl ReportSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSubject::Venue => "venue",
            ReportSubject::Review => "review",
            ReportSubject::User => "user",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "review" => ReportSubject::Review,
            "user" => ReportSubject::User,
            _ => ReportSubject::Venue,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Open,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "resolved" => ReportStatus::Resolved,
            "dismissed" => ReportStatus::Dismissed,
            _ => ReportStatus::Open,
        }
    }
}
