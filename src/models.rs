use crate::histogram::{ChartSeries, DailyBucket, TimestampedEvent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Aimbot,
    Wallhack,
    Macro,
    Glitch,
    Goodplayer,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Aimbot,
        ReportType::Wallhack,
        ReportType::Macro,
        ReportType::Glitch,
        ReportType::Goodplayer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Aimbot => "aimbot",
            ReportType::Wallhack => "wallhack",
            ReportType::Macro => "macro",
            ReportType::Glitch => "glitch",
            ReportType::Goodplayer => "goodplayer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted anonymous reporter token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterIdentity {
    pub reporter_id: String,
}

/// Body accepted by `POST /api/reports/submit`. The type stays a string so
/// missing and unknown values get distinct messages.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub embark_id: String,
    #[serde(default)]
    pub report_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSubmit<'a> {
    pub embark_id: &'a str,
    pub report_type: ReportType,
    pub reporter_id: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryCounts {
    pub aimbot: u64,
    pub wallhack: u64,
    #[serde(rename = "macro")]
    pub macro_use: u64,
    pub glitch: u64,
    pub goodplayer: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCounts {
    #[serde(default)]
    pub embark_id: String,
    #[serde(default)]
    pub total_negative: u64,
    #[serde(default)]
    pub counts: CategoryCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
}

impl TimestampedEvent for HistoryRecord {
    fn occurred_at(&self) -> &str {
        &self.created_at
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportHistory {
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportPageQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub embark_id: String,
    pub timezone: String,
    pub anchor: NaiveDate,
    pub window_days: u32,
    pub total: u64,
    #[serde(flatten)]
    pub series: ChartSeries,
    pub buckets: Vec<DailyBucket>,
}
