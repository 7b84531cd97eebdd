//! Display text and colors for status and priority codes
//!
//! Every fixed string of an export lives in one [`Labels`] table per
//! [`Locale`]. The two label lookups fall back differently on unknown codes:
//! status text passes the raw code through, priority text falls back to the
//! Medium label.

use planxl_core::{Priority, Status};
use serde::{Deserialize, Serialize};

/// Header cell fill (dark blue)
pub const HEADER_COLOR: u32 = 0x366092;

/// Timeline header fill for Saturday and Sunday columns
pub const WEEKEND_COLOR: u32 = 0xFFE6E6;

/// Bar fill for status codes without a dedicated color
pub const NEUTRAL_COLOR: u32 = 0xE0E0E0;

/// Language of every fixed string in the workbook
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::Zh => &ZH,
            Locale::En => &EN,
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" => Ok(Locale::Zh),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

/// Fixed strings for one locale
#[derive(Debug)]
pub struct Labels {
    // Sheet names, in workbook order
    pub overview_sheet: &'static str,
    pub data_sheet: &'static str,
    pub timeline_sheet: &'static str,
    pub roster_sheet: &'static str,
    /// File name suffix (before `.xlsx`)
    pub file_suffix: &'static str,

    // Overview identity block
    pub title: &'static str,
    pub project_name: &'static str,
    pub project_description: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub status: &'static str,

    pub overview_headers: [&'static str; 8],
    pub data_headers: [&'static str; 10],
    pub timeline_corner: &'static str,
    pub roster_headers: [&'static str; 6],

    // Status codes
    pub pending: &'static str,
    pub in_progress: &'static str,
    pub completed: &'static str,
    pub active: &'static str,
    pub paused: &'static str,

    // Priority codes
    pub low: &'static str,
    pub medium: &'static str,
    pub high: &'static str,
    pub urgent: &'static str,

    // Team member activity
    pub member_active: &'static str,
    pub member_inactive: &'static str,
}

static ZH: Labels = Labels {
    overview_sheet: "甘特图",
    data_sheet: "甘特图数据",
    timeline_sheet: "甘特图时间线",
    roster_sheet: "团队成员信息",
    file_suffix: "甘特图",
    title: "项目甘特图",
    project_name: "项目名称",
    project_description: "项目描述",
    start_date: "开始日期",
    end_date: "结束日期",
    status: "状态",
    overview_headers: [
        "阶段/任务",
        "开始日期",
        "结束日期",
        "工期(工作日)",
        "状态",
        "进度",
        "负责人",
        "优先级",
    ],
    data_headers: [
        "项目",
        "阶段",
        "任务",
        "开始日期",
        "结束日期",
        "工期(工作日)",
        "状态",
        "进度",
        "负责人",
        "优先级",
    ],
    timeline_corner: "任务/阶段",
    roster_headers: ["姓名", "角色", "邮箱", "头像", "加入时间", "状态"],
    pending: "待开始",
    in_progress: "进行中",
    completed: "已完成",
    active: "活跃",
    paused: "暂停",
    low: "低",
    medium: "中",
    high: "高",
    urgent: "紧急",
    member_active: "活跃",
    member_inactive: "非活跃",
};

static EN: Labels = Labels {
    overview_sheet: "Overview",
    data_sheet: "Tabular Data",
    timeline_sheet: "Visual Timeline",
    roster_sheet: "Team Roster",
    file_suffix: "gantt",
    title: "Project Gantt Chart",
    project_name: "Project Name",
    project_description: "Description",
    start_date: "Start Date",
    end_date: "End Date",
    status: "Status",
    overview_headers: [
        "Stage / Task",
        "Start",
        "End",
        "Business Days",
        "Status",
        "Progress",
        "Assignee",
        "Priority",
    ],
    data_headers: [
        "Project",
        "Stage",
        "Task",
        "Start",
        "End",
        "Business Days",
        "Status",
        "Progress",
        "Assignee",
        "Priority",
    ],
    timeline_corner: "Stage / Task",
    roster_headers: ["Name", "Role", "Email", "Avatar", "Joined", "Status"],
    pending: "Pending",
    in_progress: "In Progress",
    completed: "Completed",
    active: "Active",
    paused: "Paused",
    low: "Low",
    medium: "Medium",
    high: "High",
    urgent: "Urgent",
    member_active: "Active",
    member_inactive: "Inactive",
};

/// Display text for a status code
pub fn status_label(status: &Status, locale: Locale) -> &str {
    let labels = locale.labels();
    match status {
        Status::Pending => labels.pending,
        Status::InProgress => labels.in_progress,
        Status::Completed => labels.completed,
        Status::Active => labels.active,
        Status::Paused => labels.paused,
        // unknown codes are shown verbatim
        Status::Other(code) => code,
    }
}

/// Display text for a priority code
pub fn priority_label(priority: &Priority, locale: Locale) -> &'static str {
    let labels = locale.labels();
    match priority {
        Priority::Low => labels.low,
        Priority::Medium => labels.medium,
        Priority::High => labels.high,
        Priority::Urgent => labels.urgent,
        // unknown codes read as medium
        Priority::Other(_) => labels.medium,
    }
}

/// Bar fill color (RGB) for a status code
pub fn status_color(status: &Status) -> u32 {
    match status {
        Status::Pending => 0xFFE6B3,
        Status::InProgress => 0xFFB366,
        Status::Completed => 0x90EE90,
        Status::Active => 0x87CEEB,
        Status::Paused => 0xDDA0DD,
        Status::Other(_) => NEUTRAL_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_pass_unknown_codes_through() {
        let unknown = Status::from_code("unknown");
        assert_eq!(status_label(&unknown, Locale::Zh), "unknown");
        assert_eq!(status_label(&unknown, Locale::En), "unknown");
        assert_eq!(status_label(&Status::InProgress, Locale::Zh), "进行中");
        assert_eq!(status_label(&Status::Paused, Locale::En), "Paused");
    }

    #[test]
    fn priority_labels_fall_back_to_medium() {
        let unknown = Priority::from_code("unknown");
        for locale in [Locale::Zh, Locale::En] {
            assert_eq!(
                priority_label(&unknown, locale),
                priority_label(&Priority::Medium, locale)
            );
        }
        assert_eq!(priority_label(&Priority::High, Locale::Zh), "高");
        assert_eq!(priority_label(&Priority::Urgent, Locale::En), "Urgent");
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color(&Status::Pending), 0xFFE6B3);
        assert_eq!(status_color(&Status::InProgress), 0xFFB366);
        assert_eq!(status_color(&Status::Completed), 0x90EE90);
        assert_eq!(status_color(&Status::Active), 0x87CEEB);
        assert_eq!(status_color(&Status::Paused), 0xDDA0DD);
        assert_eq!(status_color(&Status::from_code("blocked")), NEUTRAL_COLOR);
        assert_ne!(WEEKEND_COLOR, NEUTRAL_COLOR);
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::Zh));
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::Zh);
    }
}
