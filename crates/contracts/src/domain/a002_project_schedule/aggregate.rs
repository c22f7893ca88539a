use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// Порог отставания за месяц, ниже которого отставание не показывается
pub const MONTHLY_LAG_THRESHOLD: f64 = 0.01;

// ============================================================================
// Wire types
// ============================================================================

/// Ответ `GET /api/schedule/get-weekly-schedule/{id}` и `get-daily-schedule/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub data: Vec<ScheduleItem>,
}

/// План / факт / отставание за период
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressMetrics {
    #[serde(default)]
    pub planned_quantity: f64,
    #[serde(default)]
    pub achieved_quantity: f64,
    #[serde(default)]
    pub lag_quantity: f64,
}

/// Разбивка по четырём неделям выбранного месяца
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyBreakdown {
    #[serde(default)]
    pub firstweek: Option<ProgressMetrics>,
    #[serde(default)]
    pub secondweek: Option<ProgressMetrics>,
    #[serde(default)]
    pub thirdweek: Option<ProgressMetrics>,
    #[serde(default)]
    pub fourthweek: Option<ProgressMetrics>,
}

impl WeeklyBreakdown {
    pub fn get(&self, week: WeekOfMonth) -> Option<&ProgressMetrics> {
        match week {
            WeekOfMonth::First => self.firstweek.as_ref(),
            WeekOfMonth::Second => self.secondweek.as_ref(),
            WeekOfMonth::Third => self.thirdweek.as_ref(),
            WeekOfMonth::Fourth => self.fourthweek.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSchedule {
    /// Английское название месяца, например "December"
    pub month_name: String,
    pub year: i32,
    #[serde(default)]
    pub metrics: ProgressMetrics,
}

/// Строка графика работ (WBS)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub wbs_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub executed_quantity: f64,
    #[serde(default)]
    pub balance_quantity: f64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub revised_end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub weekly: WeeklyBreakdown,
    #[serde(default)]
    pub schedule_data: Vec<MonthSchedule>,
}

impl ScheduleItem {
    /// Фактическая дата окончания: пересмотренная, если есть
    pub fn effective_end_date(&self) -> Option<&str> {
        self.revised_end_date
            .as_deref()
            .or(self.end_date.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn item_status(&self) -> ItemStatus {
        ItemStatus::from_raw(self.status.as_deref())
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Completed,
    InProgress,
    Pending,
}

impl ItemStatus {
    /// Регистр не важен; неизвестное или пустое значение = Pending
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("completed") => ItemStatus::Completed,
            Some("inprogress") => ItemStatus::InProgress,
            _ => ItemStatus::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Completed => "Done",
            ItemStatus::InProgress => "Active",
            ItemStatus::Pending => "Pending",
        }
    }
}

// ============================================================================
// Calendar buckets
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekOfMonth {
    First,
    Second,
    Third,
    Fourth,
}

impl WeekOfMonth {
    pub const ALL: [WeekOfMonth; 4] = [
        WeekOfMonth::First,
        WeekOfMonth::Second,
        WeekOfMonth::Third,
        WeekOfMonth::Fourth,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            WeekOfMonth::First => "firstweek",
            WeekOfMonth::Second => "secondweek",
            WeekOfMonth::Third => "thirdweek",
            WeekOfMonth::Fourth => "fourthweek",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeekOfMonth::First => "Week 1",
            WeekOfMonth::Second => "Week 2",
            WeekOfMonth::Third => "Week 3",
            WeekOfMonth::Fourth => "Week 4",
        }
    }

    /// Диапазон дней недели, четвёртая неделя тянется до конца месяца
    pub fn day_range(&self, year: i32, month: u32) -> String {
        match self {
            WeekOfMonth::First => "01 - 07".to_string(),
            WeekOfMonth::Second => "08 - 14".to_string(),
            WeekOfMonth::Third => "15 - 21".to_string(),
            WeekOfMonth::Fourth => format!("22 - {}", days_in_month(year, month)),
        }
    }

    /// Неделя для дня месяца (29-31 попадают в четвёртую)
    pub fn for_day(day: u32) -> Self {
        match day {
            0..=7 => WeekOfMonth::First,
            8..=14 => WeekOfMonth::Second,
            15..=21 => WeekOfMonth::Third,
            _ => WeekOfMonth::Fourth,
        }
    }
}

/// Количество дней в месяце (month: 1..=12); некорректный месяц даёт 0
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Английское название месяца, как его пишет бэкенд в `month_name`
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok().and_then(|m| Month::try_from(m).ok())?;
    Some(month.name())
}

/// Годы для выбора: текущий ±2
pub fn year_options(current_year: i32) -> Vec<i32> {
    (current_year - 2..=current_year + 2).collect()
}

// ============================================================================
// Progress rows
// ============================================================================

/// Строка таблицы прогресса за выбранный период
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRow {
    pub item: ScheduleItem,
    pub planned: f64,
    pub achieved: f64,
    pub lag: f64,
    /// В периоде есть план или факт
    pub is_active: bool,
    pub is_lagging: bool,
}

impl ProgressRow {
    fn new(item: &ScheduleItem, metrics: ProgressMetrics, lag_threshold: f64) -> Self {
        Self {
            item: item.clone(),
            planned: metrics.planned_quantity,
            achieved: metrics.achieved_quantity,
            lag: metrics.lag_quantity,
            is_active: metrics.planned_quantity > 0.0 || metrics.achieved_quantity > 0.0,
            is_lagging: metrics.lag_quantity > lag_threshold,
        }
    }
}

/// Прогресс по выбранной неделе месяца
pub fn weekly_rows(items: &[ScheduleItem], week: WeekOfMonth) -> Vec<ProgressRow> {
    items
        .iter()
        .map(|item| {
            let metrics = item.weekly.get(week).copied().unwrap_or_default();
            ProgressRow::new(item, metrics, 0.0)
        })
        .collect()
}

/// Прогресс по выбранному месяцу (month: 1..=12)
pub fn monthly_rows(items: &[ScheduleItem], year: i32, month: u32) -> Vec<ProgressRow> {
    let name = month_name(month);
    items
        .iter()
        .map(|item| {
            let metrics = item
                .schedule_data
                .iter()
                .find(|m| Some(m.month_name.as_str()) == name && m.year == year)
                .map(|m| m.metrics)
                .unwrap_or_default();
            ProgressRow::new(item, metrics, MONTHLY_LAG_THRESHOLD)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_from(value: serde_json::Value) -> ScheduleItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_week_buckets() {
        assert_eq!(WeekOfMonth::for_day(1), WeekOfMonth::First);
        assert_eq!(WeekOfMonth::for_day(7), WeekOfMonth::First);
        assert_eq!(WeekOfMonth::for_day(8), WeekOfMonth::Second);
        assert_eq!(WeekOfMonth::for_day(21), WeekOfMonth::Third);
        assert_eq!(WeekOfMonth::for_day(22), WeekOfMonth::Fourth);
        assert_eq!(WeekOfMonth::for_day(31), WeekOfMonth::Fourth);
        assert_eq!(WeekOfMonth::Fourth.day_range(2024, 2), "22 - 29");
        assert_eq!(WeekOfMonth::First.label(), "Week 1");
    }

    #[test]
    fn test_year_options() {
        assert_eq!(year_options(2025), vec![2023, 2024, 2025, 2026, 2027]);
    }

    #[test]
    fn test_weekly_rows_default_missing_metrics() {
        let items = vec![
            item_from(json!({
                "wbs_id": "1.1",
                "description": "Excavation",
                "weekly": {
                    "secondweek": {"planned_quantity": 10.0, "achieved_quantity": 7.5, "lag_quantity": 2.5}
                }
            })),
            item_from(json!({"wbs_id": "1.2"})),
        ];

        let rows = weekly_rows(&items, WeekOfMonth::Second);
        assert_eq!(rows[0].planned, 10.0);
        assert!(rows[0].is_active);
        assert!(rows[0].is_lagging);
        assert_eq!(rows[1].planned, 0.0);
        assert!(!rows[1].is_active);

        let first = weekly_rows(&items, WeekOfMonth::First);
        assert!(!first[0].is_active);
        assert_eq!(first[0].lag, 0.0);
    }

    #[test]
    fn test_monthly_rows_match_name_and_year() {
        let items = vec![item_from(json!({
            "wbs_id": "2.1",
            "schedule_data": [
                {"month_name": "December", "year": 2023, "metrics": {"planned_quantity": 5.0}},
                {"month_name": "December", "year": 2024, "metrics": {
                    "planned_quantity": 8.0, "achieved_quantity": 7.0, "lag_quantity": 0.005
                }},
                {"month_name": "November", "year": 2024}
            ]
        }))];

        let rows = monthly_rows(&items, 2024, 12);
        assert_eq!(rows[0].planned, 8.0);
        assert_eq!(rows[0].achieved, 7.0);
        assert_eq!(rows[0].lag, 0.005);
        assert!(rows[0].is_active);
        assert!(!rows[0].is_lagging);

        let previous = monthly_rows(&items, 2023, 12);
        assert_eq!(previous[0].planned, 5.0);

        // месяц без metrics
        let empty = monthly_rows(&items, 2024, 11);
        assert_eq!(empty[0].planned, 0.0);
        assert!(!empty[0].is_active);
    }

    #[test]
    fn test_status_and_end_date() {
        let item = item_from(json!({
            "wbs_id": "3",
            "status": "InProgress",
            "end_date": "2024-05-01",
            "revised_end_date": "2024-06-15"
        }));
        assert_eq!(item.item_status(), ItemStatus::InProgress);
        assert_eq!(item.item_status().label(), "Active");
        assert_eq!(item.effective_end_date(), Some("2024-06-15"));
        assert_eq!(ItemStatus::from_raw(None), ItemStatus::Pending);
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(0), None);
    }
}
