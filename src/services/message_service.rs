use std::cmp::Ordering;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Timelike, Utc, Weekday};

use crate::models::ChangeSummary;
use crate::utils::group_thousands;

/// Korea Standard Time, the exchange's zone
const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Regular session 09:00 ~ 15:30, both ends inclusive
const MARKET_OPEN_SECS: u32 = 9 * 3600;
const MARKET_CLOSE_SECS: u32 = 15 * 3600 + 30 * 60;

pub const NO_COMPARISON_INFO: &str = "<br><span>전일 대비 정보 없음</span>";

/// How the latest price should be described
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLabel {
    /// Session in progress and today's row is present
    Current,
    /// Today's row is present but the session is over (or it is a weekend)
    TodayClose,
    /// Latest row is from an earlier trading day
    PreviousClose,
}

impl PriceLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceLabel::Current => "현재가",
            PriceLabel::TodayClose | PriceLabel::PreviousClose => "종가",
        }
    }
}

/// Current wall-clock time in KST, regardless of the host zone
pub fn now_kst() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(KST_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset)
}

/// Holidays are not modelled here: a holiday simply has no row for today.
pub fn price_label(now: DateTime<FixedOffset>, latest_date: NaiveDate) -> PriceLabel {
    let is_trading_day = !matches!(now.weekday(), Weekday::Sat | Weekday::Sun);
    let seconds = now.time().num_seconds_from_midnight();
    let in_session = (MARKET_OPEN_SECS..=MARKET_CLOSE_SECS).contains(&seconds);
    let is_today = latest_date == now.date_naive();

    if is_trading_day && in_session && is_today {
        PriceLabel::Current
    } else if is_today {
        PriceLabel::TodayClose
    } else {
        PriceLabel::PreviousClose
    }
}

/// `"2024년 01월 05일 종가: 72,000원"`
pub fn format_price_message(date: NaiveDate, label: PriceLabel, price: i64) -> String {
    format!(
        "{} {}: {}원",
        date.format("%Y년 %m월 %d일"),
        label.as_str(),
        group_thousands(price)
    )
}

/// Colored day-over-day annotation, or a plain note when there is nothing to compare
pub fn format_change_info(summary: &ChangeSummary) -> String {
    if !summary.has_comparison() {
        return NO_COMPARISON_INFO.to_string();
    }

    let (sign, color) = match summary.absolute_change.cmp(&0) {
        Ordering::Greater => ("▲", "red"),
        Ordering::Less => ("▼", "blue"),
        Ordering::Equal => ("", "black"),
    };

    format!(
        "<br><span style='color:{};'>전일대비 {} {}원 ({:.2}%)</span>",
        color,
        sign,
        group_thousands(summary.absolute_change.abs()),
        summary.percent_change
    )
}
