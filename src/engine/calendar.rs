// ==========================================
// 生产分析与预测引擎 - 日历工具
// ==========================================
// 职责: 月/年窗口边界、剩余天数、分析窗口起点
// 说明: 所有函数以显式的 now 为基准，不读取系统时钟
// ==========================================

use crate::domain::analysis::PeriodWindow;
use crate::domain::types::PeriodKind;
use chrono::{Datelike, Days, Months, NaiveDate};

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

pub fn first_day_of_year(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}

pub fn last_day_of_year(date: NaiveDate) -> NaiveDate {
    let days_in_year = if date.leap_year() { 366 } else { 365 };
    first_day_of_year(date) + Days::new(days_in_year - 1)
}

/// 距月末的自然日数（月末当天为 0）
pub fn remaining_days_in_month(now: NaiveDate) -> i64 {
    (last_day_of_month(now) - now).num_days()
}

/// 距年末的自然日数（12-31 为 0）
pub fn remaining_days_in_year(now: NaiveDate) -> i64 {
    (last_day_of_year(now) - now).num_days()
}

/// 当前周期窗口（包含 now 的自然月/自然年）
pub fn current_window(kind: PeriodKind, now: NaiveDate) -> PeriodWindow {
    match kind {
        PeriodKind::Month => PeriodWindow {
            start: first_day_of_month(now),
            end: last_day_of_month(now),
        },
        PeriodKind::Year => PeriodWindow {
            start: first_day_of_year(now),
            end: last_day_of_year(now),
        },
    }
}

/// 紧邻的上一周期窗口
pub fn previous_window(kind: PeriodKind, now: NaiveDate) -> PeriodWindow {
    let current = current_window(kind, now);
    let previous_end = current.start - Days::new(1);
    current_window(kind, previous_end)
}

/// 分析窗口起点: 参考月往前推 (months - 1) 个月的 1 号
///
/// months = 0 按 1 处理（仅当月）
pub fn window_start(now: NaiveDate, months: u32) -> NaiveDate {
    let back = months.max(1) - 1;
    first_day_of_month(now)
        .checked_sub_months(Months::new(back))
        .unwrap_or(NaiveDate::MIN)
}
