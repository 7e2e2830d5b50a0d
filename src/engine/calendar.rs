// ==========================================
// 跨境包裹追踪系统 - 工作日历引擎
// ==========================================
// 职责: 工作日计数与工作日推进（跳过周六/周日）
// 红线: 纯函数,无副作用;只操作日历日期,不碰时刻,避免跨时区误差
// 说明: 不建模法定节假日
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// 是否为工作日（周一至周五）
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 计算两个日期之间的工作日数
///
/// 计数口径：(start, end] 区间内的工作日数（不含 start 当日，含 end 当日）。
/// 例：周一 2024-01-01 → 周一 2024-01-08 = 5 个工作日。
///
/// # 边界
/// - `end < start` 立即返回 0（向前迭代实现若不设防会死循环）
/// - `end == start` 返回 0
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end <= start {
        return 0;
    }

    let mut count = 0;
    let mut current = start;
    while current < end {
        current += Duration::days(1);
        if is_business_day(current) {
            count += 1;
        }
    }
    count
}

/// 将日期向后推进 n 个工作日
///
/// # 边界
/// - `n <= 0` 原样返回 date（即使 date 是周末）
/// - `n > 0` 的结果永不落在周六/周日
pub fn add_business_days(date: NaiveDate, n: i64) -> NaiveDate {
    if n <= 0 {
        return date;
    }

    let mut remaining = n;
    let mut current = date;
    while remaining > 0 {
        current += Duration::days(1);
        if is_business_day(current) {
            remaining -= 1;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_to_monday_is_five_business_days() {
        // 2024-01-01 与 2024-01-08 均为周一
        assert_eq!(business_days_between(date(2024, 1, 1), date(2024, 1, 8)), 5);
    }

    #[test]
    fn test_reversed_range_returns_zero() {
        assert_eq!(business_days_between(date(2024, 1, 8), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_add_zero_days_is_identity() {
        // 2024-01-06 为周六，n=0 也原样返回
        assert_eq!(add_business_days(date(2024, 1, 6), 0), date(2024, 1, 6));
    }

    #[test]
    fn test_add_never_lands_on_weekend() {
        let start = date(2024, 1, 1);
        for n in 1..30 {
            assert!(is_business_day(add_business_days(start, n)), "n={}", n);
        }
    }

    #[test]
    fn test_add_skips_weekend() {
        // 周五 + 1 个工作日 = 下周一
        assert_eq!(add_business_days(date(2024, 1, 5), 1), date(2024, 1, 8));
    }
}
