//! Утилиты форматирования чисел для таблиц графика работ

/// Форматирует число с разделителем тысяч (пробел) и указанным количеством знаков после запятой
///
/// # Примеры
///
/// ```
/// use tender_dashboard::shared::components::table::format_number_with_decimals;
///
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1 234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = match decimals {
        0 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        3 => format!("{:.3}", value),
        _ => format!("{:.2}", value),
    };

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // Пробел каждые 3 цифры с конца целой части
    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(' ');
        }
        result.push(c);
    }
    let formatted_integer = result.chars().rev().collect::<String>();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Количество за период: два знака, ноль и отрицательные значения показываются как "-"
pub fn format_quantity(value: f64) -> String {
    if value > 0.0 {
        format_number_with_decimals(value, 2)
    } else {
        "-".to_string()
    }
}

/// Отставание: "-" для нуля, а при заданном пороге и для всего, что ниже него
///
/// Без порога отрицательное отставание (опережение плана) показывается.
pub fn format_lag(value: f64, threshold: Option<f64>) -> String {
    let hidden = match threshold {
        Some(t) => value < t,
        None => value == 0.0,
    };
    if hidden {
        "-".to_string()
    } else {
        format_number_with_decimals(value, 2)
    }
}

/// Итоговое количество строки графика (без дробной части, если она нулевая)
pub fn format_total(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number_with_decimals(value, 0)
    } else {
        format_number_with_decimals(value, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1 234.6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1 234.567");
        assert_eq!(format_number_with_decimals(-1234.56, 2), "-1 234.56");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0.0), "-");
        assert_eq!(format_quantity(7.5), "7.50");
        assert_eq!(format_quantity(12500.0), "12 500.00");
    }

    #[test]
    fn test_format_lag() {
        assert_eq!(format_lag(0.005, Some(0.01)), "-");
        assert_eq!(format_lag(-3.0, Some(0.01)), "-");
        assert_eq!(format_lag(0.01, Some(0.01)), "0.01");
        assert_eq!(format_lag(2.5, None), "2.50");
        assert_eq!(format_lag(0.0, None), "-");
        assert_eq!(format_lag(-1.25, None), "-1.25");
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(1500.0), "1 500");
        assert_eq!(format_total(12.25), "12.25");
    }
}
