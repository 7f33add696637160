use crate::i18n::Language;

/// Group the integer part of `abs` with `sep` every three digits and append
/// two decimals after `point`.
fn grouped(abs: f64, sep: char, point: char) -> String {
    let cents = format!("{:.2}", abs);
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_sep = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_sep.push(sep);
        }
        with_sep.push(c);
    }
    let with_sep: String = with_sep.chars().rev().collect();
    format!("{with_sep}{point}{dec_part}")
}

/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let body = grouped(val.abs(), ',', '.');
    if val < 0.0 {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Dollar amount in the conventions of `lang`: `$1,234.56` or `US$ 1.234,56`.
pub fn money_in(val: f64, lang: Language) -> String {
    match lang {
        Language::En => money(val),
        Language::Pt => {
            let body = grouped(val.abs(), '.', ',');
            if val < 0.0 {
                format!("-US$ {body}")
            } else {
                format!("US$ {body}")
            }
        }
    }
}

/// `2024-06-01` as `06/01/2024` (en) or `01/06/2024` (pt). Anything that is
/// not an ISO date is returned unchanged.
pub fn date_in(iso: &str, lang: Language) -> String {
    match chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(d) => match lang {
            Language::En => d.format("%m/%d/%Y").to_string(),
            Language::Pt => d.format("%d/%m/%Y").to_string(),
        },
        Err(_) => iso.to_string(),
    }
}

/// Replace `{name}` placeholders in a translated template.
pub fn fill(template: &str, args: &[(&str, String)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-3250.75), "-$3,250.75");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(150000.0), "$150,000.00");
    }

    #[test]
    fn test_money_in_portuguese() {
        assert_eq!(money_in(1234.56, Language::Pt), "US$ 1.234,56");
        assert_eq!(money_in(-500.0, Language::Pt), "-US$ 500,00");
        assert_eq!(money_in(42.1, Language::En), "$42.10");
    }

    #[test]
    fn test_dates_per_language() {
        assert_eq!(date_in("2024-06-01", Language::En), "06/01/2024");
        assert_eq!(date_in("2024-06-01", Language::Pt), "01/06/2024");
        assert_eq!(date_in("soon", Language::En), "soon");
    }

    #[test]
    fn test_fill_placeholders() {
        assert_eq!(
            fill("Page {page} of {pages}", &[("page", "2".into()), ("pages", "5".into())]),
            "Page 2 of 5"
        );
    }
}
