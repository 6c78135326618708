//! English number normalization
//!
//! Spells out currency amounts, decimals, ordinals and cardinals so that
//! transcripts contain only words.

use regex::Captures;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

fn below_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{}-{}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn below_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => below_hundred(r),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

/// Cardinal words, thousands groups separated by commas
/// (`1234` → `one thousand, two hundred thirty-four`).
pub fn cardinal(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    let mut parts = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        let words = below_thousand(group);
        if SCALES[scale].is_empty() {
            parts.push(words);
        } else {
            parts.push(format!("{} {}", words, SCALES[scale]));
        }
    }
    parts.join(", ")
}

/// Signed cardinal words (`-5` → `minus five`)
pub fn cardinal_signed(n: i64) -> String {
    if n < 0 {
        format!("minus {}", cardinal(n.unsigned_abs()))
    } else {
        cardinal(n as u64)
    }
}

/// Ordinal words (`21` → `twenty-first`)
pub fn ordinal(n: u64) -> String {
    let words = cardinal(n);
    let split = words.rfind(|c: char| c == ' ' || c == '-').map(|i| i + 1).unwrap_or(0);
    let (head, last) = words.split_at(split);

    let last = match last {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{}th", w),
    };
    format!("{}{}", head, last)
}

/// Years read as two pairs (`1984` → `nineteen eighty-four`,
/// `1905` → `nineteen oh five`).
fn year_pairs(n: u64) -> String {
    let high = n / 100;
    let low = n % 100;
    if low < 10 {
        format!("{} oh {}", below_hundred(high), ONES[low as usize])
    } else {
        format!("{} {}", below_hundred(high), below_hundred(low))
    }
}

fn expand_number(num: i64) -> String {
    if num > 1000 && num < 3000 {
        let n = num as u64;
        if n == 2000 {
            return "two thousand".to_string();
        }
        if n > 2000 && n < 2010 {
            return format!("two thousand {}", cardinal(n % 100));
        }
        if n % 100 == 0 {
            return format!("{} hundred", cardinal(n / 100));
        }
        return year_pairs(n);
    }
    cardinal_signed(num)
}

struct CurrencyUnits {
    unit: &'static str,
    units: &'static str,
    fraction: &'static str,
    fractions: &'static str,
}

fn currency_units(symbol: &str) -> Option<CurrencyUnits> {
    match symbol {
        "$" => Some(CurrencyUnits {
            unit: "dollar",
            units: "dollars",
            fraction: "cent",
            fractions: "cents",
        }),
        "£" => Some(CurrencyUnits {
            unit: "pound sterling",
            units: "pounds sterling",
            fraction: "penny",
            fractions: "pence",
        }),
        "¥" => Some(CurrencyUnits {
            unit: "yen",
            units: "yen",
            fraction: "sen",
            fractions: "sen",
        }),
        _ => None,
    }
}

fn expand_currency(symbol: &str, value: &str) -> String {
    let Some(units) = currency_units(symbol) else {
        return value.to_string();
    };

    let plain = value.replace(',', "");
    let parts: Vec<&str> = plain.split('.').collect();
    if parts.len() > 2 {
        return format!("{} {}", value, units.units);
    }

    let mut text = Vec::new();

    let integer: u64 = parts[0].parse().unwrap_or(0);
    if integer > 0 {
        let unit = if integer == 1 { units.unit } else { units.units };
        text.push(format!("{} {}", integer, unit));
    }

    let fraction: u64 = match parts.get(1) {
        // ".5" means fifty cents
        Some(f) if !f.is_empty() => {
            let digits: String = f.chars().chain(std::iter::repeat('0')).take(2).collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    };
    if fraction > 0 {
        let unit = if fraction == 1 {
            units.fraction
        } else {
            units.fractions
        };
        text.push(format!("{} {}", fraction, unit));
    }

    if text.is_empty() {
        return format!("zero {}", units.units);
    }
    text.join(", ")
}

/// Replace every number in `text` with words.
pub fn normalize_numbers(text: &str) -> String {
    let text = regex!(r"([0-9][0-9,]+[0-9])")
        .replace_all(text, |c: &Captures| c[1].replace(',', ""));

    let text = regex!(r"(£|\$|¥)([0-9,.]*[0-9]+)")
        .replace_all(&text, |c: &Captures| expand_currency(&c[1], &c[2]));

    let text = regex!(r"([0-9]+\.[0-9]+)")
        .replace_all(&text, |c: &Captures| c[1].replace('.', " point "));

    let text = regex!(r"([0-9]+)(st|nd|rd|th)").replace_all(&text, |c: &Captures| {
        match c[1].parse::<u64>() {
            Ok(n) => ordinal(n),
            Err(_) => c[0].to_string(),
        }
    });

    let text = regex!(r"-?[0-9]+").replace_all(&text, |c: &Captures| {
        match c[0].parse::<i64>() {
            Ok(n) => expand_number(n),
            Err(_) => c[0].to_string(),
        }
    });

    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal() {
        assert_eq!(cardinal(0), "zero");
        assert_eq!(cardinal(7), "seven");
        assert_eq!(cardinal(42), "forty-two");
        assert_eq!(cardinal(100), "one hundred");
        assert_eq!(cardinal(115), "one hundred fifteen");
        assert_eq!(cardinal(1234), "one thousand, two hundred thirty-four");
        assert_eq!(cardinal(1_000_001), "one million, one");
        assert_eq!(cardinal(2_500_000), "two million, five hundred thousand");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(2), "second");
        assert_eq!(ordinal(12), "twelfth");
        assert_eq!(ordinal(20), "twentieth");
        assert_eq!(ordinal(21), "twenty-first");
        assert_eq!(ordinal(100), "one hundredth");
        assert_eq!(ordinal(103), "one hundred third");
    }

    #[test]
    fn test_years() {
        assert_eq!(normalize_numbers("1984"), "nineteen eighty-four");
        assert_eq!(normalize_numbers("1905"), "nineteen oh five");
        assert_eq!(normalize_numbers("2000"), "two thousand");
        assert_eq!(normalize_numbers("2007"), "two thousand seven");
        assert_eq!(normalize_numbers("1500"), "fifteen hundred");
        assert_eq!(normalize_numbers("2019"), "twenty nineteen");
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(normalize_numbers("i have 3 cats"), "i have three cats");
        assert_eq!(normalize_numbers("-5"), "minus five");
        assert_eq!(
            normalize_numbers("10,000 people"),
            "ten thousand people"
        );
        assert_eq!(normalize_numbers("1000"), "one thousand");
    }

    #[test]
    fn test_decimals_and_ordinals() {
        assert_eq!(normalize_numbers("3.14"), "three point fourteen");
        assert_eq!(normalize_numbers("the 21st century"), "the twenty-first century");
    }

    #[test]
    fn test_currency() {
        assert_eq!(normalize_numbers("$1"), "one dollar");
        assert_eq!(normalize_numbers("$12.50"), "twelve dollars, fifty cents");
        assert_eq!(normalize_numbers("$0.01"), "one cent");
        assert_eq!(normalize_numbers("£3"), "three pounds sterling");
        assert_eq!(normalize_numbers("$0"), "zero dollars");
        assert_eq!(normalize_numbers("$1.5"), "one dollar, fifty cents");
    }
}
