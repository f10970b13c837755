//! Control limits for chemistry readings.

/// Acceptable range for one reading. Either bound may be absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimit {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ControlLimit {
    const fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Neutral,
    Good,
    Low,
    High,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Neutral => "neutral",
            ValidationStatus::Good => "good",
            ValidationStatus::Low => "low",
            ValidationStatus::High => "high",
        }
    }
}

static CONTROL_LIMITS: &[(&str, ControlLimit)] = &[
    ("boilerPh", ControlLimit::range(11.0, 12.5)),
    ("boilerSo3", ControlLimit::range(30.0, 60.0)),
    ("boilerPAlk", ControlLimit::range(300.0, 600.0)),
    ("boilerMAlk", ControlLimit::at_most(800.0)),
    ("boilerOhAlk", ControlLimit::range(300.0, 600.0)),
    ("boilerCond", ControlLimit::range(3000.0, 4000.0)),
    ("boilerFluor", ControlLimit::range(200.0, 300.0)),
    ("systemPh", ControlLimit::range(8.0, 9.5)),
    ("systemTrh", ControlLimit::range(0.0, 2.0)),
    ("loopPh", ControlLimit::range(9.0, 9.5)),
    ("loopNo2Hot", ControlLimit::range(900.0, 1500.0)),
    ("loopNo2Cold", ControlLimit::range(600.0, 900.0)),
];

pub fn lookup(field: &str) -> Option<ControlLimit> {
    CONTROL_LIMITS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, limit)| *limit)
}

/// Every registered field name, in table order.
pub fn fields() -> impl Iterator<Item = &'static str> {
    CONTROL_LIMITS.iter().map(|(name, _)| *name)
}

/// Classifies a typed reading against the limit for `field`.
///
/// Only the leading number is read, so `"11.5 ppm"` counts as 11.5.
/// Blank, unparsable and non-finite values are `Neutral`, as are fields with
/// no registered limit. `Low` is checked before `High`.
pub fn status(value: &str, field: &str) -> ValidationStatus {
    let Some(limit) = lookup(field) else {
        return ValidationStatus::Neutral;
    };
    let Some(number) = leading_number(value) else {
        return ValidationStatus::Neutral;
    };

    if limit.min.is_some_and(|min| number < min) {
        ValidationStatus::Low
    } else if limit.max.is_some_and(|max| number > max) {
        ValidationStatus::High
    } else {
        ValidationStatus::Good
    }
}

/// Parses the longest decimal prefix of `text` after leading whitespace:
/// optional sign, digits with an optional fraction, optional exponent.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

fn decimals(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

/// Reference text for the limit row of a report table, e.g. `11.0-12.5`,
/// `MAX 800` or an empty string when the field has no limit.
pub fn display(field: &str) -> String {
    match lookup(field) {
        Some(ControlLimit {
            min: Some(min),
            max: Some(max),
        }) => {
            let precision = decimals(min).max(decimals(max));
            format!("{:.*}-{:.*}", precision, min, precision, max)
        }
        Some(ControlLimit {
            min: None,
            max: Some(max),
        }) => format!("MAX {}", max),
        Some(ControlLimit {
            min: Some(min),
            max: None,
        }) => format!("MIN {}", min),
        _ => String::new(),
    }
}
