use calamine::Data;
use serde_json::Value;

/// Text form of a cell as it should appear on a report. `None` for blanks.
pub(super) fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => number_text(*f),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => {
                let serial = dt.as_f64();
                let text = if serial < 1.0 {
                    value.format("%H:%M").to_string()
                } else if serial.fract() == 0.0 {
                    value.format("%d.%m.%Y").to_string()
                } else {
                    value.format("%d.%m.%Y %H:%M").to_string()
                };
                Some(text)
            }
            None => number_text(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

fn number_text(f: f64) -> Option<String> {
    if !f.is_finite() {
        None
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        Some(format!("{}", f as i64))
    } else {
        Some(f.to_string())
    }
}

/// JSON form of a cell for pass-through columns. NaN and infinities become null.
pub(super) fn cell_json(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        other => cell_text(other).map(Value::String).unwrap_or(Value::Null),
    }
}
