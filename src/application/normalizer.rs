// Temperature normalizer - Coerces raw readings into finite Celsius values
use crate::domain::temperature::{
    AnomalyReason, CityTemperatureSample, NormalizedTemperature, RawTemperature,
    TemperatureAnomaly,
};

/// Unit and spacing characters stripped from textual readings before parsing.
const STRIPPED_CHARS: [char; 4] = ['°', 'C', '℃', ' '];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub values: Vec<NormalizedTemperature>,
    pub anomalies: Vec<TemperatureAnomaly>,
}

/// Normalizes one reading. Never fails: anything unusable becomes the fallback
/// value and is reported as an anomaly.
pub fn normalize_sample(
    city: &str,
    raw: &RawTemperature,
) -> (NormalizedTemperature, Option<TemperatureAnomaly>) {
    let reason = match raw {
        RawTemperature::Missing => AnomalyReason::Missing,
        RawTemperature::Text(text) => {
            let cleaned: String = text.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
            match parse_float_prefix(&cleaned) {
                Some(value) if value.is_finite() => {
                    return (NormalizedTemperature::reading(value), None);
                }
                _ => AnomalyReason::MalformedString { raw: text.clone() },
            }
        }
        RawTemperature::Numeric(value) if value.is_nan() => AnomalyReason::NotANumber,
        RawTemperature::Numeric(value) if value.is_infinite() => {
            AnomalyReason::NonFinite { value: *value }
        }
        RawTemperature::Numeric(value) => {
            return (NormalizedTemperature::reading(*value), None);
        }
        RawTemperature::Unsupported { type_name } => AnomalyReason::UnsupportedType {
            type_name: type_name.clone(),
        },
    };

    let anomaly = TemperatureAnomaly {
        city: city.to_string(),
        reason,
    };
    tracing::warn!(
        target: "normalizer",
        city = %anomaly.city,
        reason = anomaly.reason.label(),
        "{}",
        anomaly
    );

    (NormalizedTemperature::fallback(), Some(anomaly))
}

pub fn normalize_all(samples: &[CityTemperatureSample]) -> NormalizedBatch {
    let mut batch = NormalizedBatch {
        values: Vec::with_capacity(samples.len()),
        anomalies: Vec::new(),
    };

    for sample in samples {
        let (value, anomaly) = normalize_sample(&sample.city, &sample.raw);
        batch.values.push(value);
        batch.anomalies.extend(anomaly);
    }

    batch
}

/// Parses the longest decimal prefix of `text` after leading whitespace,
/// ignoring whatever follows it (`"12.5abc"` -> 12.5).
fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn value_of(raw: RawTemperature) -> f64 {
        normalize_sample("测试", &raw).0.value
    }

    #[test]
    fn test_strings_with_units() {
        assert_eq!(value_of("5.0°C".into()), 5.0);
        assert_eq!(value_of(" 15 ℃".into()), 15.0);
        assert_eq!(value_of("-3.5 °C".into()), -3.5);
        assert_eq!(value_of("12.5abc".into()), 12.5);
        assert_eq!(value_of(".5".into()), 0.5);
        assert_eq!(value_of("1e1".into()), 10.0);
    }

    #[test]
    fn test_malformed_strings_fall_back() {
        for text in ["abc", "", "°C", "-", ".", "NaN", "Infinity", "1e999"] {
            let (temp, anomaly) = normalize_sample("杭州", &RawTemperature::Text(text.to_string()));
            assert_eq!(temp, NormalizedTemperature::fallback(), "input {:?}", text);
            let anomaly = anomaly.unwrap();
            assert_eq!(anomaly.reason.label(), "malformed string");
            assert_eq!(anomaly.city, "杭州");
        }
    }

    #[test]
    fn test_missing_nan_and_unsupported() {
        let (temp, anomaly) = normalize_sample("北京", &RawTemperature::Missing);
        assert_eq!(temp.value, 0.0);
        assert!(!temp.valid);
        assert_eq!(anomaly.unwrap().reason, AnomalyReason::Missing);

        let (temp, anomaly) = normalize_sample("上海", &RawTemperature::Numeric(f64::NAN));
        assert_eq!(temp.value, 0.0);
        assert_eq!(anomaly.unwrap().reason, AnomalyReason::NotANumber);

        let (temp, anomaly) = normalize_sample("深圳", &RawTemperature::Numeric(f64::INFINITY));
        assert_eq!(temp.value, 0.0);
        assert_eq!(anomaly.unwrap().reason.label(), "non-finite value");

        let (temp, anomaly) = normalize_sample(
            "广州",
            &RawTemperature::Unsupported {
                type_name: "boolean".to_string(),
            },
        );
        assert_eq!(temp.value, 0.0);
        let message = anomaly.unwrap().to_string();
        assert!(message.contains("unsupported type"));
        assert!(message.contains("boolean"));
    }

    #[test]
    fn test_numeric_zero_is_a_valid_reading() {
        let (temp, anomaly) = normalize_sample("哈尔滨", &RawTemperature::Numeric(0.0));
        assert_eq!(temp, NormalizedTemperature::reading(0.0));
        assert!(anomaly.is_none());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_each_anomaly_logs_one_warning() {
        let samples = vec![
            CityTemperatureSample::new("北京", "5°C"),
            CityTemperatureSample::new("上海", RawTemperature::Missing),
            CityTemperatureSample::new("广州", "abc"),
            CityTemperatureSample::new("深圳", f64::NAN),
            CityTemperatureSample::new("杭州", 20.0),
        ];

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, || normalize_all(&samples));

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 3, "{}", output);

        let expected = [("上海", "missing"), ("广州", "malformed string"), ("深圳", "NaN value")];
        for (line, (city, reason)) in warnings.iter().zip(expected) {
            assert!(line.contains(city), "{}", line);
            assert!(line.contains(reason), "{}", line);
        }
        assert!(!output.contains("北京"));
        assert!(!output.contains("杭州"));
    }

    #[test]
    fn test_batch_keeps_alignment_and_collects_anomalies() {
        let samples = vec![
            CityTemperatureSample::new("北京", "5°C"),
            CityTemperatureSample::new("上海", RawTemperature::Missing),
            CityTemperatureSample::new("广州", "abc"),
            CityTemperatureSample::new("深圳", f64::NAN),
            CityTemperatureSample::new("杭州", 20.0),
        ];
        let batch = normalize_all(&samples);

        let values: Vec<f64> = batch.values.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![5.0, 0.0, 0.0, 0.0, 20.0]);
        assert!(values.iter().all(|v| v.is_finite()));

        let reasons: Vec<&str> = batch.anomalies.iter().map(|a| a.reason.label()).collect();
        assert_eq!(reasons, vec!["missing", "malformed string", "NaN value"]);
        let cities: Vec<&str> = batch.anomalies.iter().map(|a| a.city.as_str()).collect();
        assert_eq!(cities, vec!["上海", "广州", "深圳"]);
    }
}
