use serde_json::Number;

use crate::ir::Leaf;

/// 2^53: past this an f64 no longer holds every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Classify a parsed number as `Integer` or `Number`.
///
/// Anything that parsed as i64/u64 is an integer. A float counts as an integer
/// only when it is finite, has no fractional part and sits in the exact range;
/// everything else falls back to `Number`.
pub fn classify(n: &Number) -> Leaf {
    if n.is_i64() || n.is_u64() {
        return Leaf::Integer;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => Leaf::Integer,
        _ => Leaf::Number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(v: serde_json::Value) -> Number {
        match v {
            serde_json::Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn integers_and_floats() {
        assert_eq!(classify(&num(json!(1))), Leaf::Integer);
        assert_eq!(classify(&num(json!(-7))), Leaf::Integer);
        assert_eq!(classify(&num(json!(u64::MAX))), Leaf::Integer);
        assert_eq!(classify(&num(json!(1.5))), Leaf::Number);
    }

    #[test]
    fn integral_float_is_integer_only_when_exact() {
        assert_eq!(classify(&num(json!(2.0))), Leaf::Integer);
        assert_eq!(classify(&num(json!(1e300))), Leaf::Number);
    }
}
