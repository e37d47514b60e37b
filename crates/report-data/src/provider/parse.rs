//! 네이버 API 숫자 파싱.
//!
//! 네이버 모바일 API는 숫자를 `"71,500"`처럼 천 단위 구분자가 들어간 문자열로 반환합니다.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// JSON 값에서 숫자를 읽습니다.
///
/// 숫자는 그대로, 문자열은 `,`를 제거한 뒤 파싱합니다.
/// 값이 없거나 파싱할 수 없으면 0을 반환합니다.
pub fn parse_kr_number(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))
            .unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => parse_kr_str(s),
        _ => Decimal::ZERO,
    }
}

/// 천 단위 구분자가 포함된 문자열을 파싱합니다. 실패 시 0.
pub fn parse_kr_str(text: &str) -> Decimal {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);
    Decimal::from_str(cleaned).unwrap_or(Decimal::ZERO)
}

/// 주어진 키를 순서대로 확인해 0이 아닌 첫 번째 숫자를 반환합니다.
pub fn first_nonzero(object: &Value, keys: &[&str]) -> Decimal {
    keys.iter()
        .map(|key| parse_kr_number(object.get(*key)))
        .find(|value| !value.is_zero())
        .unwrap_or(Decimal::ZERO)
}
