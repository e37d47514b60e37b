//! 가격/등락률 계산을 위한 Decimal 유틸리티.

use rust_decimal::{Decimal, RoundingStrategy};

/// 가격 타입.
pub type Price = Decimal;

/// 퍼센트 타입 (1.0 = 1%).
pub type Percentage = Decimal;

/// 등락률 저장 시 사용하는 소수점 자릿수
pub const PCT_DECIMAL_PLACES: u32 = 2;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 등락률을 소수점 2자리로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_pct(&self) -> Decimal;

    /// 부호가 붙은 소수점 2자리 문자열 (예: "+5.26", "-1.00", "0.00").
    fn to_signed_string(&self) -> String;

    /// 천 단위 구분자가 들어간 문자열 (예: "71,500").
    fn to_grouped_string(&self) -> String;
}

impl DecimalExt for Decimal {
    fn round_pct(&self) -> Decimal {
        self.round_dp_with_strategy(PCT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_signed_string(&self) -> String {
        let rounded = self.round_pct();
        if rounded > Decimal::ZERO {
            format!("+{:.2}", rounded)
        } else {
            format!("{:.2}", rounded)
        }
    }

    fn to_grouped_string(&self) -> String {
        let text = self.normalize().to_string();
        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (idx, ch) in int_part.chars().enumerate() {
            if idx > 0 && (int_part.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        match frac_part {
            Some(frac) => format!("{}{}.{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_pct() {
        assert_eq!(dec!(5.263157).round_pct(), dec!(5.26));
        assert_eq!(dec!(1.005).round_pct(), dec!(1.01));
        assert_eq!(dec!(-1.005).round_pct(), dec!(-1.01));
    }

    #[test]
    fn test_signed_string() {
        assert_eq!(dec!(5.263).to_signed_string(), "+5.26");
        assert_eq!(dec!(-1).to_signed_string(), "-1.00");
        assert_eq!(Decimal::ZERO.to_signed_string(), "0.00");
    }

    #[test]
    fn test_grouped_string() {
        assert_eq!(dec!(71500).to_grouped_string(), "71,500");
        assert_eq!(dec!(1234567.5).to_grouped_string(), "1,234,567.5");
        assert_eq!(dec!(999).to_grouped_string(), "999");
        assert_eq!(dec!(-1200).to_grouped_string(), "-1,200");
        assert_eq!(dec!(100.00).to_grouped_string(), "100");
    }
}
