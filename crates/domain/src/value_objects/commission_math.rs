/// Platform commission rate applied when a payment does not carry its own:
/// 300 basis points = 3%.
pub const DEFAULT_COMMISSION_RATE_BPS: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionSplit {
    pub platform_commission_minor: i32,
    pub seller_amount_minor: i32,
}

/// Splits a payment total into the platform commission and the seller payout.
///
/// Amounts are integer minor currency units. The commission is rounded
/// half-up, and the two parts always sum back to the total.
pub fn split_payment(total_amount_minor: i32, commission_rate_bps: i32) -> CommissionSplit {
    let numerator = i64::from(total_amount_minor) * i64::from(commission_rate_bps);
    let commission = ((numerator + 5_000) / 10_000) as i32;

    CommissionSplit {
        platform_commission_minor: commission,
        seller_amount_minor: total_amount_minor - commission,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_percent_of_one_thousand() {
        let split = split_payment(1000, DEFAULT_COMMISSION_RATE_BPS);
        assert_eq!(split.platform_commission_minor, 30);
        assert_eq!(split.seller_amount_minor, 970);
    }

    #[test]
    fn parts_always_sum_to_total() {
        for total in [1, 7, 50, 99, 999, 1000, 123_456, i32::MAX] {
            for rate in [0, 1, 250, 300, 1000, 10_000] {
                let split = split_payment(total, rate);
                assert_eq!(
                    split.platform_commission_minor + split.seller_amount_minor,
                    total,
                    "total={} rate={}",
                    total,
                    rate
                );
            }
        }
    }

    #[test]
    fn commission_rounds_half_up() {
        // 50 * 3% = 1.5 -> 2
        assert_eq!(split_payment(50, 300).platform_commission_minor, 2);
        // 999 * 3% = 29.97 -> 30
        assert_eq!(split_payment(999, 300).platform_commission_minor, 30);
        // 33 * 3% = 0.99 -> 1
        assert_eq!(split_payment(33, 300).platform_commission_minor, 1);
        // 16 * 3% = 0.48 -> 0
        assert_eq!(split_payment(16, 300).platform_commission_minor, 0);
    }

    #[test]
    fn zero_rate_takes_nothing() {
        let split = split_payment(5000, 0);
        assert_eq!(split.platform_commission_minor, 0);
        assert_eq!(split.seller_amount_minor, 5000);
    }

    #[test]
    fn full_rate_takes_everything() {
        let split = split_payment(5000, 10_000);
        assert_eq!(split.platform_commission_minor, 5000);
        assert_eq!(split.seller_amount_minor, 0);
    }
}
