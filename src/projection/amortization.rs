//! Loan amortization and compounding formulas
//!
//! Every function here is total: out-of-domain inputs map to a defined value
//! (0, the principal, or NaN) instead of an error.

/// `(1 + rate)^years`, the factor every annual compounding step uses
pub fn growth_factor(rate: f64, years: u32) -> f64 {
    (1.0 + rate).powi(years as i32)
}

/// Fixed annual payment that retires `principal` over `term_years` at an
/// annual effective rate.
///
/// `P * i * (1+i)^N / ((1+i)^N - 1)`, with:
/// - `P <= 0` -> 0
/// - `N == 0` -> `P` (the whole amount is due immediately)
/// - `i == 0` -> `P / N` (straight-line)
pub fn annual_mortgage_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }
    if term_years == 0 {
        return principal;
    }
    if annual_rate == 0.0 {
        return principal / term_years as f64;
    }

    let growth = growth_factor(annual_rate, term_years);
    principal * (annual_rate * growth) / (growth - 1.0)
}

/// Outstanding balance after `payments_made` full annual payments.
///
/// `P * (1+i)^k - M * ((1+i)^k - 1) / i`, clamped at 0, with:
/// - `P <= 0` -> 0
/// - `k >= N` -> 0 (fully amortized)
/// - `N == 0` -> `P`
/// - `i == 0` -> `max(0, P - M * k)`
pub fn remaining_loan_balance(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
    payments_made: u32,
    annual_payment: f64,
) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }
    if payments_made >= term_years {
        return 0.0;
    }
    if term_years == 0 {
        return principal;
    }
    if annual_rate == 0.0 {
        return (principal - annual_payment * payments_made as f64).max(0.0);
    }

    let growth = growth_factor(annual_rate, payments_made);
    let balance = principal * growth - annual_payment * ((growth - 1.0) / annual_rate);
    balance.max(0.0)
}

/// Value of `principal` compounded annually at `rate` for `years`.
///
/// Zero principal stays zero, any non-finite input yields NaN and a negative
/// horizon returns the principal unchanged (no discounting back in time).
pub fn compound_future_value(principal: f64, rate: f64, years: f64) -> f64 {
    if principal == 0.0 {
        return 0.0;
    }
    if !principal.is_finite() || !rate.is_finite() || !years.is_finite() {
        return f64::NAN;
    }
    if years < 0.0 {
        return principal;
    }
    principal * (1.0 + rate).powf(years)
}

/// Interest paid over the loan term: `max(0, payment * N - P)`
pub fn total_interest(annual_payment: f64, term_years: u32, principal: f64) -> f64 {
    let interest = annual_payment * term_years as f64 - principal;
    if interest > 0.0 {
        interest
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_growth_factor() {
        assert_eq!(growth_factor(0.05, 0), 1.0);
        assert_relative_eq!(growth_factor(0.1, 2), 1.21, max_relative = 1e-12);
        assert_eq!(growth_factor(-1.0, 3), 0.0);
        assert!(growth_factor(f64::NAN, 2).is_nan());
        assert_relative_eq!(growth_factor(0.12, 10), 1.12_f64.powi(10), max_relative = 1e-15);
    }

    #[test]
    fn test_payment_closed_form() {
        // 100M at 12% over 10 years
        let payment = annual_mortgage_payment(100_000_000.0, 0.12, 10);
        let growth = 1.12_f64.powi(10);
        let expected = 100_000_000.0 * 0.12 * growth / (growth - 1.0);
        assert_relative_eq!(payment, expected, max_relative = 1e-12);
        assert!((payment - 17_698_416.0).abs() < 10.0, "payment = {}", payment);
    }

    #[test]
    fn test_payment_edge_cases() {
        assert_eq!(annual_mortgage_payment(0.0, 0.12, 10), 0.0);
        assert_eq!(annual_mortgage_payment(-5.0, 0.12, 10), 0.0);
        assert_eq!(annual_mortgage_payment(1_000.0, 0.12, 0), 1_000.0);
        assert_eq!(annual_mortgage_payment(1_000.0, 0.0, 0), 1_000.0);
        assert_eq!(annual_mortgage_payment(1_000.0, 0.0, 4), 250.0);
    }

    #[test]
    fn test_payments_cover_principal() {
        for &(p, i, n) in &[(1_000.0, 0.05, 5u32), (250_000.0, 0.12, 30), (1.0, 0.0, 7)] {
            let payment = annual_mortgage_payment(p, i, n);
            assert!(payment * n as f64 >= p - 1e-9);
        }
    }

    #[test]
    fn test_balance_fully_amortized_at_term() {
        let p = 100_000_000.0;
        let payment = annual_mortgage_payment(p, 0.12, 10);

        // Closed form at k = N - 1 should leave exactly one payment outstanding
        let last = remaining_loan_balance(p, 0.12, 10, 9, payment);
        assert_relative_eq!(last * 1.12, payment, max_relative = 1e-9);

        assert_eq!(remaining_loan_balance(p, 0.12, 10, 10, payment), 0.0);
        assert_eq!(remaining_loan_balance(p, 0.12, 10, 15, payment), 0.0);
    }

    #[test]
    fn test_balance_before_any_payment() {
        let p = 100_000_000.0;
        let payment = annual_mortgage_payment(p, 0.12, 10);
        assert_eq!(remaining_loan_balance(p, 0.12, 10, 0, payment), p);
    }

    #[test]
    fn test_balance_edge_cases() {
        assert_eq!(remaining_loan_balance(0.0, 0.1, 10, 3, 100.0), 0.0);
        assert_eq!(remaining_loan_balance(1_000.0, 0.0, 4, 1, 250.0), 750.0);
        assert_eq!(remaining_loan_balance(1_000.0, 0.0, 4, 3, 400.0), 0.0);
        // Zero term: k >= N already holds, so the loan is treated as settled
        assert_eq!(remaining_loan_balance(1_000.0, 0.1, 0, 0, 1_000.0), 0.0);
    }

    #[test]
    fn test_compound_future_value() {
        assert_relative_eq!(compound_future_value(1_000.0, 0.1, 2.0), 1_210.0, max_relative = 1e-12);
        assert_eq!(compound_future_value(0.0, 0.1, 5.0), 0.0);
        assert_eq!(compound_future_value(1_000.0, 0.1, -3.0), 1_000.0);
        assert!(compound_future_value(1_000.0, f64::INFINITY, 2.0).is_nan());
        assert!(compound_future_value(f64::NAN, 0.1, 2.0).is_nan());
    }

    #[test]
    fn test_total_interest_clamped() {
        assert_eq!(total_interest(100.0, 5, 1_000.0), 0.0);
        assert_eq!(total_interest(300.0, 5, 1_000.0), 500.0);
    }
}
