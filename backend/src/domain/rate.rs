//! Rate and discount derivation for a prospective stay.
//!
//! The derivation is advisory: the client (or the quote endpoint) computes
//! a total from the room's nightly rate, an optional percentage discount
//! and the stay length, and only the resulting amount is ever persisted.
//! The discount itself is never stored, so a historical reservation cannot
//! explain its own price — that is a deliberate property of the pricing
//! model, not an omission.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::errors::{DomainError, Result};

/// A fully derived price for a stay.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub nightly_rate: Decimal,
    pub discount_percent: Decimal,
    pub effective_rate: Decimal,
    pub nights: i64,
    pub total_amount: Decimal,
}

/// Whole nights between check-in and check-out. Fails unless the range is
/// strictly forward.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> Result<i64> {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(DomainError::validation(
            "check-out date must be after check-in date",
        ));
    }
    Ok(nights)
}

/// Nightly rate after applying a percentage discount, rounded to cents.
pub fn effective_rate(nightly_rate: Decimal, discount_percent: Decimal) -> Result<Decimal> {
    if nightly_rate < Decimal::ZERO {
        return Err(DomainError::validation("nightly rate must not be negative"));
    }
    if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
        return Err(DomainError::validation(
            "discount percent must be between 0 and 100",
        ));
    }
    let factor = Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED;
    Ok((nightly_rate * factor).round_dp(2))
}

/// Derive the full quote for a stay: discounted nightly rate multiplied by
/// the number of nights.
pub fn quote(
    nightly_rate: Decimal,
    discount_percent: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<Quote> {
    let nights = nights_between(check_in, check_out)?;
    let effective = effective_rate(nightly_rate, discount_percent)?;
    let total_amount = (effective * Decimal::from(nights)).round_dp(2);
    Ok(Quote {
        nightly_rate,
        discount_percent,
        effective_rate: effective,
        nights,
        total_amount,
    })
}

/// The rate/discount pair as edited on the reservation form.
///
/// Rate and discount are last-writer-wins: entering a new rate clears any
/// previously entered discount so stale values never combine.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteForm {
    nightly_rate: Decimal,
    discount_percent: Option<Decimal>,
}

impl QuoteForm {
    pub fn new(nightly_rate: Decimal) -> Self {
        Self {
            nightly_rate,
            discount_percent: None,
        }
    }

    /// Overwrite the nightly rate. Clears any entered discount.
    pub fn set_rate(&mut self, nightly_rate: Decimal) {
        self.nightly_rate = nightly_rate;
        self.discount_percent = None;
    }

    pub fn set_discount(&mut self, discount_percent: Decimal) -> Result<()> {
        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(
                "discount percent must be between 0 and 100",
            ));
        }
        self.discount_percent = Some(discount_percent);
        Ok(())
    }

    pub fn nightly_rate(&self) -> Decimal {
        self.nightly_rate
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent.unwrap_or(Decimal::ZERO)
    }

    pub fn effective_rate(&self) -> Result<Decimal> {
        effective_rate(self.nightly_rate, self.discount_percent())
    }

    pub fn quote(&self, check_in: NaiveDate, check_out: NaiveDate) -> Result<Quote> {
        quote(
            self.nightly_rate,
            self.discount_percent(),
            check_in,
            check_out,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ten_percent_discount_on_200k() {
        let rate = effective_rate(dec!(200000), dec!(10)).unwrap();
        assert_eq!(rate, dec!(180000));
    }

    #[test]
    fn three_night_stay_is_billed_per_night() {
        let q = quote(
            dec!(200000),
            dec!(10),
            date(2026, 3, 1),
            date(2026, 3, 4),
        )
        .unwrap();
        assert_eq!(q.nights, 3);
        assert_eq!(q.effective_rate, dec!(180000));
        assert_eq!(q.total_amount, dec!(540000));
    }

    #[test]
    fn two_nights_no_discount() {
        let q = quote(
            dec!(500000),
            Decimal::ZERO,
            date(2026, 3, 1),
            date(2026, 3, 3),
        )
        .unwrap();
        assert_eq!(q.total_amount, dec!(1000000));
    }

    #[test]
    fn zero_or_negative_night_ranges_are_rejected() {
        let day = date(2026, 3, 1);
        assert!(nights_between(day, day).is_err());
        assert!(nights_between(date(2026, 3, 4), date(2026, 3, 1)).is_err());
    }

    #[test]
    fn discount_bounds_are_enforced() {
        assert!(effective_rate(dec!(100), dec!(-1)).is_err());
        assert!(effective_rate(dec!(100), dec!(101)).is_err());
        assert_eq!(effective_rate(dec!(100), dec!(100)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn fractional_discount_rounds_to_cents() {
        // 3% off 99999 = 96999.03
        let rate = effective_rate(dec!(99999), dec!(3)).unwrap();
        assert_eq!(rate, dec!(96999.03));
    }

    #[test]
    fn entering_a_rate_clears_the_discount() {
        let mut form = QuoteForm::new(dec!(200000));
        form.set_discount(dec!(25)).unwrap();
        assert_eq!(form.effective_rate().unwrap(), dec!(150000));

        form.set_rate(dec!(300000));
        assert_eq!(form.discount_percent(), Decimal::ZERO);
        assert_eq!(form.effective_rate().unwrap(), dec!(300000));
    }

    #[test]
    fn form_quote_matches_free_function() {
        let mut form = QuoteForm::new(dec!(150000));
        form.set_discount(dec!(50)).unwrap();
        let q = form.quote(date(2026, 5, 10), date(2026, 5, 12)).unwrap();
        assert_eq!(q.total_amount, dec!(150000));
    }
}
