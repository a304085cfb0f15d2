//! Tiered washing fees.
//!
//! A fee is the base price for a (vehicle size, package) pair plus a surcharge
//! of 20% of that base for every whole hour in the bay beyond the first.

use super::vehicle::VehicleSize;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid vehicle size or package type: {size}/{package}")]
    InvalidPricingInput { size: String, package: String },
}

/// Base prices keyed by vehicle size and package name.
#[derive(Debug, Clone)]
pub struct PricingTable {
    prices: HashMap<VehicleSize, Vec<(String, BigDecimal)>>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PricingTable {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    /// The price list the bay operates with.
    pub fn standard() -> Self {
        Self::new()
            .with_price(VehicleSize::Small, "Basic", 1000)
            .with_price(VehicleSize::Small, "Special", 2000)
            .with_price(VehicleSize::Small, "VIP", 3000)
            .with_price(VehicleSize::Medium, "Basic", 2000)
            .with_price(VehicleSize::Medium, "Special", 3000)
            .with_price(VehicleSize::Medium, "VIP", 4000)
            .with_price(VehicleSize::Big, "Basic", 3000)
            .with_price(VehicleSize::Big, "Special", 4000)
            .with_price(VehicleSize::Big, "VIP", 6000)
    }

    pub fn with_price(mut self, size: VehicleSize, package: &str, amount: i64) -> Self {
        let entries = self.prices.entry(size).or_default();
        entries.retain(|(name, _)| name != package);
        entries.push((package.to_string(), BigDecimal::from(amount)));
        self
    }

    pub fn base_price(&self, size: VehicleSize, package: &str) -> Option<&BigDecimal> {
        let package = package.trim();
        self.prices
            .get(&size)?
            .iter()
            .find(|(name, _)| name == package)
            .map(|(_, price)| price)
    }

    /// Iterates over every (size, package, base price) entry.
    pub fn entries(&self) -> impl Iterator<Item = (VehicleSize, &str, &BigDecimal)> + '_ {
        VehicleSize::ALL.into_iter().flat_map(move |size| {
            self.prices
                .get(&size)
                .into_iter()
                .flatten()
                .map(move |(name, price)| (size, name.as_str(), price))
        })
    }

    /// Computes the fee for a stay that began at `entry` and is settled at `at`.
    ///
    /// `size` is matched case-insensitively, `package` after trimming.
    pub fn quote(
        &self,
        size: &str,
        package: &str,
        entry: DateTime<Utc>,
        at: DateTime<Utc>,
    ) -> Result<BigDecimal, PricingError> {
        let invalid = || PricingError::InvalidPricingInput {
            size: size.to_string(),
            package: package.to_string(),
        };

        let size_class: VehicleSize = size.parse().map_err(|_| invalid())?;
        let base = self.base_price(size_class, package).ok_or_else(invalid)?;

        Ok(fee_for_hours(base, elapsed_hours(entry, at)))
    }
}

/// Whole hours between `entry` and `at`, truncated and never negative.
pub fn elapsed_hours(entry: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    (at - entry).num_hours().max(0)
}

/// Applies the per-hour surcharge to a base price.
pub fn fee_for_hours(base: &BigDecimal, hours: i64) -> BigDecimal {
    let fee = if hours > 1 {
        // 20% of base per extra hour, i.e. base * (hours - 1) / 5
        let surcharge = base * BigDecimal::from(hours - 1) / BigDecimal::from(5);
        base + surcharge
    } else {
        base.clone()
    };
    fee.with_scale(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_elapsed_is_base_price_for_every_entry() {
        let table = PricingTable::standard();
        let now = Utc::now();
        for (size, package, base) in table.entries() {
            let fee = table.quote(size.as_str(), package, now, now).unwrap();
            assert_eq!(&fee, base, "{}/{}", size, package);
        }
        assert_eq!(table.entries().count(), 9);
    }

    #[test]
    fn test_exactly_one_hour_charges_base_only() {
        let table = PricingTable::standard();
        let now = Utc::now();
        let fee = table
            .quote("small", "Basic", now - Duration::hours(1), now)
            .unwrap();
        assert_eq!(fee, dec("1000"));
    }

    #[test]
    fn test_two_hours_small_basic_is_1200() {
        let table = PricingTable::standard();
        let now = Utc::now();
        let fee = table
            .quote("small", "Basic", now - Duration::hours(2), now)
            .unwrap();
        assert_eq!(fee, dec("1200"));
    }

    #[test]
    fn test_three_hours_on_base_1000_is_1400() {
        assert_eq!(fee_for_hours(&dec("1000"), 3), dec("1400"));
    }

    #[test]
    fn test_partial_hours_are_truncated() {
        let table = PricingTable::standard();
        let now = Utc::now();
        let entry = now - Duration::minutes(179);
        assert_eq!(elapsed_hours(entry, now), 2);
        assert_eq!(table.quote("big", "VIP", entry, now).unwrap(), dec("7200"));
    }

    #[test]
    fn test_entry_in_future_counts_as_zero_hours() {
        let now = Utc::now();
        assert_eq!(elapsed_hours(now + Duration::hours(3), now), 0);
        let table = PricingTable::standard();
        let fee = table
            .quote("medium", "Special", now + Duration::hours(3), now)
            .unwrap();
        assert_eq!(fee, dec("3000"));
    }

    #[test]
    fn test_size_is_case_insensitive_and_package_trimmed() {
        let table = PricingTable::standard();
        let now = Utc::now();
        assert_eq!(table.quote("MEDIUM", " VIP ", now, now).unwrap(), dec("4000"));
    }

    #[test]
    fn test_unknown_size_rejected() {
        let table = PricingTable::standard();
        let now = Utc::now();
        let err = table.quote("huge", "Basic", now, now).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidPricingInput {
                size: "huge".to_string(),
                package: "Basic".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_package_rejected() {
        let table = PricingTable::standard();
        let now = Utc::now();
        assert!(table.quote("small", "Platinum", now, now).is_err());
        assert!(table.quote("small", "basic", now, now).is_err());
    }

    #[test]
    fn test_package_missing_for_one_size_only() {
        let table = PricingTable::new().with_price(VehicleSize::Big, "Truck", 9000);
        let now = Utc::now();
        assert!(table.quote("big", "Truck", now, now).is_ok());
        assert!(table.quote("small", "Truck", now, now).is_err());
    }

    #[test]
    fn test_with_price_replaces_existing_entry() {
        let table = PricingTable::standard().with_price(VehicleSize::Small, "Basic", 1500);
        assert_eq!(
            table.base_price(VehicleSize::Small, "Basic"),
            Some(&dec("1500"))
        );
        assert_eq!(table.entries().count(), 9);
    }

    proptest! {
        #[test]
        fn prop_fee_matches_formula(base in 1i64..100_000, hours in 0i64..500) {
            let base_dec = BigDecimal::from(base);
            let fee = fee_for_hours(&base_dec, hours);
            let expected = if hours > 1 {
                BigDecimal::from(base) + BigDecimal::from(base * (hours - 1)) / BigDecimal::from(5)
            } else {
                BigDecimal::from(base)
            };
            prop_assert_eq!(fee, expected);
        }

        #[test]
        fn prop_fee_never_below_base(base in 1i64..100_000, hours in 0i64..500) {
            let base_dec = BigDecimal::from(base);
            prop_assert!(fee_for_hours(&base_dec, hours) >= base_dec);
        }
    }
}
