//! Cost-driver ratings and the effort adjustment factor.

use std::collections::BTreeMap;

use effortmd_math::product;
use effortmd_types::{CostDriver, DriverAssignment, Rating};
use serde::Serialize;

use crate::error::CocomoError;
use crate::tables;

/// Ratings for the 15 cost drivers.
///
/// Drivers that were never set are Nominal (multiplier 1.0). Every stored
/// assignment was looked up from the multiplier table, so every multiplier is
/// positive and defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CostDriverSet {
    assignments: BTreeMap<CostDriver, DriverAssignment>,
}

impl CostDriverSet {
    /// Every driver at Nominal.
    pub fn nominal() -> Self {
        Self::default()
    }

    /// Build from string pairs such as `("cplx", "very high")`.
    pub fn from_named<I, K, V>(pairs: I) -> Result<Self, CocomoError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::default();
        for (name, rating) in pairs {
            let driver = parse_driver(name.as_ref())?;
            let rating = parse_rating(driver, rating.as_ref())?;
            set.set(driver, rating)?;
        }
        Ok(set)
    }

    /// Rate `driver`; fails when the table has no value for that rating.
    pub fn set(&mut self, driver: CostDriver, rating: Rating) -> Result<(), CocomoError> {
        let multiplier = tables::multiplier(driver, rating)
            .ok_or(CocomoError::UndefinedRating { driver, rating })?;
        self.assignments
            .insert(driver, DriverAssignment { rating, multiplier });
        Ok(())
    }

    pub fn with(mut self, driver: CostDriver, rating: Rating) -> Result<Self, CocomoError> {
        self.set(driver, rating)?;
        Ok(self)
    }

    /// Overlay `other` on top of `self`; drivers set in `other` win.
    pub fn merge(&mut self, other: &CostDriverSet) {
        for (driver, assignment) in &other.assignments {
            self.assignments.insert(*driver, *assignment);
        }
    }

    pub fn rating(&self, driver: CostDriver) -> Rating {
        self.assignment(driver).rating
    }

    pub fn multiplier(&self, driver: CostDriver) -> f64 {
        self.assignment(driver).multiplier
    }

    pub fn assignment(&self, driver: CostDriver) -> DriverAssignment {
        self.assignments
            .get(&driver)
            .copied()
            .unwrap_or(DriverAssignment {
                rating: Rating::Nominal,
                multiplier: 1.0,
            })
    }

    /// Whether `driver` was rated explicitly, even at Nominal.
    pub fn contains(&self, driver: CostDriver) -> bool {
        self.assignments.contains_key(&driver)
    }

    /// Number of drivers explicitly rated.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Effort adjustment factor: the product of all 15 multipliers.
    pub fn eaf(&self) -> f64 {
        product(CostDriver::ALL.iter().map(|d| self.multiplier(*d)))
    }

    /// Every driver (explicit or defaulted) keyed by its code.
    pub fn assignments(&self) -> BTreeMap<String, DriverAssignment> {
        CostDriver::ALL
            .iter()
            .map(|d| (d.code().to_string(), self.assignment(*d)))
            .collect()
    }
}

/// Parse a driver code, case-insensitively (`"cplx"`, `"CPLX"`).
pub fn parse_driver(name: &str) -> Result<CostDriver, CocomoError> {
    let wanted = name.trim();
    CostDriver::ALL
        .into_iter()
        .find(|d| d.code().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CocomoError::UnknownDriver {
            name: name.to_string(),
        })
}

/// Parse a rating label for `driver`.
///
/// Accepts `very_high`, `Very High`, `very-high`, `veryhigh` and the short
/// forms `vl`, `l`, `n`, `h`, `vh`, `xh`.
pub fn parse_rating(driver: CostDriver, input: &str) -> Result<Rating, CocomoError> {
    let key: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .to_ascii_lowercase();
    let rating = match key.as_str() {
        "verylow" | "vl" => Rating::VeryLow,
        "low" | "l" => Rating::Low,
        "nominal" | "nom" | "n" => Rating::Nominal,
        "high" | "h" => Rating::High,
        "veryhigh" | "vh" => Rating::VeryHigh,
        "extrahigh" | "xh" | "eh" => Rating::ExtraHigh,
        _ => {
            return Err(CocomoError::UnknownDriverRating {
                driver: driver.code().to_string(),
                rating: input.to_string(),
            });
        }
    };
    Ok(rating)
}
