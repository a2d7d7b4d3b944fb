//! Published COCOMO 81 coefficient and multiplier tables.
//!
//! Both tables are immutable and indexed by enum so they can be checked
//! cell by cell against the published values.

use effortmd_types::{Coefficients, CostDriver, ProjectClass, Rating};

const NA: Option<f64> = None;

/// Basic model coefficients `(a, b, c, d)` per project class.
pub const COEFFICIENTS: [(ProjectClass, Coefficients); 3] = [
    (
        ProjectClass::Organic,
        Coefficients {
            a: 2.4,
            b: 1.05,
            c: 2.5,
            d: 0.38,
        },
    ),
    (
        ProjectClass::Semidetached,
        Coefficients {
            a: 3.0,
            b: 1.12,
            c: 2.5,
            d: 0.35,
        },
    ),
    (
        ProjectClass::Embedded,
        Coefficients {
            a: 3.6,
            b: 1.20,
            c: 2.5,
            d: 0.32,
        },
    ),
];

/// Effort multipliers, one row per [`CostDriver`] in declaration order.
///
/// Columns: Very Low, Low, Nominal, High, Very High, Extra High.
/// `None` marks a rating the model does not define for that driver.
pub const MULTIPLIERS: [[Option<f64>; 6]; 15] = [
    // RELY
    [Some(0.75), Some(0.88), Some(1.00), Some(1.15), Some(1.40), NA],
    // DATA
    [NA, Some(0.94), Some(1.00), Some(1.08), Some(1.16), NA],
    // CPLX
    [Some(0.70), Some(0.85), Some(1.00), Some(1.15), Some(1.30), Some(1.65)],
    // TIME
    [NA, NA, Some(1.00), Some(1.11), Some(1.30), Some(1.66)],
    // STOR
    [NA, NA, Some(1.00), Some(1.06), Some(1.21), Some(1.56)],
    // VIRT
    [NA, Some(0.87), Some(1.00), Some(1.15), Some(1.30), NA],
    // TURN
    [NA, Some(0.87), Some(1.00), Some(1.07), Some(1.15), NA],
    // ACAP
    [Some(1.46), Some(1.19), Some(1.00), Some(0.86), Some(0.71), NA],
    // AEXP
    [Some(1.29), Some(1.13), Some(1.00), Some(0.91), Some(0.82), NA],
    // PCAP
    [Some(1.42), Some(1.17), Some(1.00), Some(0.86), Some(0.70), NA],
    // VEXP
    [Some(1.21), Some(1.10), Some(1.00), Some(0.90), NA, NA],
    // LEXP
    [Some(1.14), Some(1.07), Some(1.00), Some(0.95), NA, NA],
    // MODP
    [Some(1.24), Some(1.10), Some(1.00), Some(0.91), Some(0.82), NA],
    // TOOL
    [Some(1.24), Some(1.10), Some(1.00), Some(0.91), Some(0.83), NA],
    // SCED
    [Some(1.23), Some(1.08), Some(1.00), Some(1.04), Some(1.10), NA],
];

pub fn coefficients(class: ProjectClass) -> Coefficients {
    match class {
        ProjectClass::Organic => COEFFICIENTS[0].1,
        ProjectClass::Semidetached => COEFFICIENTS[1].1,
        ProjectClass::Embedded => COEFFICIENTS[2].1,
    }
}

/// Multiplier for `driver` at `rating`, or `None` where the table has no value.
pub fn multiplier(driver: CostDriver, rating: Rating) -> Option<f64> {
    MULTIPLIERS[driver.index()][rating.index()]
}

/// Ratings defined for `driver`, in ascending order.
pub fn defined_ratings(driver: CostDriver) -> impl Iterator<Item = Rating> {
    Rating::ALL
        .into_iter()
        .filter(move |rating| multiplier(driver, *rating).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficient_rows_are_keyed_by_matching_class() {
        for (class, coef) in COEFFICIENTS {
            assert_eq!(coefficients(class), coef);
        }
    }

    #[test]
    fn every_defined_multiplier_is_positive() {
        for row in MULTIPLIERS {
            for cell in row.into_iter().flatten() {
                assert!(cell > 0.0);
            }
        }
    }

    #[test]
    fn nominal_is_always_defined_and_neutral() {
        for driver in CostDriver::ALL {
            assert_eq!(multiplier(driver, Rating::Nominal), Some(1.0));
        }
    }

    #[test]
    fn undefined_cells_match_published_table() {
        assert_eq!(multiplier(CostDriver::Rely, Rating::ExtraHigh), None);
        assert_eq!(multiplier(CostDriver::Data, Rating::VeryLow), None);
        assert_eq!(multiplier(CostDriver::Time, Rating::Low), None);
        assert_eq!(multiplier(CostDriver::Vexp, Rating::VeryHigh), None);
        assert_eq!(defined_ratings(CostDriver::Cplx).count(), 6);
        assert_eq!(defined_ratings(CostDriver::Lexp).count(), 4);
    }
}
