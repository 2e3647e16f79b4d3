//! Household and treatment policy parameters.

use aq_core::Real;

/// Daily urine volume per person, litres.
pub const URINE_PER_PERSON: Real = 0.7;
/// Daily fecal volume per person, litres.
pub const FECAL_PER_PERSON: Real = 0.2;

/// Occupancy and water-use figures that drive the household input nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseholdSettings {
    pub people: u32,
    /// Washwater volume per person per day, litres.
    pub litres_per_person: Real,
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        Self {
            people: 1,
            litres_per_person: 250.0,
        }
    }
}

impl HouseholdSettings {
    pub fn washwater_flow(&self) -> Real {
        self.people as Real * self.litres_per_person
    }

    pub fn urine_flow(&self) -> Real {
        self.people as Real * URINE_PER_PERSON
    }

    pub fn fecal_flow(&self) -> Real {
        self.people as Real * FECAL_PER_PERSON
    }
}

/// Settling-stage behavior of the treatment chain.
///
/// The sludge stream withdraws a fixed volume from the influent and
/// carries the captured fraction of each substance's mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreatmentPolicy {
    /// Signed sludge withdrawal, litres per day. Negative: flow leaves
    /// through the sludge node's declared edges in reverse.
    pub sludge_flow: Real,
    /// Fraction of influent COD mass routed into the sludge.
    pub cod_capture: Real,
    /// Fraction of influent nitrogen mass routed into the sludge.
    pub n_capture: Real,
    /// Fraction of influent phosphorus mass routed into the sludge.
    pub p_capture: Real,
}

impl Default for TreatmentPolicy {
    fn default() -> Self {
        Self {
            sludge_flow: -0.2,
            cod_capture: 0.8,
            n_capture: 0.3,
            p_capture: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn household_flows_scale_with_occupancy() {
        let settings = HouseholdSettings {
            people: 4,
            litres_per_person: 100.0,
        };
        assert_eq!(settings.washwater_flow(), 400.0);
        assert!((settings.urine_flow() - 2.8).abs() < 1e-12);
        assert!((settings.fecal_flow() - 0.8).abs() < 1e-12);
    }
}
