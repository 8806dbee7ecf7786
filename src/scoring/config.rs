//! Scoring tunables and their CSV loader
//!
//! Parameters live in a two-column `parameter,value` file. Parameters missing
//! from the file keep their default; unknown names are rejected so a typo never
//! silently falls back to a default rate.

use anyhow::{bail, ensure, Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Default path to the scoring parameters file
pub const DEFAULT_SCORING_PARAMETERS_PATH: &str = "data/scoring_parameters.csv";

/// Base rate plus every discount, surcharge and threshold used by the rule chain.
///
/// Rates are annual fractions (0.15 = 15%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Starting annual rate before any rule runs
    pub base_interest_rate: Decimal,

    pub insurance_discount: Decimal,
    /// Insurance premium as a fraction of the requested amount, added to the principal
    pub insurance_cost_rate: Decimal,
    pub salary_client_discount: Decimal,

    pub self_employed_surcharge: Decimal,
    pub business_owner_surcharge: Decimal,
    pub middle_manager_discount: Decimal,
    pub top_manager_discount: Decimal,
    pub married_discount: Decimal,
    pub divorced_surcharge: Decimal,
    pub favorable_gender_age_discount: Decimal,
    pub non_binary_surcharge: Decimal,

    pub min_age: u32,
    pub max_age: u32,
    /// Requested amount may not exceed this many monthly salaries
    pub max_amount_salary_multiple: Decimal,
    pub min_total_experience_months: u32,
    pub min_current_experience_months: u32,

    /// Smallest principal accepted at request validation
    pub min_amount: Decimal,
    /// Shortest term in months accepted at request validation
    pub min_term: u32,
    /// Longest term in months accepted at request validation
    pub max_term: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_interest_rate: dec!(0.15),
            insurance_discount: dec!(0.03),
            insurance_cost_rate: dec!(0.01),
            salary_client_discount: dec!(0.01),
            self_employed_surcharge: dec!(0.02),
            business_owner_surcharge: dec!(0.01),
            middle_manager_discount: dec!(0.02),
            top_manager_discount: dec!(0.03),
            married_discount: dec!(0.03),
            divorced_surcharge: dec!(0.01),
            favorable_gender_age_discount: dec!(0.03),
            non_binary_surcharge: dec!(0.07),
            min_age: 20,
            max_age: 65,
            max_amount_salary_multiple: dec!(24),
            min_total_experience_months: 18,
            min_current_experience_months: 3,
            min_amount: dec!(20000),
            min_term: 6,
            max_term: 600,
        }
    }
}

impl ScoringConfig {
    /// Default tunables with a different starting rate
    pub fn with_base_rate(base_interest_rate: Decimal) -> Self {
        Self {
            base_interest_rate,
            ..Self::default()
        }
    }

    /// Load parameters from the default location (data/scoring_parameters.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_SCORING_PARAMETERS_PATH))
    }

    /// Load parameters from a specific file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening scoring parameters {}", path.display()))?;
        Self::from_reader(file)
    }

    /// Load parameters from any reader, starting from the defaults
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut config = Self::default();
        let mut csv_reader = csv::Reader::from_reader(reader);

        for result in csv_reader.records() {
            let record = result?;
            let name = record.get(0).unwrap_or_default().trim();
            let value = record.get(1).unwrap_or_default().trim();
            config
                .set(name, value)
                .with_context(|| format!("scoring parameter {}", name))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "baseInterestRate" => self.base_interest_rate = parse_decimal(value)?,
            "insuranceDiscount" => self.insurance_discount = parse_decimal(value)?,
            "insuranceCostRate" => self.insurance_cost_rate = parse_decimal(value)?,
            "salaryClientDiscount" => self.salary_client_discount = parse_decimal(value)?,
            "selfEmployedSurcharge" => self.self_employed_surcharge = parse_decimal(value)?,
            "businessOwnerSurcharge" => self.business_owner_surcharge = parse_decimal(value)?,
            "middleManagerDiscount" => self.middle_manager_discount = parse_decimal(value)?,
            "topManagerDiscount" => self.top_manager_discount = parse_decimal(value)?,
            "marriedDiscount" => self.married_discount = parse_decimal(value)?,
            "divorcedSurcharge" => self.divorced_surcharge = parse_decimal(value)?,
            "favorableGenderAgeDiscount" => {
                self.favorable_gender_age_discount = parse_decimal(value)?
            }
            "nonBinarySurcharge" => self.non_binary_surcharge = parse_decimal(value)?,
            "minAge" => self.min_age = value.parse()?,
            "maxAge" => self.max_age = value.parse()?,
            "maxAmountSalaryMultiple" => self.max_amount_salary_multiple = parse_decimal(value)?,
            "minTotalExperienceMonths" => self.min_total_experience_months = value.parse()?,
            "minCurrentExperienceMonths" => self.min_current_experience_months = value.parse()?,
            "minAmount" => self.min_amount = parse_decimal(value)?,
            "minTerm" => self.min_term = value.parse()?,
            "maxTerm" => self.max_term = value.parse()?,
            other => bail!("unknown scoring parameter: {}", other),
        }
        Ok(())
    }

    /// Sanity checks on thresholds; discounts and surcharges are not bounded
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_age <= self.max_age,
            "minAge {} exceeds maxAge {}",
            self.min_age,
            self.max_age
        );
        ensure!(
            self.max_amount_salary_multiple >= Decimal::ZERO,
            "maxAmountSalaryMultiple must not be negative"
        );
        ensure!(
            self.min_term <= self.max_term,
            "minTerm {} exceeds maxTerm {}",
            self.min_term,
            self.max_term
        );
        ensure!(self.min_amount >= Decimal::ZERO, "minAmount must not be negative");
        ensure!(
            self.insurance_cost_rate >= Decimal::ZERO,
            "insuranceCostRate must not be negative"
        );
        Ok(())
    }
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    value
        .parse::<Decimal>()
        .with_context(|| format!("invalid decimal {:?}", value))
}
