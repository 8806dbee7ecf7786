//! Load applicant profiles from CSV

use super::{
    ApplicantProfile, Employment, EmploymentStatus, Gender, LoanRequest, MaritalStatus, Position,
};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use csv::Reader;
use rust_decimal::Decimal;
use std::path::Path;

/// Default applicant file used by the batch runner
pub const DEFAULT_APPLICANTS_PATH: &str = "data/applicants.csv";

/// Raw CSV row matching the applicants file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Amount", with = "rust_decimal::serde::str")]
    amount: Decimal,
    #[serde(rename = "Term")]
    term: u32,
    #[serde(rename = "BirthDate")]
    birth_date: NaiveDate,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "MaritalStatus")]
    marital_status: String,
    #[serde(rename = "EmploymentStatus")]
    employment_status: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Salary", with = "rust_decimal::serde::str")]
    salary: Decimal,
    #[serde(rename = "TotalExperience")]
    total_experience: u32,
    #[serde(rename = "CurrentExperience")]
    current_experience: u32,
    #[serde(rename = "Insurance")]
    insurance: bool,
    #[serde(rename = "SalaryClient")]
    salary_client: bool,
}

impl CsvRow {
    fn into_profile(self) -> Result<ApplicantProfile> {
        let gender = match self.gender.as_str() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            "NonBinary" => Gender::NonBinary,
            other => bail!("Unknown Gender: {}", other),
        };

        let marital_status = match self.marital_status.as_str() {
            "Married" => MaritalStatus::Married,
            "Divorced" => MaritalStatus::Divorced,
            "Single" => MaritalStatus::Single,
            "Widowed" => MaritalStatus::Widowed,
            other => bail!("Unknown MaritalStatus: {}", other),
        };

        let status = match self.employment_status.as_str() {
            "Employed" => EmploymentStatus::Employed,
            "Unemployed" => EmploymentStatus::Unemployed,
            "SelfEmployed" => EmploymentStatus::SelfEmployed,
            "BusinessOwner" => EmploymentStatus::BusinessOwner,
            "Retired" => EmploymentStatus::Retired,
            other => bail!("Unknown EmploymentStatus: {}", other),
        };

        let position = match self.position.as_str() {
            "Manager" => Position::Manager,
            "Developer" => Position::Developer,
            "Analyst" => Position::Analyst,
            "Other" => Position::Other,
            "MiddleManager" => Position::MiddleManager,
            "TopManager" => Position::TopManager,
            other => bail!("Unknown Position: {}", other),
        };

        Ok(ApplicantProfile {
            request: LoanRequest::new(self.amount, self.term, self.birth_date),
            gender,
            marital_status,
            employment: Employment {
                status,
                position,
                salary: self.salary,
                total_experience_months: self.total_experience,
                current_experience_months: self.current_experience,
            },
            insurance_enabled: self.insurance,
            salary_client: self.salary_client,
        })
    }
}

/// Load all applicant profiles from a CSV file
pub fn load_applicants<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantProfile>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening applicants file {}", path.display()))?;
    load_applicants_from_reader(file)
}

/// Load applicant profiles from any reader (e.g., string buffer, stdin)
pub fn load_applicants_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ApplicantProfile>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut profiles = Vec::new();

    for (line, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result.with_context(|| format!("parsing applicant row {}", line + 1))?;
        let profile = row
            .into_profile()
            .with_context(|| format!("converting applicant row {}", line + 1))?;
        profiles.push(profile);
    }

    Ok(profiles)
}
