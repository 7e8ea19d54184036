use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use jobly_core::serde::{deserialize_flag, deserialize_optional_i32};

use crate::companies::Company;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Decimal fraction between 0 and 1, rendered as text
    pub equity: Option<String>,
    pub company_handle: String,
}

/// A job as it appears in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

/// A single job with its company nested in place of the handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company: Option<Company>,
}

impl JobDetail {
    pub fn from_job(job: Job, company: Option<Company>) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJobDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1 to 255 characters"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary must not be negative"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<String>,
    #[validate(length(min = 1, max = 25, message = "companyHandle must be 1 to 25 characters"))]
    pub company_handle: String,
}

/// Fields an admin may change on an existing job. The company a job belongs
/// to is fixed at creation.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJobDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "salary must not be negative"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct JobSearchParams {
    /// Only jobs paying at least this much
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    #[validate(range(min = 0, message = "minSalary must not be negative"))]
    pub min_salary: Option<i32>,
    /// `true` restricts the search to jobs with non-zero equity
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_equity: bool,
    /// Case-insensitive substring of the job title
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobDetailResponse {
    pub job: JobDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobsResponse {
    pub jobs: Vec<JobListing>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[serde(rename = "Deleted")]
    pub deleted: i32,
}

/// Accepts `0`, `0.<digits>`, `1` and `1.<zeros>`.
fn validate_equity(equity: &str) -> Result<(), ValidationError> {
    let (whole, fraction) = match equity.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (equity, None),
    };

    let fraction_ok = |allowed: fn(u8) -> bool| {
        fraction.is_none_or(|f| !f.is_empty() && f.bytes().all(allowed))
    };

    let valid = match whole {
        "0" => fraction_ok(|b| b.is_ascii_digit()),
        "1" => fraction_ok(|b| b == b'0'),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("equity");
        err.message = Some("equity must be a decimal between 0 and 1".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_deserialize() {
        let json = r#"{"companyHandle":"c1","title":"NewJob","salary":200,"equity":"0.3"}"#;
        let dto: NewJobDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.company_handle, "c1");
        assert_eq!(dto.salary, Some(200));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_new_job_requires_title() {
        let json = r#"{"companyHandle":"c1"}"#;
        assert!(serde_json::from_str::<NewJobDto>(json).is_err());
    }

    #[test]
    fn test_new_job_rejects_string_salary() {
        let json = r#"{"companyHandle":"c1","title":"NewJob","salary":"NaN","equity":"0.6"}"#;
        assert!(serde_json::from_str::<NewJobDto>(json).is_err());
    }

    #[test]
    fn test_new_job_rejects_negative_salary() {
        let json = r#"{"companyHandle":"c1","title":"NewJob","salary":-1}"#;
        let dto: NewJobDto = serde_json::from_str(json).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_rejects_handle() {
        let json = r#"{"handle":"test"}"#;
        assert!(serde_json::from_str::<UpdateJobDto>(json).is_err());

        let json = r#"{"companyHandle":"c2"}"#;
        assert!(serde_json::from_str::<UpdateJobDto>(json).is_err());
    }

    #[test]
    fn test_update_empty_body_is_valid_shape() {
        let dto: UpdateJobDto = serde_json::from_str("{}").unwrap();
        assert!(dto.title.is_none() && dto.salary.is_none() && dto.equity.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_equity_rules() {
        for ok in ["0", "0.1", "0.75", "1", "1.0", "1.000"] {
            assert!(validate_equity(ok).is_ok(), "{ok} should be accepted");
        }
        for bad in ["1.1", "2", "-0.1", ".5", "0.", "abc", "", "0.1.2"] {
            assert!(validate_equity(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_update_validates_equity() {
        let dto = UpdateJobDto {
            equity: Some("1.5".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_search_params_from_json() {
        let params: JobSearchParams =
            serde_json::from_str(r#"{"minSalary":"999","title":"Job"}"#).unwrap();
        assert_eq!(params.min_salary, Some(999));
        assert!(!params.has_equity);
        assert_eq!(params.title.as_deref(), Some("Job"));
    }

    #[test]
    fn test_search_params_reject_unknown() {
        let result = serde_json::from_str::<JobSearchParams>(r#"{"minSalary":"45","test":"test"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deleted_response_key() {
        let body = serde_json::to_value(DeletedResponse { deleted: 3 }).unwrap();
        assert_eq!(body["Deleted"], 3);
    }

    #[test]
    fn test_job_detail_from_job() {
        let job = Job {
            id: 1,
            title: "Job1".to_string(),
            salary: Some(100),
            equity: Some("0.1".to_string()),
            company_handle: "c1".to_string(),
        };
        let detail = JobDetail::from_job(job, None);
        let body = serde_json::to_value(&detail).unwrap();
        assert_eq!(body["id"], 1);
        assert!(body.get("companyHandle").is_none());
    }
}
