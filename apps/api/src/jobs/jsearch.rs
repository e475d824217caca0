//! JSearch (RapidAPI) job source.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::{JobSearchQuery, JobSource};
use crate::models::job::Job;

const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

const UNTITLED_ROLE: &str = "Untitled Role";
const UNKNOWN_COMPANY: &str = "Unknown Company";

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    #[serde(default)]
    data: Option<Vec<JSearchJob>>,
}

#[derive(Debug, Deserialize)]
struct JSearchJob {
    job_apply_link: Option<String>,
    job_title: Option<String>,
    job_description: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_country: Option<String>,
}

pub struct JSearchClient {
    client: Client,
    api_key: Option<String>,
    country: String,
    default_location: String,
}

impl JSearchClient {
    pub fn new(
        api_key: Option<String>,
        country: String,
        default_location: String,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;
        Ok(Self {
            client,
            api_key,
            country,
            default_location,
        })
    }

    fn to_jobs(&self, response: JSearchResponse) -> Vec<Job> {
        let now = Utc::now();
        response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| to_job(raw, &self.default_location, now))
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Postings without an apply link are skipped; the link doubles as the job id.
fn to_job(raw: JSearchJob, default_location: &str, now: chrono::DateTime<Utc>) -> Option<Job> {
    let apply_url = non_blank(raw.job_apply_link)?;

    let location = [raw.job_city, raw.job_state, raw.job_country]
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(", ");

    Some(Job {
        id: apply_url.clone(),
        title: non_blank(raw.job_title).unwrap_or_else(|| UNTITLED_ROLE.to_string()),
        description: raw.job_description.unwrap_or_default(),
        company: non_blank(raw.employer_name).unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
        location: if location.is_empty() {
            default_location.to_string()
        } else {
            location
        },
        apply_url,
        created_at: now,
    })
}

#[async_trait]
impl JobSource for JSearchClient {
    async fn search(&self, query: &JobSearchQuery) -> Result<Vec<Job>, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::JobProvider("Job API key missing.".to_string()))?;

        let mut params = vec![
            ("query", query.query.as_str()),
            ("country", self.country.as_str()),
            ("num_pages", "1"),
        ];
        if let Some(location) = query.location.as_deref().filter(|l| !l.trim().is_empty()) {
            params.push(("location", location));
        }

        let response = self
            .client
            .get(JSEARCH_URL)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                warn!("Job search request failed: {e}");
                AppError::JobProvider("Failed to fetch jobs.".to_string())
            })?;

        if !response.status().is_success() {
            warn!("Job provider returned {}", response.status());
            return Err(AppError::JobProvider("Job provider error.".to_string()));
        }

        let body: JSearchResponse = response.json().await.map_err(|e| {
            warn!("Job provider returned an unreadable body: {e}");
            AppError::JobProvider("Job provider error.".to_string())
        })?;

        let jobs = self.to_jobs(body);
        info!("Job search for '{}' returned {} jobs", query.query, jobs.len());
        Ok(jobs)
    }
}
