use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm_client::ChatModel;
use crate::models::jobs::{CompanyRow, JobRow, RoleRow};
use crate::qa::classifier::{find_best_matching_role, TitleClassifier};
use crate::qa::fetch::{extract_visible_text, PageFetcher, PAGE_TEXT_LIMIT};
use crate::qa::location::{extract_location_with_llm, match_location, LocationMatch};
use crate::qa::store::{JobStore, StoreError};

/// Role title marking a job as misclassified beyond repair.
pub const OTHER_ROLE: &str = "Other";

#[derive(Debug, Clone)]
pub struct QaSettings {
    /// Run the liveness probe and the `Other`-role check before the location step.
    pub activity_checks: bool,
    /// Pause between companies to spread load on the LLM and posting sites.
    pub company_delay: Duration,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self {
            activity_checks: true,
            company_delay: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QaStage {
    Liveness,
    RoleCheck,
    Reclassify,
    Fetch,
    LocationLookup,
    Persist,
}

impl fmt::Display for QaStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QaStage::Liveness => "liveness",
            QaStage::RoleCheck => "role check",
            QaStage::Reclassify => "reclassify",
            QaStage::Fetch => "fetch",
            QaStage::LocationLookup => "location lookup",
            QaStage::Persist => "persist",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobFailure {
    pub job_id: i64,
    pub stage: QaStage,
    pub reason: String,
}

impl JobFailure {
    fn new(job: &JobRow, stage: QaStage, reason: impl fmt::Display) -> Self {
        Self {
            job_id: job.id,
            stage,
            reason: reason.to_string(),
        }
    }
}

/// Totals for one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub companies_processed: usize,
    pub jobs_examined: usize,
    pub deactivated_unreachable: usize,
    pub deactivated_other_role: usize,
    pub reclassified: usize,
    pub locations_updated: usize,
    pub jobs_without_url: usize,
    pub failures: Vec<JobFailure>,
}

impl QaReport {
    fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            companies_processed: 0,
            jobs_examined: 0,
            deactivated_unreachable: 0,
            deactivated_other_role: 0,
            reclassified: 0,
            locations_updated: 0,
            jobs_without_url: 0,
            failures: Vec::new(),
        }
    }

    pub fn jobs_removed(&self) -> usize {
        self.deactivated_unreachable + self.deactivated_other_role
    }

    pub fn summary(&self) -> String {
        format!(
            "Total Jobs Removed: {}\nTotal Jobs Reclassified: {}\nLocations Updated: {}\nFailures: {}",
            self.jobs_removed(),
            self.reclassified,
            self.locations_updated,
            self.failures.len()
        )
    }
}

enum Deactivation {
    Unreachable,
    OtherRole,
}

pub struct QaRunner<'a> {
    store: &'a dyn JobStore,
    fetcher: &'a dyn PageFetcher,
    llm: &'a dyn ChatModel,
    classifier: Option<&'a dyn TitleClassifier>,
    settings: QaSettings,
}

impl<'a> QaRunner<'a> {
    pub fn new(
        store: &'a dyn JobStore,
        fetcher: &'a dyn PageFetcher,
        llm: &'a dyn ChatModel,
        settings: QaSettings,
    ) -> Self {
        Self {
            store,
            fetcher,
            llm,
            classifier: None,
            settings,
        }
    }

    pub fn with_classifier(mut self, classifier: &'a dyn TitleClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Walks every company's active jobs once. Only failing to list companies,
    /// jobs or roles aborts the run; per-job problems land in `failures`.
    pub async fn run(&self) -> Result<QaReport, StoreError> {
        let mut report = QaReport::start();
        info!("Starting job QA run {}", report.run_id);

        let roles = match self.classifier {
            Some(_) => self.store.list_roles().await?,
            None => Vec::new(),
        };
        let companies = self.store.list_companies().await?;

        for (idx, company) in companies.iter().enumerate() {
            self.process_company(company, &roles, &mut report).await?;
            report.companies_processed += 1;
            info!("Completed QA for {}.", company.name);

            if idx + 1 < companies.len() && !self.settings.company_delay.is_zero() {
                tokio::time::sleep(self.settings.company_delay).await;
            }
        }

        report.finished_at = Some(Utc::now());
        Ok(report)
    }

    async fn process_company(
        &self,
        company: &CompanyRow,
        roles: &[RoleRow],
        report: &mut QaReport,
    ) -> Result<(), StoreError> {
        let jobs = self.store.active_jobs(company.id).await?;
        for job in &jobs {
            report.jobs_examined += 1;
            if let Err(failure) = self.process_job(job, roles, report).await {
                warn!(
                    "Job {} failed at {}: {}",
                    failure.job_id, failure.stage, failure.reason
                );
                report.failures.push(failure);
            }
        }
        Ok(())
    }

    async fn process_job(
        &self,
        job: &JobRow,
        roles: &[RoleRow],
        report: &mut QaReport,
    ) -> Result<(), JobFailure> {
        if self.settings.activity_checks {
            match self.check_activity(job).await? {
                Some(Deactivation::Unreachable) => {
                    report.deactivated_unreachable += 1;
                    info!("Found {} inactive jobs so far.", report.deactivated_unreachable);
                    return Ok(());
                }
                Some(Deactivation::OtherRole) => {
                    report.deactivated_other_role += 1;
                    return Ok(());
                }
                None => {}
            }
        }

        if let Some(classifier) = self.classifier {
            if self.reclassify(classifier, job, roles).await? {
                report.reclassified += 1;
            }
        }

        let Some(url) = job.external_posting_url.as_deref() else {
            report.jobs_without_url += 1;
            return Ok(());
        };

        let matched = self.update_location(job, url).await?;
        report.locations_updated += 1;
        info!("Job {} located in {}", job.id, matched.city());
        Ok(())
    }

    async fn check_activity(&self, job: &JobRow) -> Result<Option<Deactivation>, JobFailure> {
        if let Some(url) = job.external_posting_url.as_deref() {
            if !self.fetcher.is_url_active(url).await {
                self.store
                    .deactivate_job(job.id)
                    .await
                    .map_err(|e| JobFailure::new(job, QaStage::Liveness, e))?;
                return Ok(Some(Deactivation::Unreachable));
            }
        }

        if job.role_title.as_deref() == Some(OTHER_ROLE) {
            self.store
                .deactivate_job(job.id)
                .await
                .map_err(|e| JobFailure::new(job, QaStage::RoleCheck, e))?;
            return Ok(Some(Deactivation::OtherRole));
        }

        Ok(None)
    }

    async fn reclassify(
        &self,
        classifier: &dyn TitleClassifier,
        job: &JobRow,
        roles: &[RoleRow],
    ) -> Result<bool, JobFailure> {
        let Some(role_id) = find_best_matching_role(classifier, &job.title, roles) else {
            return Ok(false);
        };
        if job.role_id == Some(role_id) {
            return Ok(false);
        }
        self.store
            .set_job_role(job.id, role_id)
            .await
            .map_err(|e| JobFailure::new(job, QaStage::Reclassify, e))?;
        Ok(true)
    }

    async fn update_location(&self, job: &JobRow, url: &str) -> Result<LocationMatch, JobFailure> {
        let html = self
            .fetcher
            .fetch_page(url)
            .await
            .map_err(|e| JobFailure::new(job, QaStage::Fetch, e))?;
        let text = extract_visible_text(&html, PAGE_TEXT_LIMIT);

        let persist = |e: StoreError| JobFailure::new(job, QaStage::Persist, e);

        let locations = self.store.list_locations().await.map_err(persist)?;
        let cities: Vec<&str> = locations.iter().map(|l| l.city.as_str()).collect();

        let reply = extract_location_with_llm(self.llm, &text, &cities)
            .await
            .map_err(|e| JobFailure::new(job, QaStage::LocationLookup, e))?;
        let matched = match_location(&reply, &cities);

        let location_id = match locations.iter().find(|l| l.city == matched.city()) {
            Some(location) => location.id,
            None => {
                self.store
                    .get_or_create_location(matched.city())
                    .await
                    .map_err(persist)?
                    .id
            }
        };

        self.store
            .set_job_location(job.id, location_id)
            .await
            .map_err(persist)?;
        Ok(matched)
    }
}
