// Job QA batch: liveness, role and location checks over the job tracker's
// active postings. Driven by the `job-qa` binary.

pub mod classifier;
pub mod fetch;
pub mod fuzzy;
pub mod location;
pub mod prompts;
pub mod runner;
pub mod store;
