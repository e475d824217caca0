pub mod config;
pub mod errors;
pub mod extraction;
pub mod jobs;
pub mod llm_client;
pub mod matching;
pub mod models;
pub mod resumes;
pub mod routes;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_support;
