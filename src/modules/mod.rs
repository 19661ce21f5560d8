pub mod download;
pub mod jobs;
