// Applicant submissions: multipart intake, file storage and record persistence.

pub mod handlers;
pub mod service;
pub mod storage;
pub mod store;
pub mod upload;
