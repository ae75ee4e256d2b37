pub mod candidate_service;
pub mod comment_service;
pub mod file_service;
