pub mod candidate_dto;
pub mod comment_dto;
