pub mod access_service;
pub mod ai_config_service;
pub mod application_service;
pub mod document_service;
pub mod email_service;
pub mod export_service;
pub mod home_content_service;
pub mod integration_service;
pub mod interview_service;
pub mod matching_service;
pub mod position_service;
pub mod ring_ai_service;
pub mod selected_candidate_service;
