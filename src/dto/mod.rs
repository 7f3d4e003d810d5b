pub mod access_dto;
pub mod interview_dto;
pub mod position_dto;
pub mod selection_dto;
pub mod settings_dto;
