pub mod config;
pub mod google_translate_response;
pub mod one_or_many;
pub mod translation;
