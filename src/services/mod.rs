pub mod google_translate_service;
pub mod http_transport;
pub mod response_parser;
pub mod tesseract_service;
