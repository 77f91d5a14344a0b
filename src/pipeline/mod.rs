pub mod ocr_translate_pipeline;
