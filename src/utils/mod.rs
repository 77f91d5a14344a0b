pub mod batch_utils;
