pub mod dataset;
pub mod rows;
pub mod scale;
pub mod tick_format;
