pub mod regex;
pub mod same_language;
