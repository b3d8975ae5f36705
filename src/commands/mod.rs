/// `antwalk config`
pub mod config;
/// `antwalk match`
pub mod matches;
/// `antwalk select`
pub mod select;
