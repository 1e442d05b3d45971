pub mod assignment;
pub mod geocoding;
pub mod keywords;
pub mod places;
pub mod recommendation;
pub mod retry;
