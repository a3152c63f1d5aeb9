pub mod calendar;
pub mod compare;
pub mod nlq;
pub mod ranges;
