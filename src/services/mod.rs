pub mod catalog;
pub mod scheduling;
pub mod seating;
