pub mod outcome;
pub mod text;
