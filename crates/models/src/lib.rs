pub mod db;
pub mod errors;

pub mod degree;
pub mod department;
pub mod discipline;
pub mod load;
pub mod position;
pub mod teacher;
