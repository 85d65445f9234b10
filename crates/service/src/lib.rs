//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates query composition from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Projects joined entities into read-model views for API responses.

pub mod errors;

pub mod department_service;
pub mod discipline_service;
pub mod load_service;
pub mod teacher_service;

#[cfg(test)]
pub mod test_support;
