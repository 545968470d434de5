pub mod reader;
pub mod references;
pub mod repository;
pub mod transitions;
pub mod validator;

pub use crate::domain::model::{Entity, Record, ValidatedEntity};
pub use crate::domain::ports::{ConfigProvider, ReferenceResolver, Storage};
pub use crate::utils::error::Result;
