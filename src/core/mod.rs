pub mod etl;
pub mod layout;
pub mod operations;
pub mod pipeline;
pub mod tokenizer;
pub mod validator;
pub mod workspace;

pub use crate::domain::model::{Dataset, FieldValue, Record, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
