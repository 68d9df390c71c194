pub mod cli;
pub mod error;
pub mod output;
pub mod run;
pub mod templates;

pub use templates::{load_templates, parse_templates, TemplateId, TemplateRecord};
