//! Data module - equipment rows, summary statistics and CSV loading

mod loader;
mod record;
mod summarizer;
mod summary;

pub use loader::{load_summary, DataLoader};
pub use record::EquipmentRecord;
pub use summarizer::Summarizer;
pub use summary::{Parameter, Summary, TypeDistribution};
