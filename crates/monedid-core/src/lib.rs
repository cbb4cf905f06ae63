pub mod model;

pub use model::DisplayRecord;
