pub mod importer;
pub mod lines;
