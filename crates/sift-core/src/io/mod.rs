pub mod read_csv;

pub use read_csv::read_csv_file;
