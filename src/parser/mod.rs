mod csv_input;

pub use csv_input::*;
