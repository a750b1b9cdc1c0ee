use thiserror::Error;

/// Domain-specific errors for the scheduler.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode '{path}' with any of the candidate encodings (utf-8-sig, utf-8, cp1252)")]
    EncodingExhausted { path: String },

    #[error("Failed to parse CSV row in '{file}': {message}")]
    CsvParse { file: String, message: String },

    #[error("Required input file '{path}' is missing")]
    MissingRequiredInput { path: String },

    #[error("No data found in '{path}'")]
    EmptyCatalog { path: String },

    #[error("Unable to save workbook after {attempts} attempts: all candidate filenames are locked")]
    WorkbookLocked { attempts: u32 },
}

/// Use anyhow::Result at application boundaries, the way the teacher does.
pub type Result<T> = anyhow::Result<T>;
