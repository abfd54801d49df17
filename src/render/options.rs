//! PDF output options.

/// Default `/Producer` written into the document information dictionary.
pub const DEFAULT_PRODUCER: &str = "arxiu";

/// Options for serializing pages to PDF.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Flate-compress page content streams
    pub compress: bool,

    /// Write a document information dictionary (title and producer)
    pub include_info: bool,

    /// Producer recorded in the information dictionary
    pub producer: String,
}

impl PdfOptions {
    /// Create new PDF options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Enable or disable the information dictionary.
    pub fn with_info(mut self, include: bool) -> Self {
        self.include_info = include;
        self
    }

    /// Set the producer name.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            compress: false,
            include_info: false,
            producer: DEFAULT_PRODUCER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_options_builder() {
        let options = PdfOptions::new()
            .with_compression(true)
            .with_info(true)
            .with_producer("tests");
        assert!(options.compress);
        assert!(options.include_info);
        assert_eq!(options.producer, "tests");
    }

    #[test]
    fn test_defaults_are_plain() {
        let options = PdfOptions::default();
        assert!(!options.compress);
        assert!(!options.include_info);
        assert_eq!(options.producer, DEFAULT_PRODUCER);
    }
}
