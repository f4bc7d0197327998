use crate::error::{Result, ShamirError};

/// Processing mode for share evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Evaluate shares one after another
    #[default]
    Sequential,
    /// Evaluate shares on the rayon thread pool
    Parallel,
}

/// Configuration options for splitting
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Processing mode
    pub mode: SplitMode,
    /// Upper bound on secret length in bytes, `None` for unlimited
    pub max_secret_len: Option<usize>,
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the processing mode
    pub fn with_mode(mut self, mode: SplitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Limits the length of secrets accepted by `split`
    pub fn with_max_secret_len(mut self, max: usize) -> Result<Self> {
        if max == 0 {
            return Err(ShamirError::InvalidConfig(
                "Maximum secret length cannot be zero".into(),
            ));
        }
        self.max_secret_len = Some(max);
        Ok(self)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_secret_len == Some(0) {
            return Err(ShamirError::InvalidConfig(
                "Maximum secret length cannot be zero".into(),
            ));
        }

        Ok(())
    }

    /// Rejects secrets longer than the configured limit
    pub(crate) fn check_secret_len(&self, len: usize) -> Result<()> {
        match self.max_secret_len {
            Some(max) if len > max => Err(ShamirError::SecretTooLong { len, max }),
            _ => Ok(()),
        }
    }
}
