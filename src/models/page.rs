//! Page selection for list endpoints

use super::ValidationError;

/// A 1-based page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Default page size when the client does not send one
    pub const DEFAULT_SIZE: u32 = 50;
    /// Largest accepted page size
    pub const MAX_SIZE: u32 = 200;

    /// Create a page, checking `number >= 1` and `1 <= size <= MAX_SIZE`
    pub fn new(number: u32, size: u32) -> Result<Self, ValidationError> {
        if number == 0 {
            return Err(ValidationError::PageNumber);
        }
        if size == 0 || size > Self::MAX_SIZE {
            return Err(ValidationError::PageSize {
                got: i64::from(size),
                max: Self::MAX_SIZE,
            });
        }
        Ok(Self { number, size })
    }

    /// Page number, starting at 1
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Maximum number of items on this page
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Number of items preceding this page
    #[must_use]
    pub fn offset(self) -> usize {
        let skipped = u64::from(self.number - 1) * u64::from(self.size);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Maximum item count as `usize`
    #[must_use]
    pub fn limit(self) -> usize {
        self.size as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: Self::DEFAULT_SIZE,
        }
    }
}
