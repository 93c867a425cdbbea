use crate::error::{Error, Result};
use crate::output_type::OutputType;

/// Options that control how a recording is transformed and rendered.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The CLI is responsible for mapping user input into this type so
/// that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// Quantization interval in milliseconds; blocks starting in the same
    /// interval bucket are merged. `None` disables quantization.
    pub interval_ms: Option<i64>,

    /// Soft break: split blocks on the first clause-ending word after this
    /// many accumulated characters.
    pub soft_break_chars: Option<usize>,

    /// Hard break: split blocks unconditionally at this many characters.
    pub hard_break_chars: Option<usize>,

    /// Break apart words with inline hyphen runs.
    pub split_hyphens: bool,

    /// Join words carrying trailing continuation hyphens.
    pub join_hyphens: bool,

    /// Ordered search/replace pairs applied to every word.
    pub replacements: Vec<(String, String)>,

    /// Shift all word timing by this many milliseconds (may be negative).
    pub timeshift_ms: Option<i64>,

    /// The desired rendering format.
    pub output_type: OutputType,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            interval_ms: None,
            soft_break_chars: None,
            hard_break_chars: None,
            split_hyphens: false,
            join_hyphens: false,
            replacements: Vec::new(),
            timeshift_ms: None,
            output_type: OutputType::Transcript,
        }
    }
}

impl Opts {
    /// Check the numeric knobs up front so the pipeline can assume them valid.
    ///
    /// Timeshift deliberately accepts any integer, including negatives.
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(interval_ms) = self.interval_ms {
            if interval_ms <= 0 {
                return Err(Error::msg(format!(
                    "quantization interval must be positive, got {interval_ms}ms"
                )));
            }
        }
        if self.soft_break_chars == Some(0) {
            return Err(Error::msg("soft break limit must be positive"));
        }
        if self.hard_break_chars == Some(0) {
            return Err(Error::msg("hard break limit must be positive"));
        }
        Ok(())
    }
}
