/// The supported output formats for rendered transcripts.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of output formats
///   across the CLI and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps format
///   selection explicit and discoverable.
///
/// Integration notes:
/// - `ValueEnum` (under the `cli` feature) allows this enum to be used
///   directly as a CLI flag with `clap`.
/// - Each variant maps to a concrete `BlockEncoder` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Plain space-joined text, no timing.
    #[cfg_attr(feature = "cli", value(name = "txt"))]
    Text,

    /// One `M:SS<TAB>text` line per block.
    Transcript,

    /// SubRip subtitle format.
    Srt,

    /// WebVTT subtitle format.
    Vtt,
}
