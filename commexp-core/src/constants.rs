//! Constants and row labels for experiment result analysis

/// Flag sentinel placed by a flagging decoder on positions it considers suspect
pub const FLAG_SENTINEL: char = '_';

/// Largest cursor shift tried when realigning a message variant after a divergence
/// Offsets 1..=MAX_RESYNC_OFFSET are checked in ascending order.
pub const MAX_RESYNC_OFFSET: usize = 3;

/// Number of characters that must line up before a shift larger than one is accepted
/// Guards against false realignment in repetitive text.
pub const RESYNC_CONFIRM_LEN: usize = 2;

/// Penalty (in information units) for one undetected wrong character:
/// the correct character is lost and a wrong one is introduced.
pub const WRONG_CHAR_PENALTY: i64 = 2;

/// Labels of the result table rows, in presentation order
pub mod labels {
    /// Name of the information source used for the experiment
    pub const INFORMATION_SOURCE: &str = "Used information source";
    /// Name of the en-/decoder used for the experiment
    pub const EN_DECODER: &str = "Used en- / decoder";
    /// Name of the noise source used for the experiment
    pub const NOISE_SOURCE: &str = "Used noise source";

    /// Code-level unit changes
    pub const CHANGES: &str = "Changes in code";
    /// Message-level changed characters
    pub const CHANGED_CHARS: &str = "Changed characters";
    /// Corrected characters (including mistaken corrections)
    pub const CORRECTED_CHARS: &str = "Corrected characters";
    /// Corrections applied to unchanged characters
    pub const MISTAKENLY_CORRECTED_CHARS: &str = "Mistakenly corrected characters";
    /// Flagged characters (including mistaken flags)
    pub const FLAGGED_CHARS: &str = "Flagged characters";
    /// Flags placed on unchanged characters
    pub const MISTAKENLY_FLAGGED_CHARS: &str = "Mistakenly flagged characters";
    /// Information content of the original message
    pub const INFORMATION: &str = "Information original";
    /// Information left in the changed message
    pub const INFORMATION_WITHOUT_CODING: &str = "Inf. result without coding";
    /// Information left in the corrected message
    pub const INFORMATION_WITH_CODING_CORRECTED: &str = "Inf. result with coding (corrected)";
    /// Information left in the corrected and flagged message
    pub const INFORMATION_WITH_CODING_FLAGGED: &str =
        "Inf. result with coding (corrected & flagged)";

    /// Raw encoded stream before noise
    pub const ORIGINAL_CODE: &str = "original encoded code";
    /// Raw encoded stream after noise
    pub const CHANGED_CODE: &str = "changed encoded code";
    /// Raw original message
    pub const ORIGINAL_MESSAGE: &str = "original message";
    /// Raw changed message
    pub const CHANGED_MESSAGE: &str = "changed message";
    /// Raw corrected message
    pub const CORRECTED_MESSAGE: &str = "corrected message";
    /// Raw corrected and flagged message
    pub const CORRECTED_FLAGGED_MESSAGE: &str = "corrected and flagged message";
}
