//! Core types for communication experiment runs

use crate::error::AnalysisError;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// The six text streams one experiment run produces
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunInput {
    /// Message emitted by the information source
    pub original_message: String,

    /// Encoded form of the original message, before noise
    pub original_code: String,

    /// Encoded form after the noise source touched it
    pub changed_code: String,

    /// Decoded noisy message, no correction applied
    pub changed_message: String,

    /// Decoded message with correction applied
    pub corrected_message: String,

    /// Decoded message with correction applied and suspect positions flagged
    pub corrected_flagged_message: String,
}

impl RunInput {
    /// Create a run from its six streams
    pub fn new(
        original_message: impl Into<String>,
        original_code: impl Into<String>,
        changed_code: impl Into<String>,
        changed_message: impl Into<String>,
        corrected_message: impl Into<String>,
        corrected_flagged_message: impl Into<String>,
    ) -> Self {
        Self {
            original_message: original_message.into(),
            original_code: original_code.into(),
            changed_code: changed_code.into(),
            changed_message: changed_message.into(),
            corrected_message: corrected_message.into(),
            corrected_flagged_message: corrected_flagged_message.into(),
        }
    }

    /// Create a run without encoded streams (code-level tally stays zero)
    pub fn from_messages(
        original: impl Into<String>,
        changed: impl Into<String>,
        corrected: impl Into<String>,
        corrected_flagged: impl Into<String>,
    ) -> Self {
        Self::new(original, "", "", changed, corrected, corrected_flagged)
    }

    /// Check that every message variant is non-empty
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let messages = [
            (StreamKind::Original, &self.original_message),
            (StreamKind::Changed, &self.changed_message),
            (StreamKind::Corrected, &self.corrected_message),
            (StreamKind::CorrectedFlagged, &self.corrected_flagged_message),
        ];

        for (kind, message) in messages {
            if message.is_empty() {
                return Err(AnalysisError::EmptyMessage(kind));
            }
        }

        Ok(())
    }
}

/// Identifies one of the message variants of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamKind {
    /// Original message
    Original,
    /// Changed (noisy) message
    Changed,
    /// Corrected message
    Corrected,
    /// Corrected and flagged message
    CorrectedFlagged,
}

impl StreamKind {
    /// The three variants that are realigned against the original
    pub const DOWNSTREAM: [StreamKind; 3] = [
        StreamKind::Changed,
        StreamKind::Corrected,
        StreamKind::CorrectedFlagged,
    ];

    /// Human-readable stream name
    pub const fn name(&self) -> &'static str {
        match self {
            StreamKind::Original => "original message",
            StreamKind::Changed => "changed message",
            StreamKind::Corrected => "corrected message",
            StreamKind::CorrectedFlagged => "corrected flagged message",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category of an experiment element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Produces the original message
    InformationSource,
    /// Encodes, decodes, corrects and flags
    EnDecoder,
    /// Corrupts the encoded stream
    NoiseSource,
}

/// A selectable building block of an experiment
///
/// Indices only have to be unique inside their own kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentElement {
    /// Element category
    pub kind: ElementKind,

    /// Display name, passed through into the result table
    pub name: String,

    /// Data type or structure the element hands on
    #[serde(default)]
    pub protocol: String,

    /// Index inside the element's category
    #[serde(default)]
    pub index: u8,
}

impl ExperimentElement {
    /// Create a new element
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            protocol: String::new(),
            index: 0,
        }
    }

    /// Set the protocol identifier
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the index inside the category
    pub fn index(mut self, index: u8) -> Self {
        self.index = index;
        self
    }
}

/// The elements selected for one experiment configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSetup {
    /// Selected information source
    pub information_source: ExperimentElement,

    /// Selected en-/decoder
    pub en_decoder: ExperimentElement,

    /// Selected noise source
    pub noise_source: ExperimentElement,
}

impl ExperimentSetup {
    /// Build a setup from the three element names
    pub fn named(
        information_source: impl Into<String>,
        en_decoder: impl Into<String>,
        noise_source: impl Into<String>,
    ) -> Self {
        Self {
            information_source: ExperimentElement::new(
                ElementKind::InformationSource,
                information_source,
            ),
            en_decoder: ExperimentElement::new(ElementKind::EnDecoder, en_decoder),
            noise_source: ExperimentElement::new(ElementKind::NoiseSource, noise_source),
        }
    }

    /// Check that every element sits in the slot of its own kind
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let slots = [
            (ElementKind::InformationSource, &self.information_source),
            (ElementKind::EnDecoder, &self.en_decoder),
            (ElementKind::NoiseSource, &self.noise_source),
        ];

        for (expected, element) in slots {
            if element.kind != expected {
                return Err(AnalysisError::InvalidConfig(alloc::format!(
                    "element '{}' is a {:?}, expected {:?}",
                    element.name, element.kind, expected
                )));
            }
        }

        Ok(())
    }
}

/// One (label, value) row of the result table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Row description
    pub label: String,

    /// Row value, already formatted
    pub value: String,
}

impl ResultRow {
    /// Create a new row
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
