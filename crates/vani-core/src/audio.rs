//! Audio container detection ahead of speech recognition.

use crate::error::TranscribeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    WebM,
    Ogg,
    Mp3,
    Flac,
    Mp4,
}

impl AudioFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::WebM => "webm",
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Mp4 => "m4a",
        }
    }

    /// Identify the container from its leading bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => Some(Self::Wav),
            [0x1A, 0x45, 0xDF, 0xA3, ..] => Some(Self::WebM),
            [b'O', b'g', b'g', b'S', ..] => Some(Self::Ogg),
            [b'f', b'L', b'a', b'C', ..] => Some(Self::Flac),
            [b'I', b'D', b'3', ..] => Some(Self::Mp3),
            [0xFF, b, ..] if b & 0xE0 == 0xE0 => Some(Self::Mp3),
            [_, _, _, _, b'f', b't', b'y', b'p', ..] => Some(Self::Mp4),
            _ => None,
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Audio accepted for recognition.
#[derive(Debug, Clone)]
pub struct PreparedAudio {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

impl PreparedAudio {
    /// Upload filename carrying an extension the recognizer can trust.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("audio.{}", self.format.extension())
    }
}

/// Converts uploaded audio into something the recognizer accepts.
///
/// Failures are fatal to the request; callers must not retry.
pub trait AudioTranscoder: Send + Sync {
    /// # Errors
    ///
    /// Returns [`TranscribeError::UnsupportedFormat`] for empty, corrupt or
    /// unrecognised input.
    fn prepare(&self, bytes: Vec<u8>) -> Result<PreparedAudio, TranscribeError>;
}

/// Accepts known containers unchanged and leaves decoding to the recognizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerSniffer;

impl AudioTranscoder for ContainerSniffer {
    fn prepare(&self, bytes: Vec<u8>) -> Result<PreparedAudio, TranscribeError> {
        if bytes.is_empty() {
            return Err(TranscribeError::UnsupportedFormat("empty audio".into()));
        }
        let format = AudioFormat::sniff(&bytes).ok_or_else(|| {
            TranscribeError::UnsupportedFormat("unrecognised audio container".into())
        })?;
        tracing::debug!(%format, size = bytes.len(), "audio accepted");
        Ok(PreparedAudio { bytes, format })
    }
}
