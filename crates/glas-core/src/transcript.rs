//! Transcript buffer owned by a session controller.

/// Final transcript (append-only until reset), the latest interim
/// transcript, and the confidence of the last final chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptAccumulator {
    final_text: String,
    interim_text: String,
    confidence: f32,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized chunk and record its confidence.
    pub fn append_final(&mut self, text: &str, confidence: f32) {
        self.final_text.push_str(text);
        self.confidence = confidence;
    }

    /// Replace the interim transcript wholesale.
    pub fn replace_interim(&mut self, text: &str) {
        self.interim_text.clear();
        self.interim_text.push_str(text);
    }

    pub fn clear_interim(&mut self) {
        self.interim_text.clear();
    }

    /// Clear everything.
    pub fn reset(&mut self) {
        self.final_text.clear();
        self.interim_text.clear();
        self.confidence = 0.0;
    }

    pub fn final_text(&self) -> &str {
        &self.final_text
    }

    pub fn interim_text(&self) -> &str {
        &self.interim_text
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}
