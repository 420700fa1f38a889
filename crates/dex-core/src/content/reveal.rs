//! Typewriter reveal of slot text

use std::iter;
use std::time::Duration;

use serde::{Serialize, Deserialize};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use unicode_segmentation::UnicodeSegmentation;

/// Unit of text appended per reveal frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealUnit {
    /// One Unicode scalar value per frame
    #[default]
    Char,
    /// One extended grapheme cluster per frame
    Grapheme,
}

/// Snapshot of a reveal in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    /// The first `cursor` units of the target text
    pub text: String,
    pub cursor: usize,
    /// Number of units in the target text
    pub total: usize,
}

impl RevealState {
    pub fn is_complete(&self) -> bool {
        self.cursor == self.total
    }
}

/// Stops a running reveal
#[derive(Debug, Clone)]
pub struct RevealHandle {
    token: CancellationToken,
}

impl RevealHandle {
    /// Stop emission. A frame wait already in progress ends without emitting.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Lazy, time-paced sequence of reveal states.
///
/// Emits one state per cursor position from 0 to the text length inclusive.
/// The first state is immediate and each later one follows the previous by
/// the frame interval. Nothing runs between calls to [`next`](Self::next), so
/// no timer outlives the consumer.
pub struct RevealSequence {
    text: String,
    /// Byte offset of every cursor position, `0..=total`
    boundaries: Vec<usize>,
    cursor: usize,
    interval: Duration,
    next_frame: Option<Instant>,
    token: CancellationToken,
}

impl RevealSequence {
    /// Wait for and return the next state, or `None` once finished or cancelled
    pub async fn next(&mut self) -> Option<RevealState> {
        if self.token.is_cancelled() || self.cursor >= self.boundaries.len() {
            return None;
        }

        if let Some(deadline) = self.next_frame {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => return None,
                _ = tokio::time::sleep_until(deadline) => {}
            }
        }

        let state = RevealState {
            text: self.text[..self.boundaries[self.cursor]].to_string(),
            cursor: self.cursor,
            total: self.total(),
        };
        self.cursor += 1;
        self.next_frame = Some(Instant::now() + self.interval);
        Some(state)
    }

    pub fn total(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_finished(&self) -> bool {
        self.token.is_cancelled() || self.cursor >= self.boundaries.len()
    }
}

/// Builds reveal sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct TypewriterRevealer {
    unit: RevealUnit,
}

impl TypewriterRevealer {
    pub fn new(unit: RevealUnit) -> Self {
        Self { unit }
    }

    /// Animate `text` one unit per `interval`
    pub fn play(&self, text: &str, interval: Duration) -> (RevealSequence, RevealHandle) {
        let boundaries: Vec<usize> = match self.unit {
            RevealUnit::Char => text
                .char_indices()
                .map(|(offset, _)| offset)
                .chain(iter::once(text.len()))
                .collect(),
            RevealUnit::Grapheme => text
                .grapheme_indices(true)
                .map(|(offset, _)| offset)
                .chain(iter::once(text.len()))
                .collect(),
        };

        let token = CancellationToken::new();
        let sequence = RevealSequence {
            text: text.to_string(),
            boundaries,
            cursor: 0,
            interval,
            next_frame: None,
            token: token.clone(),
        };

        (sequence, RevealHandle { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(25);

    #[tokio::test(start_paused = true)]
    async fn test_emits_every_prefix() {
        let (mut sequence, _handle) = TypewriterRevealer::default().play("Bulbasaur", FRAME);

        let mut states = Vec::new();
        let mut stamps = Vec::new();
        while let Some(state) = sequence.next().await {
            stamps.push(Instant::now());
            states.push(state);
        }

        assert_eq!(states.len(), 10);
        for (i, state) in states.iter().enumerate() {
            assert_eq!(state.cursor, i);
            assert_eq!(state.text, &"Bulbasaur"[..i]);
        }
        assert!(states[9].is_complete());
        for pair in stamps.windows(2) {
            assert_eq!(pair[1] - pair[0], FRAME);
        }
        assert!(sequence.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_emission() {
        let (mut sequence, handle) = TypewriterRevealer::default().play("Bulbasaur", FRAME);

        for _ in 0..3 {
            assert!(sequence.next().await.is_some());
        }
        handle.cancel();

        let started = Instant::now();
        assert!(sequence.next().await.is_none());
        assert_eq!(Instant::now(), started);
        assert!(sequence.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_frame_wait() {
        let (mut sequence, handle) = TypewriterRevealer::default().play("Ivysaur", FRAME);
        assert!(sequence.next().await.is_some());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        });

        assert!(sequence.next().await.is_none());
        canceller.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text() {
        let (mut sequence, _handle) = TypewriterRevealer::default().play("", FRAME);
        let state = sequence.next().await.unwrap();
        assert_eq!(state.text, "");
        assert!(state.is_complete());
        assert!(sequence.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_multibyte_units() {
        let text = "Flabe\u{301}be\u{301}";

        let (chars, _) = TypewriterRevealer::new(RevealUnit::Char).play(text, FRAME);
        assert_eq!(chars.total(), 9);

        let (mut graphemes, _) = TypewriterRevealer::new(RevealUnit::Grapheme).play(text, FRAME);
        assert_eq!(graphemes.total(), 7);

        let mut last = None;
        while let Some(state) = graphemes.next().await {
            last = Some(state);
        }
        assert_eq!(last.unwrap().text, text);
    }
}
