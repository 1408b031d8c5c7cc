//! Playback scheduling for decoded live-audio chunks.
//!
//! The live session delivers PCM chunks faster than real time. To play them
//! without gaps or overlaps, the player keeps a monotonically advancing
//! "next start" watermark: each chunk is scheduled at
//! `max(now, watermark)` and the watermark advances by the chunk's
//! duration, so successive chunks queue back-to-back. When the model is
//! interrupted, all pending buffers are discarded and the watermark resets
//! so the next chunk starts immediately.

use std::time::Duration;

/// Output sample rate of the live curator's audio, in Hz.
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

/// Input sample rate expected from the microphone, in Hz.
pub const INPUT_SAMPLE_RATE: u32 = 16_000;

/// Duration of a 16-bit mono PCM chunk at the given sample rate.
#[must_use]
pub fn pcm16_duration(byte_len: usize, sample_rate: u32) -> Duration {
    let samples = byte_len as u64 / 2;
    Duration::from_nanos(samples.saturating_mul(1_000_000_000) / u64::from(sample_rate.max(1)))
}

/// The next-start watermark for gapless chunk playback.
///
/// Times are offsets on the player's own clock (`now` is whatever clock the
/// caller uses, as long as it is monotonic).
#[derive(Debug, Clone, Default)]
pub struct PlaybackScheduler {
    next_start: Duration,
}

impl PlaybackScheduler {
    /// A scheduler with the watermark at the clock origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a chunk of `chunk_duration` at time `now`.
    ///
    /// Returns the start offset for the chunk: `now` if the queue has
    /// drained, otherwise the end of the previously scheduled chunk.
    pub fn schedule(&mut self, now: Duration, chunk_duration: Duration) -> Duration {
        let start = now.max(self.next_start);
        self.next_start = start + chunk_duration;
        start
    }

    /// Handle an interruption: pending buffers are being discarded, so the
    /// next chunk must start immediately rather than after them.
    pub fn interrupt(&mut self) {
        self.next_start = Duration::ZERO;
    }

    /// The current watermark (end of the last scheduled chunk).
    #[must_use]
    pub const fn watermark(&self) -> Duration {
        self.next_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_chunks_queue_back_to_back() {
        let mut scheduler = PlaybackScheduler::new();
        let now = Duration::from_millis(1000);
        let d1 = Duration::from_millis(240);
        let d2 = Duration::from_millis(180);

        let s1 = scheduler.schedule(now, d1);
        // Second chunk arrives while the first is still playing.
        let s2 = scheduler.schedule(now + Duration::from_millis(50), d2);

        assert_eq!(s1, now);
        assert_eq!(s2, s1 + d1);
        assert_eq!(scheduler.watermark(), s1 + d1 + d2);
    }

    #[test]
    fn test_drained_queue_starts_at_now() {
        let mut scheduler = PlaybackScheduler::new();
        let s1 = scheduler.schedule(Duration::from_secs(1), Duration::from_millis(100));
        assert_eq!(s1, Duration::from_secs(1));

        // Next chunk arrives long after the first finished playing.
        let later = Duration::from_secs(5);
        let s2 = scheduler.schedule(later, Duration::from_millis(100));
        assert_eq!(s2, later);
    }

    #[test]
    fn test_interrupt_resets_watermark_to_now() {
        let mut scheduler = PlaybackScheduler::new();
        let now = Duration::from_secs(2);
        scheduler.schedule(now, Duration::from_secs(10));
        assert!(scheduler.watermark() > now);

        scheduler.interrupt();

        let resume = now + Duration::from_millis(1);
        let start = scheduler.schedule(resume, Duration::from_millis(100));
        assert_eq!(start, resume);
    }

    #[test]
    fn test_pcm16_duration() {
        // 24000 Hz, 16-bit mono: 48000 bytes per second.
        assert_eq!(
            pcm16_duration(48_000, OUTPUT_SAMPLE_RATE),
            Duration::from_secs(1)
        );
        assert_eq!(
            pcm16_duration(4_800, OUTPUT_SAMPLE_RATE),
            Duration::from_millis(100)
        );
        assert_eq!(pcm16_duration(0, OUTPUT_SAMPLE_RATE), Duration::ZERO);
    }
}
