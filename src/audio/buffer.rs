//! In-memory PCM audio

/// Decoded audio as interleaved signed 16-bit samples
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl PcmBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        let channels = channels.max(1);
        // Drop a trailing partial frame
        let mut samples = samples;
        samples.truncate(samples.len() - samples.len() % channels as usize);
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample frames (one sample per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames() as u64 * 1000 / self.sample_rate as u64
    }

    fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = ms as u128 * self.sample_rate as u128 / 1000;
        (frame.min(self.frames() as u128)) as usize
    }

    /// Interleaved samples between `start_ms` and `end_ms`, clamped to the
    /// buffer. An inverted or out-of-range window yields an empty slice.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> &[i16] {
        let start = self.frame_at_ms(start_ms);
        let end = self.frame_at_ms(end_ms);
        if end <= start {
            return &[];
        }
        let ch = self.channels as usize;
        &self.samples[start * ch..end * ch]
    }

    /// Down-mix to mono `f32` in `[-1, 1]`
    pub fn to_mono_f32(&self) -> Vec<f32> {
        let ch = self.channels as usize;
        self.samples
            .chunks_exact(ch)
            .map(|frame| {
                let sum: f32 = frame.iter().map(|&s| s as f32 / 32768.0).sum();
                sum / ch as f32
            })
            .collect()
    }
}
