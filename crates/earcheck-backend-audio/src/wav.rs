//! 16-bit mono WAV export.

use std::path::Path;

use crate::error::AudioResult;

/// Summary of a written recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavSummary {
    /// Number of samples written.
    pub samples: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// BLAKE3 hash of the PCM data (not the full WAV file).
    pub pcm_hash: String,
}

/// Converts f64 samples to 16-bit integers, clipping to [-1, 1].
pub fn samples_to_i16(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16)
        .collect()
}

/// BLAKE3 hash of little-endian 16-bit PCM.
pub fn compute_pcm_hash(pcm: &[i16]) -> String {
    let mut hasher = blake3::Hasher::new();
    for sample in pcm {
        hasher.update(&sample.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Writes mono samples to a 16-bit PCM WAV file.
pub fn write_mono_wav(path: &Path, samples: &[f64], sample_rate: u32) -> AudioResult<WavSummary> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let pcm = samples_to_i16(samples);
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in &pcm {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(WavSummary {
        samples: pcm.len(),
        sample_rate,
        pcm_hash: compute_pcm_hash(&pcm),
    })
}
