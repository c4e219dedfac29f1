use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;

/// Layout of raw 16-bit PCM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

/// Reinterpret little-endian bytes as signed 16-bit samples, a trailing odd byte is dropped
pub fn pcm_to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Wrap samples in a WAV container
pub fn write_wav(path: &Path, samples: &[i16], format: PcmFormat) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize().context("Failed to finalize WAV file")?;

    Ok(())
}

/// Plays synthesized speech through an external command
#[derive(Debug, Clone)]
pub struct AudioPlayer {
    player: Option<String>,
    output_dir: PathBuf,
}

impl AudioPlayer {
    pub fn new(player: Option<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            player,
            output_dir: output_dir.into(),
        }
    }

    /// Write `pcm` as `<name>.wav` and start playing it once.
    ///
    /// Returns as soon as the player is spawned, playback is not awaited.
    pub async fn play(&self, name: &str, pcm: &[u8], format: PcmFormat) -> anyhow::Result<PathBuf> {
        let path = self.render(name, pcm, format)?;

        let Some(player) = &self.player else {
            tracing::warn!("No audio player configured, audio left at {:?}", path);
            return Ok(path);
        };

        let mut child = Command::new(player)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start audio player '{player}'"))?;

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    tracing::warn!("Audio player exited with {}", status)
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Audio player failed: {}", e),
            }
        });

        Ok(path)
    }

    /// Write the WAV file without playing it
    pub fn render(&self, name: &str, pcm: &[u8], format: PcmFormat) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(format!("{}.wav", file_stem(name)));
        let samples = pcm_to_samples(pcm);
        write_wav(&path, &samples, format)?;

        tracing::debug!("Wrote {} samples to {:?}", samples.len(), path);
        Ok(path)
    }
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();

    if stem.is_empty() {
        "speech".to_string()
    } else {
        stem
    }
}
