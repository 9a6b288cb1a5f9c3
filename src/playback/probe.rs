//! Container metadata lookup through `ffprobe`.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::MediaError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Seconds.
    pub duration: f64,
}

#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<VideoInfo, MediaError>;
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct FfprobeProbe;

impl FfprobeProbe {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    async fn probe(&self, path: &Path) -> Result<VideoInfo, MediaError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        let ffprobe = which::which("ffprobe").map_err(|_| MediaError::ProbeNotFound)?;

        let output = Command::new(ffprobe)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(MediaError::ProbeFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let info = parse_probe_output(&output.stdout, path)?;
        debug!(
            "Probed {}: {}x{}, {:.2}s",
            path.display(),
            info.width,
            info.height,
            info.duration
        );
        Ok(info)
    }
}

fn parse_probe_output(stdout: &[u8], path: &Path) -> Result<VideoInfo, MediaError> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::NoVideoStream(path.to_path_buf()))?;

    // Containers usually carry the duration; fall back to the stream's.
    let duration = probe
        .format
        .duration
        .as_deref()
        .or(stream.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(VideoInfo {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_video_stream() {
        let json = br#"{
            "format": {"duration": "93.400000"},
            "streams": [
                {"codec_type": "audio"},
                {"codec_type": "video", "width": 3840, "height": 2160}
            ]
        }"#;
        let info = parse_probe_output(json, Path::new("drone.mp4")).unwrap();
        assert_eq!(
            info,
            VideoInfo {
                width: 3840,
                height: 2160,
                duration: 93.4
            }
        );
    }

    #[test]
    fn falls_back_to_stream_duration() {
        let json = br#"{
            "format": {},
            "streams": [{"codec_type": "video", "width": 640, "height": 480, "duration": "12.5"}]
        }"#;
        let info = parse_probe_output(json, Path::new("drone.mkv")).unwrap();
        assert_eq!(info.duration, 12.5);
    }

    #[test]
    fn audio_only_file_is_rejected() {
        let json = br#"{"format": {}, "streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            parse_probe_output(json, Path::new("track.m4a")),
            Err(MediaError::NoVideoStream(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let result = FfprobeProbe::new()
            .probe(Path::new("/definitely/not/here.mp4"))
            .await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn existing_file_gets_past_the_existence_check() {
        let file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        let result = FfprobeProbe::new().probe(file.path()).await;
        assert!(!matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
