use super::dto::JobResponse;
use crate::common::error::AppError;
use crate::infrastructure::transcode::ffmpeg::EngineArgs;
use crate::state::AppState;
use tracing::info;

/// Container formats that keep a video stream on plain conversion; any other
/// target gets the bitrate applied to its audio stream instead.
const VIDEO_CONTAINERS: [&str; 4] = ["mp4", "mov", "avi", "mkv"];

pub struct JobService;

impl JobService {
    pub async fn convert(
        state: AppState,
        filename: &str,
        data: &[u8],
        format: &str,
        bitrate: &str,
    ) -> Result<JobResponse, AppError> {
        Self::run_job(state, filename, data, format, convert_args(format, bitrate)).await
    }

    pub async fn extract_audio(
        state: AppState,
        filename: &str,
        data: &[u8],
        format: &str,
    ) -> Result<JobResponse, AppError> {
        Self::run_job(state, filename, data, format, extract_audio_args()).await
    }

    pub async fn extract_video(
        state: AppState,
        filename: &str,
        data: &[u8],
        format: &str,
    ) -> Result<JobResponse, AppError> {
        Self::run_job(state, filename, data, format, extract_video_args()).await
    }

    pub async fn thumbnail(
        state: AppState,
        filename: &str,
        data: &[u8],
        time: &str,
    ) -> Result<JobResponse, AppError> {
        // Thumbnails are always a single jpg still.
        Self::run_job(state, filename, data, "jpg", thumbnail_args(time)).await
    }

    async fn run_job(
        state: AppState,
        filename: &str,
        data: &[u8],
        format: &str,
        args: EngineArgs,
    ) -> Result<JobResponse, AppError> {
        let input = state.storage.stage(filename, data)?;
        let (artifact, output) = state.storage.allocate_output(format);

        state.transcoder.run(&input, &args, &output).await?;

        // The engine is trusted to have written the file, but the outbound
        // lookup stays the final authority before success is reported.
        if state.storage.resolve_output(&artifact).is_none() {
            return Err(AppError::Transcode(
                "Engine reported success but produced no output".to_string(),
            ));
        }

        info!("✅ {} -> {}", filename, artifact);
        Ok(JobResponse::success(artifact))
    }
}

/// Format stays unvalidated on purpose: the engine is the final arbiter of
/// whether it is supported, and its failure surfaces as a transcode error.
fn convert_args(format: &str, bitrate: &str) -> EngineArgs {
    let bitrate_flag = if VIDEO_CONTAINERS.contains(&format) {
        "-b:v"
    } else {
        "-b:a"
    };
    EngineArgs {
        pre_output: vec![bitrate_flag.to_string(), bitrate.to_string()],
        ..EngineArgs::default()
    }
}

fn extract_audio_args() -> EngineArgs {
    EngineArgs {
        pre_output: vec!["-vn".to_string()],
        ..EngineArgs::default()
    }
}

fn extract_video_args() -> EngineArgs {
    EngineArgs {
        pre_output: vec!["-an".to_string()],
        ..EngineArgs::default()
    }
}

/// Seek happens before decoding, then exactly one frame is captured.
fn thumbnail_args(time: &str) -> EngineArgs {
    EngineArgs {
        pre_input: vec!["-ss".to_string(), time.to_string()],
        pre_output: vec!["-vframes".to_string(), "1".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_maps_video_containers_to_video_bitrate() {
        for format in ["mp4", "mov", "avi", "mkv"] {
            let args = convert_args(format, "2M");
            assert_eq!(args.pre_output, vec!["-b:v", "2M"]);
            assert!(args.pre_input.is_empty());
        }
    }

    #[test]
    fn convert_maps_other_formats_to_audio_bitrate() {
        for format in ["mp3", "wav", "flac", "webm", "bogus"] {
            let args = convert_args(format, "1M");
            assert_eq!(args.pre_output, vec!["-b:a", "1M"]);
        }
    }

    #[test]
    fn extraction_disables_the_other_stream() {
        assert_eq!(extract_audio_args().pre_output, vec!["-vn"]);
        assert_eq!(extract_video_args().pre_output, vec!["-an"]);
    }

    #[test]
    fn thumbnail_seeks_before_input_and_captures_one_frame() {
        let args = thumbnail_args("00:01:30");
        assert_eq!(args.pre_input, vec!["-ss", "00:01:30"]);
        assert_eq!(args.pre_output, vec!["-vframes", "1"]);
    }
}
