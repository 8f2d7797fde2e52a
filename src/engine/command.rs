//! Per-stage ffmpeg command construction

use std::path::Path;

use crate::domain::model::{Invocation, MediaKind};
use crate::engine::{resolve_video_codec, EngineConfig};
use crate::planner::{CodecDecision, Stage};

/// Builds `ffmpeg -i <input> <stage args> <codec args> [-threads n] -y <output>`
pub struct CommandBuilder<'a> {
    config: &'a EngineConfig,
    kind: MediaKind,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a EngineConfig, kind: MediaKind) -> Self {
        Self { config, kind }
    }

    /// Decide copy vs re-encode for `stage`, given the stage that follows it
    ///
    /// A trim-only stage stream-copies unless it is the last stage, where a
    /// re-encode guarantees a cleanly muxed result. Every other stage re-encodes.
    pub fn codec_decision(&self, stage: &Stage, next: Option<&Stage>) -> CodecDecision {
        if !stage.is_trim_only() {
            return self.reencode();
        }
        match next {
            Some(_) => CodecDecision::Copy,
            None => self.reencode(),
        }
    }

    fn reencode(&self) -> CodecDecision {
        let video = match self.kind {
            MediaKind::Video => Some(resolve_video_codec(&self.config.video_codec).to_string()),
            MediaKind::Audio => None,
        };
        CodecDecision::Reencode {
            video,
            audio: self.config.audio_codec.clone(),
        }
    }

    /// Codec directive arguments
    pub fn codec_args(&self, decision: &CodecDecision) -> Vec<String> {
        let mut args = Vec::new();
        match decision {
            CodecDecision::Copy => {
                args.push("-c".to_string());
                args.push("copy".to_string());
            }
            CodecDecision::Reencode { video, audio } => {
                if let Some(video) = video {
                    args.push("-c:v".to_string());
                    args.push(video.clone());
                    if let Some(crf) = self.config.crf {
                        args.push("-crf".to_string());
                        args.push(crf.to_string());
                    }
                    if let Some(preset) = &self.config.preset {
                        args.push("-preset".to_string());
                        args.push(preset.clone());
                    }
                }
                if let Some(audio) = audio {
                    args.push("-c:a".to_string());
                    args.push(audio.clone());
                }
            }
        }
        args
    }

    /// Build the invocation for one stage
    pub fn build(
        &self,
        stage: &Stage,
        next: Option<&Stage>,
        input: &Path,
        output: &Path,
    ) -> (Invocation, CodecDecision) {
        let decision = self.codec_decision(stage, next);

        let mut invocation = Invocation::new(self.config.ffmpeg_path.as_str())
            .arg("-i")
            .arg(input.to_string_lossy())
            .args(stage.args())
            .args(self.codec_args(&decision));

        if let Some(threads) = self.config.effective_threads() {
            invocation = invocation.arg("-threads").arg(threads.to_string());
        }

        let invocation = invocation.arg("-y").arg(output.to_string_lossy());
        (invocation, decision)
    }
}
