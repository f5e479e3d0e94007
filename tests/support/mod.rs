//! Scripted doubles for the external collaborators, so turn logic can be
//! driven without any live network dependency.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use valise::error::{OracleError, UpstreamError};
use valise::oracle::{Oracle, OraclePrompt};
use valise::speech::{Synthesizer, Transcriber};
use valise::vision::Captioner;

/// Oracle double that replays queued answers and records every prompt.
pub struct ScriptedOracle {
    script: Mutex<VecDeque<Result<String, OracleError>>>,
    prompts: Mutex<Vec<OraclePrompt>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(answers: &[&str]) -> Self {
        let oracle = Self::new();
        for answer in answers {
            oracle.push_answer(answer);
        }
        oracle
    }

    pub fn push_answer(&self, answer: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(answer.to_string()));
    }

    pub fn push_failure(&self, error: OracleError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_prompts(&self) -> Vec<OraclePrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn ask(&self, prompt: &OraclePrompt) -> Result<String, OracleError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("scripted oracle ran out of answers"))
    }
}

/// Transcriber double returning a fixed utterance.
pub struct FakeTranscriber {
    text: String,
}

impl FakeTranscriber {
    pub fn hearing(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String, UpstreamError> {
        Ok(self.text.clone())
    }
}

pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String, UpstreamError> {
        Err(UpstreamError::Transcription("microphone gremlins".into()))
    }
}

/// Synthesizer double that tags the narration so tests can see what was
/// spoken.
pub struct FakeSynthesizer;

#[async_trait]
impl Synthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, UpstreamError> {
        Ok(format!("audio:{text}").into_bytes())
    }
}

pub struct FailingSynthesizer;

#[async_trait]
impl Synthesizer for FailingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, UpstreamError> {
        Err(UpstreamError::Synthesis("voice offline".into()))
    }
}

pub struct FakeCaptioner {
    caption: String,
}

impl FakeCaptioner {
    pub fn seeing(caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
        }
    }
}

#[async_trait]
impl Captioner for FakeCaptioner {
    async fn describe(&self, _image: &[u8]) -> Result<String, UpstreamError> {
        Ok(self.caption.clone())
    }
}

pub struct FailingCaptioner;

#[async_trait]
impl Captioner for FailingCaptioner {
    async fn describe(&self, _image: &[u8]) -> Result<String, UpstreamError> {
        Err(UpstreamError::Captioning("lens cap on".into()))
    }
}
