//! Shared fixtures for scenesync-jav integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use scenesync_common::config::SyncConfig;
use scenesync_jav::fetch::{FetchError, RawScene, SceneSource, Sleeper};
use scenesync_jav::types::RemoteId;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// In-memory catalog: scripted responses per scene id
///
/// Unknown ids (or ids whose script ran out) answer 404.
#[derive(Default)]
pub struct FakeCatalog {
    scripts: Mutex<HashMap<String, VecDeque<Result<RawScene, FetchError>>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with this payload
    pub fn with_scene(self, scene_id: &str, data: Value) -> Self {
        let scene: RawScene = serde_json::from_value(data).unwrap();
        self.with_script(scene_id, vec![Ok(scene); 8])
    }

    pub fn with_script(self, scene_id: &str, results: Vec<Result<RawScene, FetchError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(scene_id.to_string(), results.into());
        self
    }

    /// Scene ids requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SceneSource for FakeCatalog {
    async fn fetch_scene(&self, scene_id: &RemoteId) -> Result<RawScene, FetchError> {
        let key = scene_id.to_string();
        self.calls.lock().unwrap().push(key.clone());
        self.scripts
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|script| script.pop_front())
            .unwrap_or(Err(FetchError::NotFound))
    }
}

/// Records requested delays instead of sleeping
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

/// Temp directory holding all files of one run
pub struct Workspace {
    pub dir: TempDir,
    pub config: SyncConfig,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = SyncConfig {
            api_token: Some("test-token".to_string()),
            input_file: dir.path().join("video.json"),
            output_file: dir.path().join("scene_details.json"),
            failed_file: dir.path().join("failed_entry.json"),
            performer_file: dir.path().join("performer.json"),
            site_file: dir.path().join("site.json"),
            ..SyncConfig::default()
        };
        Self { dir, config }
    }

    pub fn write_input(&self, value: Value) {
        write_json(&self.config.input_file, &value);
    }

    pub fn write_existing(&self, value: Value) {
        write_json(&self.config.output_file, &value);
    }

    pub fn output(&self) -> Value {
        read_json(&self.config.output_file)
    }

    pub fn failed(&self) -> Value {
        read_json(&self.config.failed_file)
    }

    pub fn performers(&self) -> Value {
        read_json(&self.config.performer_file)
    }

    pub fn sites(&self) -> Value {
        read_json(&self.config.site_file)
    }
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
