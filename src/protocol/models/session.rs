use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Modality, Tool, TurnDetection, Voice};

/// Body of `POST /realtime/sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<Modality>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_detection: Option<TurnDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl SessionConfig {
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            voice: None,
            modalities: None,
            turn_detection: None,
            tools: None,
            instructions: None,
        }
    }

    #[must_use]
    pub fn voice(mut self, voice: impl Into<Voice>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    #[must_use]
    pub fn modalities(mut self, modalities: impl Into<Vec<Modality>>) -> Self {
        self.modalities = Some(modalities.into());
        self
    }

    #[must_use]
    pub fn turn_detection(mut self, turn_detection: TurnDetection) -> Self {
        self.turn_detection = Some(turn_detection);
        self
    }

    #[must_use]
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// Ephemeral key nested in the session creation response. Both fields are
/// relayed as-is, whatever JSON type the API used.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ClientSecret {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub expires_at: Option<Value>,
}

/// The subset of the session creation response this relay reads.
///
/// Everything else the API echoes back (session id, full config) is dropped
/// during deserialization and never reaches the browser.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionCreated {
    #[serde(default)]
    pub client_secret: Option<ClientSecret>,
}
