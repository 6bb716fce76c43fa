//! LLM providers and the catalog of selectable models.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Which API a model is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    /// Route a model name to its provider.
    ///
    /// Anything mentioning `gemini` goes to Google; everything else is
    /// treated as an OpenAI chat model.
    pub fn for_model(model: &str) -> Self {
        if model.to_ascii_lowercase().contains("gemini") {
            Self::Gemini
        } else {
            Self::OpenAi
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }

    /// Model used when checking a key without a model selected.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            Self::OpenAi => "gpt-4-1106-preview",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" | "gpt" => Ok(Self::OpenAi),
            other => Err(CoreError::UnknownProvider(other.to_string())),
        }
    }
}

/// A selectable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
}

impl ModelInfo {
    pub fn provider(&self) -> Provider {
        Provider::for_model(self.id)
    }
}

/// Models offered for selection, preferred first.
pub const AVAILABLE_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gemini-3-pro-preview",
        name: "Gemini 3 Pro Preview (Latest)",
    },
    ModelInfo {
        id: "gemini-2.5-pro",
        name: "Gemini 2.5 Pro (Stable)",
    },
    ModelInfo {
        id: "gemini-2.5-flash",
        name: "Gemini 2.5 Flash (Fast)",
    },
    ModelInfo {
        id: "gemini-2.0-flash",
        name: "Gemini 2.0 Flash",
    },
    ModelInfo {
        id: "gemini-1.5-pro",
        name: "Gemini 1.5 Pro (Legacy Stable)",
    },
    ModelInfo {
        id: "gemini-1.5-flash",
        name: "Gemini 1.5 Flash (Legacy)",
    },
    ModelInfo {
        id: "gpt-4-1106-preview",
        name: "GPT-4 Turbo (OpenAI Key)",
    },
];

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Look up a catalog entry. Model names outside the catalog are still usable.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    AVAILABLE_MODELS.iter().find(|m| m.id == id)
}
