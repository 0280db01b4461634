use std::{collections::BTreeSet, path::Path};

use anyhow::Context as _;

use crate::{
    engine::{
        runtime::{AnimationEngine, EngineSettings},
        section::SectionSpec,
    },
    foundation::error::{ScrublineError, ScrublineResult},
    phases::{Phase, PhaseSequence},
};

/// A page's worth of sections plus engine settings, as stored in a scene file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub engine: EngineSettings,
    pub sections: Vec<SectionSpec>,
    /// Scripted auto-scroll demo.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub demo: Vec<Phase>,
}

impl SceneConfig {
    pub fn from_json_str(s: &str) -> ScrublineResult<Self> {
        serde_json::from_str(s).map_err(|e| ScrublineError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ScrublineResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_string(&self) -> ScrublineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScrublineError::serde(e.to_string()))
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        self.engine.validate()?;
        let mut seen = BTreeSet::new();
        for section in &self.sections {
            section.validate()?;
            if !seen.insert(section.id.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            // Timelines are compiled here so broken stages fail validation, not mount.
            for t in &section.timelines {
                t.build()?;
            }
        }
        self.demo_sequence()?;
        Ok(())
    }

    pub fn demo_sequence(&self) -> ScrublineResult<Option<PhaseSequence>> {
        if self.demo.is_empty() {
            return Ok(None);
        }
        PhaseSequence::new(self.demo.clone()).map(Some)
    }

    /// Validate and mount every section on a fresh engine.
    pub fn build(&self) -> ScrublineResult<AnimationEngine> {
        self.validate()?;
        let mut engine = AnimationEngine::new(self.engine.clone())?;
        for section in &self.sections {
            engine.mount(section)?;
        }
        Ok(engine)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
