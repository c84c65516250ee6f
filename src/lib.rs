//! Chargen Core - deterministic tabletop character generation engine
//!
//! Rolls ability scores, physical and social background, picks a career
//! track, simulates years of prior experience (with death and aging) and
//! keeps the resulting skill-point ledger. All randomness flows through an
//! injectable [`dice::DiceRoller`], so a seed reproduces a character exactly.
//!
//! Python bindings via PyO3 are available behind the `python` feature.

pub mod attributes;
pub mod background;
pub mod character;
pub mod config;
pub mod dice;
pub mod error;
pub mod simulator;
pub mod skills;
pub mod track;

pub use character::{Character, CharacterGenerator};
pub use config::{GeneratorConfig, TrackRepository};
pub use dice::{DiceRoller, RngRoller, SeededRoller};
pub use error::{ChargenError, Result};

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::attributes::{validate_point_buy as check_point_buy, Attribute, AttributeMap};
    use crate::character::CharacterGenerator;
    use crate::config::{GeneratorConfig, TrackRepository};
    use crate::dice::SeededRoller;
    use crate::error::{ChargenError, Result};
    use crate::simulator::simulate_prior_experience;
    use crate::track::SkillTrack;

    // ========================================================================
    // Helper Functions
    // ========================================================================

    /// Scores keyed by attribute name; all six are required
    fn scores_from_map(scores: &HashMap<String, i32>) -> Result<AttributeMap<i32>> {
        let mut found: AttributeMap<Option<i32>> = AttributeMap::default();
        for (name, &value) in scores {
            *found.get_mut(name.parse::<Attribute>()?) = Some(value);
        }
        let mut out = AttributeMap::<i32>::default();
        for attribute in Attribute::ALL {
            *out.get_mut(attribute) = found
                .get(attribute)
                .ok_or_else(|| ChargenError::InvalidAttribute(format!("missing {}", attribute)))?;
        }
        Ok(out)
    }

    fn roller_for(seed: Option<u64>) -> SeededRoller {
        match seed {
            Some(seed) => SeededRoller::seeded(seed),
            None => SeededRoller::from_entropy(),
        }
    }

    // ========================================================================
    // CharacterEngine PyClass
    // ========================================================================

    /// Character generation engine holding a shared track table.
    ///
    /// Results are returned as JSON strings mirroring the Rust records.
    #[pyclass(frozen)]
    pub struct CharacterEngine {
        repository: Arc<TrackRepository>,
    }

    #[pymethods]
    impl CharacterEngine {
        /// Create an engine over a track file, or the built-in table
        #[new]
        #[pyo3(signature = (tracks_path=None))]
        fn new(tracks_path: Option<String>) -> PyResult<Self> {
            let repository = match tracks_path {
                Some(path) => TrackRepository::load(path)?,
                None => TrackRepository::builtin()?,
            };
            Ok(Self {
                repository: Arc::new(repository),
            })
        }

        /// Generate one character from a JSON `GeneratorConfig` (all fields optional)
        #[pyo3(signature = (config_json=None))]
        fn generate_character(&self, config_json: Option<&str>) -> PyResult<String> {
            let config = match config_json {
                Some(json) => GeneratorConfig::from_json_str(json)?,
                None => GeneratorConfig::default(),
            };
            let generator = CharacterGenerator::new(Arc::clone(&self.repository), config)?;
            Ok(generator.generate_seeded()?.to_json()?)
        }

        /// Simulate prior experience for a serialized `SkillTrack`
        #[pyo3(signature = (track_json, years, total_modifier, scores, allow_aging=false, seed=None))]
        fn simulate(
            &self,
            track_json: &str,
            years: u32,
            total_modifier: i32,
            scores: HashMap<String, i32>,
            allow_aging: bool,
            seed: Option<u64>,
        ) -> PyResult<String> {
            let track: SkillTrack = serde_json::from_str(track_json).map_err(ChargenError::from)?;
            let definition = self.repository.get(track.track)?;
            let scores = scores_from_map(&scores)?;
            let experience = simulate_prior_experience(
                &mut roller_for(seed),
                &track,
                &definition,
                years,
                total_modifier,
                &scores,
                allow_aging,
            )?;
            Ok(serde_json::to_string(&experience).map_err(ChargenError::from)?)
        }

        /// Re-read the track file; the old table stays on failure
        fn reload_tracks(&self) -> PyResult<()> {
            Ok(self.repository.reload()?)
        }

        fn track_count(&self) -> usize {
            self.repository.len()
        }
    }

    // ========================================================================
    // Python Functions
    // ========================================================================

    /// Validate a point-buy allocation; returns the failure reason, or None
    #[pyfunction]
    fn validate_point_buy(allocation: HashMap<String, i32>, budget: i32) -> Option<String> {
        check_point_buy(&allocation, budget)
            .err()
            .map(|err| err.to_string())
    }

    #[pymodule]
    fn chargen_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<CharacterEngine>()?;
        m.add_function(wrap_pyfunction!(validate_point_buy, m)?)?;
        Ok(())
    }
}
