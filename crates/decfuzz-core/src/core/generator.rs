// crates/decfuzz-core/src/core/generator.rs
// ============================================================================
// Module: Operand Generator
// Description: Random and boundary-pool decimal operand generation.
// Purpose: Produce the operand stream for a campaign, honoring precision and
//          scale ceilings and the skip semantics for empty draws.
// Dependencies: rand, serde, thiserror
// ============================================================================

//! ## Overview
//! Uniform mode draws a digit string of random length, strips leading zeros,
//! and splits a fractional tail; a draw that strips to nothing is a skip, and
//! the campaign regenerates the trial instead of substituting a literal zero.
//! Boundary mode draws from a curated pool of limit values: maximum-precision
//! magnitudes, the 64-bit and 128-bit integer rails, and decimal-point and
//! trailing-zero variants of those rails that exercise the scale bands.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::operand::DecimalOperand;
use crate::core::operand::OperandError;
use crate::core::operator::Operator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Boundary pool texts, drawn uniformly in boundary mode.
///
/// Repeated entries raise the draw weight of the small anchors. Entries whose
/// scale exceeds an engine ceiling stay in the pool: both engines then reject
/// the value and the trial passes by error agreement, which probes the limit
/// handling on each side.
const BOUNDARY_VALUES: [&str; 36] = [
    "99999999999999999999999999999999999999999999999999999999999999999",
    "-99999999999999999999999999999999999999999999999999999999999999999",
    "0",
    "1",
    "-1",
    "-9223372036854775808",
    "9223372036854775807",
    "-170141183460469231731687303715884105728",
    "170141183460469231731687303715884105727",
    "999999999999999.99999999999999999999999999999999999999999999999999",
    "-999999999999999999.99999999999999999999999999999999999999999999999",
    "0",
    "1",
    "-1",
    "-922.3372036854775808",
    "922337.2036854775807",
    "-170141.183460469231731687303715884105728",
    "170141183460.469231731687303715884105727",
    "99999999999999999999999999999999999999999999999999999999999.999999",
    "-999999999999999999999999999999999999999999999999999999.99999999999",
    "0",
    "1",
    "-1",
    "-9223372036854775.808",
    "9223372036.854775807",
    "-1701411834604692.31731687303715884105728",
    "1701411834604692317316.87303715884105727",
    "99999999999999999999999999999999999999999999999999999999999.999999000",
    "-999999999999999999999999999999999999999999999999999999.9999999999900",
    "0",
    "1",
    "-1",
    "-9223372036854775.808000",
    "9223372036.854775807000",
    "-1701411834604692.31731687303715884105728000",
    "1701411834604692317316.87303715884105727000",
];

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Operand generation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Random digit strings within the precision and scale ceilings.
    #[default]
    Uniform,
    /// Uniform draws from the boundary value pool.
    Boundary,
}

/// Generator settings fixed for the lifetime of a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Maximum significant digit count for a drawn operand.
    pub max_precision: usize,
    /// Maximum fractional digit count for a drawn operand.
    pub max_scale: usize,
    /// Probability that a non-negative draw is flipped negative.
    pub negative_probability: f64,
    /// Generation strategy.
    pub mode: GenerationMode,
    /// Seed for reproducible campaigns; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_precision: 65,
            max_scale: 30,
            negative_probability: 0.5,
            mode: GenerationMode::Uniform,
            seed: None,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Generator construction failures.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A boundary pool literal failed to parse.
    #[error("boundary pool entry rejected: {0}")]
    Pool(#[from] OperandError),
}

// ============================================================================
// SECTION: Operand Generator
// ============================================================================

/// Owner of the campaign RNG; draws operands and operators.
#[derive(Debug)]
pub struct OperandGenerator {
    /// Settings fixed at construction.
    config: GeneratorConfig,
    /// Campaign RNG, seeded or entropy-backed.
    rng: StdRng,
    /// Parsed boundary pool, present in every mode.
    pool: Vec<DecimalOperand>,
}

impl OperandGenerator {
    /// Builds a generator, parsing the boundary pool once.
    ///
    /// # Errors
    /// Returns [`GeneratorError::Pool`] when a pool literal is rejected.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pool = BOUNDARY_VALUES
            .iter()
            .map(|text| DecimalOperand::parse(text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { config, rng, pool })
    }

    /// Draws one operand, or `None` when the draw is a skip.
    ///
    /// A skip happens when a uniform draw strips to an empty digit string;
    /// the caller regenerates the whole trial.
    pub fn draw(&mut self) -> Option<DecimalOperand> {
        match self.config.mode {
            GenerationMode::Uniform => self.draw_uniform(),
            GenerationMode::Boundary => {
                let index = self.rng.gen_range(0..self.pool.len());
                self.pool.get(index).cloned()
            }
        }
    }

    /// Picks the trial operator uniformly.
    pub fn pick_operator(&mut self) -> Operator {
        match self.rng.gen_range(0..Operator::ALL.len()) {
            0 => Operator::Add,
            1 => Operator::Subtract,
            2 => Operator::Multiply,
            3 => Operator::Divide,
            _ => Operator::Modulo,
        }
    }

    /// Settings the generator was built with.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Uniform-mode draw: length, digits, strip, split, sign.
    fn draw_uniform(&mut self) -> Option<DecimalOperand> {
        let length = self.rng.gen_range(0..=self.config.max_precision);
        let mut digits: Vec<u8> = (0..length).map(|_| self.rng.gen_range(0..=9u8)).collect();
        let leading = digits.iter().take_while(|&&digit| digit == 0).count();
        digits.drain(..leading);
        if digits.is_empty() {
            return None;
        }
        let (negative, digits, scale) = if digits.len() == 1 {
            if self.config.max_scale > 0 && self.rng.gen_bool(0.5) {
                (false, digits, 1)
            } else {
                (true, vec![1], 0)
            }
        } else {
            let ceiling = self.config.max_scale.min(digits.len());
            (false, digits, self.rng.gen_range(0..=ceiling))
        };
        let negative = negative || self.rng.gen_bool(self.config.negative_probability);
        DecimalOperand::new(negative, digits, scale).ok()
    }
}
