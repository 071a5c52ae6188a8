use crate::model::Module;
use crate::transpiler::validation::errors::Result;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::warn;

/// How many structural rules are enforced beyond the basic ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Strictness {
    Low,
    #[default]
    Medium,
    High,
}

impl Strictness {
    /// Maps the command-line level (1, 2, 3) to a strictness.
    /// Anything else is the erroneous level, which is coerced to Medium.
    pub fn from_level(level: i64) -> Self {
        match level {
            1 => Strictness::Low,
            2 => Strictness::Medium,
            3 => Strictness::High,
            other => {
                warn!(level = other, "erroneous strictness level, using medium");
                Strictness::Medium
            }
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Strictness::Low => 1,
            Strictness::Medium => 2,
            Strictness::High => 3,
        }
    }
}

impl Display for Strictness {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let text = match self {
            Strictness::Low => "Low strictness",
            Strictness::Medium => "Medium strictness",
            Strictness::High => "High strictness",
        };
        f.write_str(text)
    }
}

/// Everything a check may need to look at.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub module: &'a Module,
    pub strictness: Strictness,
}

impl<'a> CheckContext<'a> {
    pub fn new(module: &'a Module, strictness: Strictness) -> Self {
        Self { module, strictness }
    }
}

/// Checkable node of the program model.
///
/// `check_basic` always runs; exactly one of the leveled checks follows,
/// selected by the strictness carried in the context.
pub trait Entity {
    fn name(&self) -> &str;

    fn check_basic(&self, _ctx: &CheckContext<'_>) -> Result<()> {
        Ok(())
    }

    fn check_low(&self, _ctx: &CheckContext<'_>) -> Result<()> {
        Ok(())
    }

    fn check_medium(&self, _ctx: &CheckContext<'_>) -> Result<()> {
        Ok(())
    }

    fn check_high(&self, _ctx: &CheckContext<'_>) -> Result<()> {
        Ok(())
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<()> {
        self.check_basic(ctx)?;

        match ctx.strictness {
            Strictness::Low => self.check_low(ctx),
            Strictness::Medium => self.check_medium(ctx),
            Strictness::High => self.check_high(ctx),
        }
    }
}
