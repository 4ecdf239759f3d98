//! Validated, immutable game rules

use crate::error::ConfigError;
use crate::tuning::{GlyphDef, SpecialDef, Tuning};

use super::weighted::WeightedTable;

/// Tuning plus its compiled glyph tables. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Rules {
    pub tuning: Tuning,
    pub normals: WeightedTable<GlyphDef>,
    pub specials: WeightedTable<SpecialDef>,
}

impl Rules {
    pub fn from_tuning(tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let normals = WeightedTable::new(
            "glyphs",
            tuning.glyphs.iter().map(|g| (g.clone(), g.weight)),
        )?;
        let specials = WeightedTable::new(
            "specials",
            tuning.specials.iter().map(|s| (s.clone(), s.weight)),
        )?;
        Ok(Self {
            tuning,
            normals,
            specials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_compile() {
        let rules = Rules::from_tuning(Tuning::default()).unwrap();
        assert_eq!(rules.normals.total_weight(), 133.0);
        assert_eq!(rules.specials.total_weight(), 34.0);
    }

    #[test]
    fn test_empty_specials_fail_loudly() {
        let tuning = Tuning {
            specials: Vec::new(),
            ..Tuning::default()
        };
        assert!(matches!(
            Rules::from_tuning(tuning),
            Err(ConfigError::EmptyTable { table: "specials" })
        ));
    }

    #[test]
    fn test_zero_weight_glyphs_fail_loudly() {
        let mut tuning = Tuning::default();
        for glyph in &mut tuning.glyphs {
            glyph.weight = 0.0;
        }
        assert!(matches!(
            Rules::from_tuning(tuning),
            Err(ConfigError::NonPositiveTotal { table: "glyphs", .. })
        ));
    }
}
