//! Scene validation
//!
//! Checks a [`SceneLayout`] for values that would make the animation
//! misbehave (steam that never rises, a prefilled column above its own
//! ceiling, a cup with no parts) before any producer is built from it.

use std::collections::HashSet;

use crate::scene::SceneLayout;

/// Validation error found in a layout
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Steam field has no particles
    ZeroParticles,
    /// Steam ceiling is zero or negative
    NonPositiveCeiling(f32),
    /// Steam footprint half-width is negative
    NegativeLateralBound(f32),
    /// Steam lateral drift is negative
    NegativeJitter(f32),
    /// Minimum rise speed is zero or negative, so particles could stall
    NonPositiveRise(f32),
    /// `rise_max` is below `rise_min`
    InvertedRiseRange { min: f32, max: f32 },
    /// Prefill spread reaches the ceiling
    PrefillAboveCeiling { spread: f32, ceiling: f32 },
    /// Cup has no parts
    EmptyCup,
    /// Two cup parts share a name
    DuplicatePartName(String),
    /// A cup part has a zero or negative size
    DegenerateShape(String),
    /// Float range is empty or inverted
    InvalidFloatRange { min: f32, max: f32 },
    /// A bean has zero or negative scale
    NonPositiveScale { bean: usize, scale: f32 },
    /// A numeric field is infinite or NaN
    NonFinite { field: &'static str, value: f32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroParticles => write!(f, "Steam field has no particles"),
            ValidationError::NonPositiveCeiling(c) => {
                write!(f, "Steam ceiling must be positive, got {}", c)
            }
            ValidationError::NegativeLateralBound(b) => {
                write!(f, "Steam lateral bound must not be negative, got {}", b)
            }
            ValidationError::NegativeJitter(j) => {
                write!(f, "Steam lateral jitter must not be negative, got {}", j)
            }
            ValidationError::NonPositiveRise(r) => {
                write!(f, "Steam rise speed must be positive, got {}", r)
            }
            ValidationError::InvertedRiseRange { min, max } => {
                write!(f, "Steam rise range is inverted: {}..{}", min, max)
            }
            ValidationError::PrefillAboveCeiling { spread, ceiling } => {
                write!(f, "Initial height spread {} is at or above the ceiling {}", spread, ceiling)
            }
            ValidationError::EmptyCup => write!(f, "Cup has no parts"),
            ValidationError::DuplicatePartName(name) => {
                write!(f, "Duplicate cup part name: '{}'", name)
            }
            ValidationError::DegenerateShape(name) => {
                write!(f, "Shape '{}' is degenerate", name)
            }
            ValidationError::InvalidFloatRange { min, max } => {
                write!(f, "Float range is empty or inverted: {}..{}", min, max)
            }
            ValidationError::NonPositiveScale { bean, scale } => {
                write!(f, "Bean {} has non-positive scale {}", bean, scale)
            }
            ValidationError::NonFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Push a `NonFinite` error for every infinite or NaN value; true if any were found
fn reject_non_finite(errors: &mut Vec<ValidationError>, values: &[(&'static str, f32)]) -> bool {
    let before = errors.len();
    for &(field, value) in values {
        if !value.is_finite() {
            errors.push(ValidationError::NonFinite { field, value });
        }
    }
    errors.len() > before
}

/// Layout validator
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a layout, returning all errors found
    pub fn validate(layout: &SceneLayout) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let steam = &layout.steam;
        if steam.count == 0 {
            errors.push(ValidationError::ZeroParticles);
        }
        let steam_values = [
            ("steam.ceiling", steam.ceiling),
            ("steam.lateral_bound", steam.lateral_bound),
            ("steam.lateral_jitter", steam.lateral_jitter),
            ("steam.rise_min", steam.rise_min),
            ("steam.rise_max", steam.rise_max),
            ("steam.initial_height_spread", steam.initial_height_spread),
        ];
        let non_finite = reject_non_finite(&mut errors, &steam_values);
        // Range checks assume finite values
        if !non_finite {
            if steam.ceiling <= 0.0 {
                errors.push(ValidationError::NonPositiveCeiling(steam.ceiling));
            }
            if steam.lateral_bound < 0.0 {
                errors.push(ValidationError::NegativeLateralBound(steam.lateral_bound));
            }
            if steam.lateral_jitter < 0.0 {
                errors.push(ValidationError::NegativeJitter(steam.lateral_jitter));
            }
            if steam.rise_min <= 0.0 {
                errors.push(ValidationError::NonPositiveRise(steam.rise_min));
            }
            if steam.rise_max < steam.rise_min {
                errors.push(ValidationError::InvertedRiseRange {
                    min: steam.rise_min,
                    max: steam.rise_max,
                });
            }
            if steam.initial_height_spread >= steam.ceiling {
                errors.push(ValidationError::PrefillAboveCeiling {
                    spread: steam.initial_height_spread,
                    ceiling: steam.ceiling,
                });
            }
        }

        if layout.cup.parts.is_empty() {
            errors.push(ValidationError::EmptyCup);
        }
        let mut seen_names = HashSet::new();
        for part in &layout.cup.parts {
            if !seen_names.insert(part.name.as_str()) {
                errors.push(ValidationError::DuplicatePartName(part.name.clone()));
            }
            if !part.shape.has_positive_extent() {
                errors.push(ValidationError::DegenerateShape(part.name.clone()));
            }
        }

        if !layout.bean_motion.shape.has_positive_extent() {
            errors.push(ValidationError::DegenerateShape("bean".to_string()));
        }

        for float in [&layout.cup.float, &layout.bean_motion.float] {
            let values = [
                ("float.speed", float.speed),
                ("float.rotation_intensity", float.rotation_intensity),
                ("float.float_intensity", float.float_intensity),
                ("float.floating_min", float.floating_min),
                ("float.floating_max", float.floating_max),
            ];
            if reject_non_finite(&mut errors, &values) {
                continue;
            }
            if float.floating_max <= float.floating_min {
                errors.push(ValidationError::InvalidFloatRange {
                    min: float.floating_min,
                    max: float.floating_max,
                });
            }
        }

        for (index, bean) in layout.beans.iter().enumerate() {
            if !bean.scale.is_finite() {
                errors.push(ValidationError::NonFinite { field: "bean.scale", value: bean.scale });
            } else if bean.scale <= 0.0 {
                errors.push(ValidationError::NonPositiveScale { bean: index, scale: bean.scale });
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(layout: &SceneLayout) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(layout);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cup::CupPart;
    use crate::shapes::ShapeTemplate;
    use crate::{Material, Transform3D};

    #[test]
    fn test_valid_layout() {
        assert!(SceneValidator::validate_or_error(&SceneLayout::coffee()).is_ok());
    }

    #[test]
    fn test_steam_errors() {
        let mut layout = SceneLayout::coffee();
        layout.steam.count = 0;
        layout.steam.ceiling = 0.0;
        layout.steam.rise_min = 0.0;
        let errors = SceneValidator::validate(&layout);
        assert!(errors.contains(&ValidationError::ZeroParticles));
        assert!(errors.contains(&ValidationError::NonPositiveCeiling(0.0)));
        assert!(errors.contains(&ValidationError::NonPositiveRise(0.0)));
    }

    #[test]
    fn test_prefill_above_ceiling() {
        let mut layout = SceneLayout::coffee();
        layout.steam.initial_height_spread = 3.0;
        let errors = SceneValidator::validate(&layout);
        assert_eq!(
            errors,
            vec![ValidationError::PrefillAboveCeiling { spread: 3.0, ceiling: 2.0 }]
        );
    }

    #[test]
    fn test_prefill_at_ceiling_is_rejected() {
        let mut layout = SceneLayout::coffee();
        layout.steam.initial_height_spread = 2.0;
        assert_eq!(
            SceneValidator::validate(&layout),
            vec![ValidationError::PrefillAboveCeiling { spread: 2.0, ceiling: 2.0 }]
        );

        layout.steam.initial_height_spread = 1.99;
        assert!(SceneValidator::validate(&layout).is_empty());
    }

    #[test]
    fn test_non_finite_steam_values() {
        let mut layout = SceneLayout::coffee();
        layout.steam.lateral_bound = f32::INFINITY;
        assert_eq!(
            SceneValidator::validate(&layout),
            vec![ValidationError::NonFinite { field: "steam.lateral_bound", value: f32::INFINITY }]
        );

        let mut layout = SceneLayout::coffee();
        layout.steam.rise_min = f32::NAN;
        layout.steam.ceiling = f32::NEG_INFINITY;
        let errors = SceneValidator::validate(&layout);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ValidationError::NonFinite { .. })));
    }

    #[test]
    fn test_non_finite_bean_and_float_values() {
        let mut layout = SceneLayout::coffee();
        layout.beans[1].scale = f32::NAN;
        layout.cup.float.floating_max = f32::INFINITY;
        layout.bean_motion.float.speed = f32::NAN;
        let errors = SceneValidator::validate(&layout);
        let fields: Vec<_> = errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::NonFinite { field, .. } => Some(*field),
                _ => None,
            })
            .collect();
        assert_eq!(errors.len(), 3);
        assert_eq!(fields, vec!["float.floating_max", "float.speed", "bean.scale"]);
    }

    #[test]
    fn test_degenerate_bean_shape() {
        let mut layout = SceneLayout::coffee();
        layout.bean_motion.shape = ShapeTemplate::sphere(0.0, 16, 16);
        assert_eq!(
            SceneValidator::validate(&layout),
            vec![ValidationError::DegenerateShape("bean".to_string())]
        );

        layout.bean_motion.shape = ShapeTemplate::sphere(f32::NAN, 16, 16);
        assert!(SceneValidator::validate(&layout)
            .contains(&ValidationError::DegenerateShape("bean".to_string())));
    }

    #[test]
    fn test_inverted_rise_range() {
        let mut layout = SceneLayout::coffee();
        layout.steam.rise_max = 0.005;
        let errors = SceneValidator::validate(&layout);
        assert!(matches!(errors[0], ValidationError::InvertedRiseRange { .. }));
    }

    #[test]
    fn test_cup_errors() {
        let mut layout = SceneLayout::coffee();
        layout.cup.parts.push(CupPart::new(
            "body",
            ShapeTemplate::sphere(0.0, 8, 8),
            Transform3D::identity(),
            Material::default(),
        ));
        let errors = SceneValidator::validate(&layout);
        assert!(errors.contains(&ValidationError::DuplicatePartName("body".to_string())));
        assert!(errors.contains(&ValidationError::DegenerateShape("body".to_string())));

        layout.cup.parts.clear();
        assert!(SceneValidator::validate(&layout).contains(&ValidationError::EmptyCup));
    }

    #[test]
    fn test_bean_scale() {
        let mut layout = SceneLayout::coffee();
        layout.beans[2].scale = 0.0;
        assert_eq!(
            SceneValidator::validate(&layout),
            vec![ValidationError::NonPositiveScale { bean: 2, scale: 0.0 }]
        );
    }

    #[test]
    fn test_float_range() {
        let mut layout = SceneLayout::coffee();
        layout.bean_motion.float.floating_max = -0.2;
        let errors = SceneValidator::validate(&layout);
        assert!(matches!(errors[0], ValidationError::InvalidFloatRange { .. }));
    }

    #[test]
    fn test_error_display() {
        let error = ValidationError::DuplicatePartName("handle".to_string());
        assert_eq!(error.to_string(), "Duplicate cup part name: 'handle'");
    }
}
