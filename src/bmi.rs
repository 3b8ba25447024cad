//! Body-mass index calculator.
//!
//! Runs entirely on the client. Height is entered in centimetres, weight in
//! kilograms; the value is rounded to one decimal before categorizing.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BmiError {
    #[error("Please enter valid height and weight values.")]
    InvalidInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obesity,
}

impl BmiCategory {
    pub fn for_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obesity
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl Bmi {
    pub fn calculate(height_cm: f64, weight_kg: f64) -> Result<Self, BmiError> {
        if !height_cm.is_finite() || !weight_kg.is_finite() || height_cm <= 0.0 || weight_kg <= 0.0
        {
            return Err(BmiError::InvalidInput);
        }

        let height_m = height_cm / 100.0;
        let value = (weight_kg / (height_m * height_m) * 10.0).round() / 10.0;
        Ok(Self {
            value,
            category: BmiCategory::for_value(value),
        })
    }

    /// Parse the two form fields and calculate.
    pub fn from_input(height_cm: &str, weight_kg: &str) -> Result<Self, BmiError> {
        let parse = |s: &str| s.trim().parse::<f64>().map_err(|_| BmiError::InvalidInput);
        Self::calculate(parse(height_cm)?, parse(weight_kg)?)
    }
}
