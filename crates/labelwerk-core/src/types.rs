// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Labelwerk label service.

use serde::{Deserialize, Serialize};

use crate::error::{LabelwerkError, Result};

/// Points per inch (PDF user space unit).
pub const POINTS_PER_INCH: f32 = 72.0;

/// Printable page of a single label, in points.
///
/// The constructor guarantees a positive available area on both axes, so
/// downstream layout code never has to deal with degenerate pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    width: f32,
    height: f32,
    margin_x: f32,
    margin_y: f32,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32, margin_x: f32, margin_y: f32) -> Result<Self> {
        let all_finite = [width, height, margin_x, margin_y]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite || width <= 0.0 || height <= 0.0 {
            return Err(LabelwerkError::InvalidGeometry(format!(
                "page must be positive, got {width}x{height}"
            )));
        }
        if margin_x < 0.0 || margin_y < 0.0 {
            return Err(LabelwerkError::InvalidGeometry(format!(
                "margins must not be negative, got ({margin_x}, {margin_y})"
            )));
        }
        if width <= 2.0 * margin_x || height <= 2.0 * margin_y {
            return Err(LabelwerkError::InvalidGeometry(format!(
                "margins ({margin_x}, {margin_y}) leave no printable area on a {width}x{height} page"
            )));
        }
        Ok(Self {
            width,
            height,
            margin_x,
            margin_y,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margin_x(&self) -> f32 {
        self.margin_x
    }

    pub fn margin_y(&self) -> f32 {
        self.margin_y
    }

    /// Width left for text once both horizontal margins are removed.
    pub fn available_width(&self) -> f32 {
        self.width - 2.0 * self.margin_x
    }

    /// Height left for text once both vertical margins are removed.
    pub fn available_height(&self) -> f32 {
        self.height - 2.0 * self.margin_y
    }
}

/// Horizontal alignment of a line within the printable area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Lenient parse used for request payloads; unknown values centre.
    pub fn from_keyword(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Self::Left,
            "right" | "end" => Self::Right,
            _ => Self::Center,
        }
    }
}

/// Vertical placement of the text block on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Start,
    #[default]
    Center,
    End,
}

impl VerticalAlign {
    pub fn from_keyword(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "start" | "top" => Self::Start,
            "end" | "bottom" => Self::End,
            _ => Self::Center,
        }
    }
}

/// Which printing backend handled (or refused) a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Primary,
    Fallback,
}

/// Stage that produced the final print outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMethod {
    /// Rejected before any backend was tried.
    Validation,
    Primary,
    Fallback,
}

impl PrintMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

/// One backend invocation, recorded by the dispatcher for its own logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintAttempt {
    pub backend: BackendKind,
    pub success: bool,
    pub message: String,
}

/// Final result of a dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOutcome {
    pub success: bool,
    pub method: PrintMethod,
    pub message: String,
    pub copies_requested: u32,
    pub copies_confirmed: u32,
}

impl PrintOutcome {
    pub fn succeeded(method: PrintMethod, message: impl Into<String>, copies: u32) -> Self {
        Self {
            success: true,
            method,
            message: message.into(),
            copies_requested: copies,
            copies_confirmed: copies,
        }
    }

    pub fn failed(
        method: PrintMethod,
        message: impl Into<String>,
        copies_requested: u32,
        copies_confirmed: u32,
    ) -> Self {
        Self {
            success: false,
            method,
            message: message.into(),
            copies_requested,
            copies_confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_reports_available_area() {
        let geometry = PageGeometry::new(288.0, 72.0, 10.8, 10.8).expect("valid");
        assert!((geometry.available_width() - 266.4).abs() < 1e-3);
        assert!((geometry.available_height() - 50.4).abs() < 1e-3);
    }

    #[test]
    fn geometry_rejects_margins_that_eat_the_page() {
        assert!(PageGeometry::new(20.0, 72.0, 10.0, 5.0).is_err());
        assert!(PageGeometry::new(288.0, 20.0, 5.0, 10.0).is_err());
    }

    #[test]
    fn geometry_rejects_non_finite_values() {
        assert!(PageGeometry::new(f32::NAN, 72.0, 1.0, 1.0).is_err());
        assert!(PageGeometry::new(288.0, f32::INFINITY, 1.0, 1.0).is_err());
        assert!(PageGeometry::new(288.0, 72.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn alignment_keywords_are_lenient() {
        assert_eq!(TextAlign::from_keyword("LEFT"), TextAlign::Left);
        assert_eq!(TextAlign::from_keyword("end"), TextAlign::Right);
        assert_eq!(TextAlign::from_keyword("justify"), TextAlign::Center);
        assert_eq!(VerticalAlign::from_keyword("start"), VerticalAlign::Start);
        assert_eq!(VerticalAlign::from_keyword(""), VerticalAlign::Center);
    }

    #[test]
    fn outcome_serializes_camel_case_with_lowercase_method() {
        let outcome = PrintOutcome::failed(PrintMethod::Fallback, "fallback failed at copy 2", 3, 1);
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["method"], "fallback");
        assert_eq!(json["copiesRequested"], 3);
        assert_eq!(json["copiesConfirmed"], 1);
        assert_eq!(json["success"], false);
    }
}
