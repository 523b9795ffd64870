use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::XlprintError;

/// Page orientation. Landscape swaps the paper's raw width and height.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = XlprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => Err(XlprintError::InvalidOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => f.write_str("portrait"),
            Self::Landscape => f.write_str("landscape"),
        }
    }
}

/// Horizontal placement of content narrower than the printable width.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = XlprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(XlprintError::InvalidAlignment(s.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Center => f.write_str("center"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Paper settings as they appear in a sheet description.
///
/// Every field is optional; missing fields keep the [`crate::print::Paper`] defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaperConfig {
    /// Named paper size (`A3`, `A4`, `A5`, `B4`, `B5`)
    pub paper_size: Option<String>,
    pub orientation: Option<Orientation>,
    pub align: Option<Alignment>,
    /// Padding on every side, CSS pixels
    pub padding: Option<f64>,
    /// Scale wide content down to the printable width (default true)
    pub fit_to_width: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert_eq!(" Portrait ".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert!(matches!(
            "sideways".parse::<Orientation>(),
            Err(XlprintError::InvalidOrientation(_))
        ));
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!("RIGHT".parse::<Alignment>().unwrap(), Alignment::Right);
        assert!("justify".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_paper_config_json() {
        let config: PaperConfig = serde_json::from_str(
            r#"{"paperSize":"A3","orientation":"landscape","align":"center","fitToWidth":false}"#,
        )
        .unwrap();
        assert_eq!(config.paper_size.as_deref(), Some("A3"));
        assert_eq!(config.orientation, Some(Orientation::Landscape));
        assert_eq!(config.align, Some(Alignment::Center));
        assert_eq!(config.padding, None);
        assert_eq!(config.fit_to_width, Some(false));
    }
}
