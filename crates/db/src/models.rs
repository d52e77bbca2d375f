//! Database models and types.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A bus route as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: i64,
    /// Route number as displayed to riders, upper-cased.
    pub name: String,
    /// Canonical integer form of `stif_code`, kept as text so that codes
    /// of any length fit.
    pub description: String,
    pub origin: String,
    pub destination: String,
    /// Registry code shared with the stops of this route.
    pub stif_code: String,
    /// Accessibility label descriptions, in insertion order.
    #[sqlx(skip)]
    pub accessibility: Vec<String>,
}

/// A bus stop as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stop {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Raw direction code, `A` for outbound.
    pub direction: String,
    /// Matches `Route::stif_code` by value; no constraint enforces it.
    pub route_stif_code: String,
    #[sqlx(skip)]
    pub accessibility: Vec<String>,
}

/// One accessibility label row, owned by exactly one route or one stop.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessibilityLabel {
    pub id: i64,
    pub description: String,
    pub route_id: Option<i64>,
    pub stop_id: Option<i64>,
}

/// A route ready to be inserted, with its labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoute {
    pub name: String,
    pub description: String,
    pub origin: String,
    pub destination: String,
    pub stif_code: String,
    pub accessibility: Vec<String>,
}

/// A stop ready to be inserted, with its labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStop {
    pub name: String,
    pub direction: String,
    pub route_stif_code: String,
    pub accessibility: Vec<String>,
}

/// Travel direction of a stop along its route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    /// "Aller"
    Outbound,
    /// "Retour"
    Inbound,
}

impl Direction {
    /// Only the literal code `A` is outbound; anything else, including an
    /// empty code, is inbound.
    pub fn from_code(code: &str) -> Self {
        if code == "A" {
            Direction::Outbound
        } else {
            Direction::Inbound
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outbound => "Aller",
            Direction::Inbound => "Retour",
        }
    }
}

impl Stop {
    pub fn direction(&self) -> Direction {
        Direction::from_code(&self.direction)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ligne {}, {} -> {}, Accessibilité: {}",
            self.name,
            self.origin,
            self.destination,
            self.accessibility.join(",")
        )
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arret {}, Direction: {}, Accessibilité: {}",
            self.name,
            self.direction().as_str(),
            self.accessibility.join(",")
        )
    }
}
