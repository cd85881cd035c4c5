use crate::error::{AppError, Result};
use chrono::NaiveDate;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: u32,
    pub name: CompactString,
    pub origin: CompactString,
    pub destination: CompactString,
    pub active_bus_count: u32,
    pub next_arrival_label: CompactString,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: CompactString,
    pub route_name: CompactString,
    pub passenger_count: u32,
    pub capacity: u32,
}

impl Bus {
    /// Occupancy as a whole percentage of capacity, rounded to nearest.
    pub fn occupancy_percent(&self) -> u32 {
        if self.capacity == 0 {
            return 0;
        }
        ((self.passenger_count as f64 / self.capacity as f64) * 100.0).round() as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LostItemStatus {
    Found,
    Claimed,
}

impl LostItemStatus {
    pub fn badge(self) -> &'static str {
        match self {
            LostItemStatus::Found => "FOUND",
            LostItemStatus::Claimed => "CLAIMED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItem {
    pub id: u32,
    pub description: CompactString,
    pub location: CompactString,
    pub date: NaiveDate,
    pub status: LostItemStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: u32,
    pub route_name: CompactString,
    pub destination: CompactString,
    pub points_awarded: u32,
}

/// Read-only reference data the views render from. In a full system these
/// collections would come from the operator's feeds; here they are either the
/// built-in sample set or a JSON document loaded once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleData {
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub buses: Vec<Bus>,
    #[serde(default)]
    pub lost_items: Vec<LostItem>,
    #[serde(default)]
    pub trips: Vec<Trip>,
}

impl SampleData {
    pub fn builtin() -> Self {
        Self {
            routes: vec![
                route(1, "Route 12", "City Center", "Airport", 3, "5 min"),
                route(2, "Route 8", "Railway Station", "University", 2, "8 min"),
                route(3, "Route 3", "Hospital", "Mall", 4, "3 min"),
            ],
            buses: vec![
                bus("B001", "Route 12", 25, 40),
                bus("B002", "Route 8", 30, 40),
                bus("B003", "Route 3", 15, 35),
            ],
            lost_items: vec![
                lost_item(1, "Blue Backpack", "Bus Stop 5", (2025, 9, 12), LostItemStatus::Found),
                lost_item(2, "Mobile Phone", "Route 2 Bus", (2025, 9, 11), LostItemStatus::Claimed),
                lost_item(3, "Umbrella", "Central Station", (2025, 9, 10), LostItemStatus::Found),
            ],
            trips: vec![
                trip(1, "Route 12", "Airport", 15),
                trip(2, "Route 8", "University", 12),
            ],
        }
    }

    /// Load a replacement sample set from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let data: SampleData = serde_json::from_str(&raw)?;
        data.validate()?;
        tracing::info!(
            path = %path.as_ref().display(),
            routes = data.routes.len(),
            buses = data.buses.len(),
            lost_items = data.lost_items.len(),
            trips = data.trips.len(),
            "Loaded sample data"
        );
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        // 1. Bus capacity invariants
        for b in &self.buses {
            if b.capacity == 0 {
                return Err(AppError::InvalidSampleData(format!("bus {} has zero capacity", b.id)));
            }
            if b.passenger_count > b.capacity {
                return Err(AppError::InvalidSampleData(format!(
                    "bus {} carries {} passengers but seats {}",
                    b.id, b.passenger_count, b.capacity
                )));
            }
        }

        // 2. Unique ids per collection
        ensure_unique("route", self.routes.iter().map(|r| r.id.to_string()))?;
        ensure_unique("bus", self.buses.iter().map(|b| b.id.to_string()))?;
        ensure_unique("lost item", self.lost_items.iter().map(|i| i.id.to_string()))?;
        ensure_unique("trip", self.trips.iter().map(|t| t.id.to_string()))?;
        Ok(())
    }

    /// Resolve a route by exact name ("Route 3"), case-insensitively, or by id ("3").
    pub fn find_route(&self, query: &str) -> Option<&Route> {
        let query = query.trim();
        if let Some(r) = self
            .routes
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(query))
        {
            return Some(r);
        }
        let id: u32 = query.parse().ok()?;
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn buses_on_route<'a>(&'a self, route_name: &'a str) -> impl Iterator<Item = &'a Bus> + 'a {
        self.buses.iter().filter(move |b| b.route_name == route_name)
    }
}

fn ensure_unique(kind: &str, ids: impl Iterator<Item = String>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(AppError::InvalidSampleData(format!("duplicate {} id {}", kind, id)));
        }
    }
    Ok(())
}

fn route(id: u32, name: &str, origin: &str, destination: &str, buses: u32, next: &str) -> Route {
    Route {
        id,
        name: name.into(),
        origin: origin.into(),
        destination: destination.into(),
        active_bus_count: buses,
        next_arrival_label: next.into(),
    }
}

fn bus(id: &str, route_name: &str, passenger_count: u32, capacity: u32) -> Bus {
    Bus {
        id: id.into(),
        route_name: route_name.into(),
        passenger_count,
        capacity,
    }
}

fn lost_item(
    id: u32,
    description: &str,
    location: &str,
    (y, m, d): (i32, u32, u32),
    status: LostItemStatus,
) -> LostItem {
    LostItem {
        id,
        description: description.into(),
        location: location.into(),
        // Built-in dates are literal calendar days.
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        status,
    }
}

fn trip(id: u32, route_name: &str, destination: &str, points_awarded: u32) -> Trip {
    Trip {
        id,
        route_name: route_name.into(),
        destination: destination.into(),
        points_awarded,
    }
}
