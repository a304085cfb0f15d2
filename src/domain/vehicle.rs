//! Vehicle domain types.
//! Framework-agnostic representation of what the bay knows about a car.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Size class of a vehicle. Drives the base price of every package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleSize {
    Small,
    Medium,
    Big,
}

impl VehicleSize {
    pub const ALL: [VehicleSize; 3] = [VehicleSize::Small, VehicleSize::Medium, VehicleSize::Big];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Big => "big",
        }
    }
}

impl fmt::Display for VehicleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "big" => Ok(Self::Big),
            other => Err(format!(
                "Invalid vehicle size '{}'. Must be small, medium, or big",
                other
            )),
        }
    }
}

/// Settlement state of the current stay, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            other => Err(format!("Unknown payment status '{}'", other)),
        }
    }
}

/// Validated input for a vehicle intake or an edit of its descriptive fields.
#[derive(Debug, Clone)]
pub struct VehicleDetails {
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_size: VehicleSize,
    pub owner_name: String,
    pub owner_phone: String,
}

impl VehicleDetails {
    pub fn new(
        license_plate: &str,
        vehicle_type: &str,
        vehicle_size: &str,
        owner_name: &str,
        owner_phone: &str,
    ) -> Result<Self, String> {
        let license_plate = license_plate.trim().to_uppercase();
        if license_plate.is_empty() {
            return Err("license_plate is required".to_string());
        }
        let vehicle_type = vehicle_type.trim();
        if vehicle_type.is_empty() {
            return Err("vehicle_type is required".to_string());
        }
        let owner_name = owner_name.trim();
        if owner_name.is_empty() {
            return Err("owner_name is required".to_string());
        }

        Ok(Self {
            license_plate,
            vehicle_type: vehicle_type.to_string(),
            vehicle_size: vehicle_size.parse()?,
            owner_name: owner_name.to_string(),
            owner_phone: owner_phone.trim().to_string(),
        })
    }
}
