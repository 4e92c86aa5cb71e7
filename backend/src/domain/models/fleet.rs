use shared::{CreateRentalVehicleRequest, RentalVehicle, UpdateRentalVehicleRequest};

use super::Record;
use crate::domain::validation::{optional_date, optional_text, parse_amount, require_text, ValidationError};

impl Record for RentalVehicle {
    type Create = CreateRentalVehicleRequest;
    type Update = UpdateRentalVehicleRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, created_at: String, request: CreateRentalVehicleRequest) -> Self {
        RentalVehicle {
            id,
            vehicle_number: request.vehicle_number,
            model: request.model,
            driver_name: request.driver_name,
            monthly_rent: request.monthly_rent,
            status: request.status,
            acquired_date: request.acquired_date,
            description: request.description,
            created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateRentalVehicleRequest) {
        if let Some(vehicle_number) = update.vehicle_number {
            self.vehicle_number = vehicle_number;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(driver_name) = update.driver_name {
            self.driver_name = driver_name;
        }
        if let Some(monthly_rent) = update.monthly_rent {
            self.monthly_rent = monthly_rent;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(acquired_date) = update.acquired_date {
            self.acquired_date = acquired_date;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("vehicleNumber", &self.vehicle_number)?;
        require_text("model", &self.model)?;
        optional_text("driverName", self.driver_name.as_deref())?;
        parse_amount("monthlyRent", &self.monthly_rent)?;
        optional_date("acquiredDate", self.acquired_date.as_deref())?;
        optional_text("description", self.description.as_deref())
    }
}
