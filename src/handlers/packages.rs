use crate::db::models::Package;
use crate::domain::{PricingTable, VehicleSize};
use crate::error::AppError;
use crate::extract::ApiPath;
use crate::schemas::{PackageListResponse, PackagePricing, PackageResponse, PackageWithPricing};
use crate::AppState;
use axum::{extract::State, Json};

fn with_pricing(package: Package, pricing: &PricingTable) -> PackageWithPricing {
    let price = |size| pricing.base_price(size, &package.package_name).cloned();
    let pricing = PackagePricing {
        small: price(VehicleSize::Small),
        medium: price(VehicleSize::Medium),
        big: price(VehicleSize::Big),
    };
    PackageWithPricing { package, pricing }
}

pub async fn list_packages(
    State(state): State<AppState>,
) -> Result<Json<PackageListResponse>, AppError> {
    let packages = state
        .packages
        .list()
        .await?
        .into_iter()
        .map(|p| with_pricing(p, &state.pricing))
        .collect();

    Ok(Json(PackageListResponse {
        success: true,
        packages,
    }))
}

pub async fn get_package(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PackageResponse>, AppError> {
    let package = state
        .packages
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Package {} not found", id)))?;

    Ok(Json(PackageResponse {
        success: true,
        package: with_pricing(package, &state.pricing),
    }))
}
