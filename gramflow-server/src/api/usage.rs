//! Usage API Handler
//!
//! Static snapshot of platform quota figures for the dashboard. The platform
//! account API is not part of the scrape flow, so the figures here are a
//! fixed mock.

use axum::Json;
use serde::Serialize;

/// Response envelope matching the platform's account API shape
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub data: UsageSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub monthly_usage_cycle: UsageCycle,
    pub limits: UsageLimits,
    pub current: CurrentUsage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCycle {
    pub start_at: &'static str,
    pub end_at: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLimits {
    pub max_monthly_usage_usd: f64,
    pub max_monthly_actor_compute_units: u64,
    pub max_concurrent_actor_jobs: u32,
    pub max_actor_count: u32,
    pub data_retention_days: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUsage {
    pub monthly_usage_usd: f64,
    pub monthly_actor_compute_units: u64,
    pub active_actor_job_count: u32,
    pub actor_count: u32,
}

/// GET /api/usage
/// Current-vs-max quota figures for observability
pub async fn get_usage() -> Json<UsageResponse> {
    Json(UsageResponse {
        data: UsageSnapshot {
            monthly_usage_cycle: UsageCycle {
                start_at: "2025-05-10T00:00:00.000Z",
                end_at: "2025-06-09T23:59:59.999Z",
            },
            limits: UsageLimits {
                max_monthly_usage_usd: 5.0,
                max_monthly_actor_compute_units: 625,
                max_concurrent_actor_jobs: 25,
                max_actor_count: 500,
                data_retention_days: 7,
            },
            current: CurrentUsage {
                monthly_usage_usd: 0.35,
                monthly_actor_compute_units: 0,
                active_actor_job_count: 0,
                actor_count: 0,
            },
        },
    })
}
