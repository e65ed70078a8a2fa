//! HTTP request handlers.

use super::types::{HealthResponse, PostRequest, PostResponse};
use super::AppState;
use crate::error::GatewayError;
use crate::quota::{self, QuotaDecision};
use axum::{extract::State, Json};
use chrono::Utc;
use tracing::info;
use usage_store::{UsageRecord, UsageUpdate};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let record_count = state.store.count().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        record_count,
    })
}

/// List every stored usage record.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<UsageRecord>> {
    Json(state.store.find_all().await)
}

/// Submit a query, metered against the caller's daily quota.
///
/// The store write (when one happens) is committed before the upstream
/// call; an upstream failure fails the request without rolling the
/// write back. The exhausted path writes nothing and never calls
/// upstream.
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<PostRequest>,
) -> Result<Json<PostResponse>, GatewayError> {
    let now = Utc::now().timestamp();
    let record = state.store.find_one(&request.address).await;

    match quota::decide(record.as_ref(), request.pineapple_amt, now, state.increment) {
        QuotaDecision::FirstSeen => {
            state
                .store
                .insert(UsageRecord::new(
                    request.address.clone(),
                    request.pineapple_amt,
                    state.increment,
                    now,
                ))
                .await?;

            let message = state.upstream.complete(&request.query).await?;

            info!(address = %request.address, "First request, usage record created");

            Ok(Json(PostResponse::success(
                request.pineapple_amt,
                state.increment,
                message,
            )))
        }
        QuotaDecision::WindowReset { reported_usage } => {
            state
                .store
                .update(
                    &request.address,
                    UsageUpdate {
                        holding: request.pineapple_amt,
                        usage: state.increment,
                        timestamp: Some(now),
                    },
                )
                .await?;

            let message = state.upstream.complete(&request.query).await?;

            info!(address = %request.address, "Usage window reset");

            Ok(Json(PostResponse::success(
                request.pineapple_amt,
                reported_usage,
                message,
            )))
        }
        QuotaDecision::Deduct {
            reported_usage,
            new_usage,
        } => {
            state
                .store
                .update(
                    &request.address,
                    UsageUpdate {
                        holding: request.pineapple_amt,
                        usage: new_usage,
                        timestamp: None,
                    },
                )
                .await?;

            let message = state.upstream.complete(&request.query).await?;

            info!(address = %request.address, usage = new_usage, "Usage incremented");

            Ok(Json(PostResponse::success(
                request.pineapple_amt,
                reported_usage,
                message,
            )))
        }
        QuotaDecision::LimitReached { usage } => {
            info!(address = %request.address, usage, "Quota exhausted");

            Ok(Json(PostResponse::limit_reached(
                request.pineapple_amt,
                usage,
            )))
        }
    }
}
