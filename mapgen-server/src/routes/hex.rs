//! Hex geometry endpoints
//!
//! Coordinates arrive as raw JSON so malformed operands are reported with
//! the coordinate library's own messages.

use crate::error::ApiError;
use axum::Json;
use mapgen_core::{distance, ring, rotate, spiral, Cube, Direction, Rotation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest ring or spiral radius served
pub const MAX_RADIUS: u32 = 64;

/// Ring or spiral request
#[derive(Deserialize)]
pub struct WalkRequest {
    pub center: Value,
    pub radius: u32,
    #[serde(default = "default_direction")]
    pub direction: Direction,
    #[serde(default)]
    pub rotation: Rotation,
}

fn default_direction() -> Direction {
    Direction::N
}

impl WalkRequest {
    fn center(&self) -> Result<Cube, ApiError> {
        if self.radius > MAX_RADIUS {
            return Err(ApiError::BadRequest(format!(
                "radius must be at most {}, not {}",
                MAX_RADIUS, self.radius
            )));
        }
        Ok(Cube::from_value(&self.center)?)
    }
}

#[derive(Serialize)]
pub struct PositionsResponse {
    pub positions: Vec<Cube>,
}

pub async fn ring_handler(
    Json(req): Json<WalkRequest>,
) -> Result<Json<PositionsResponse>, ApiError> {
    let center = req.center()?;
    let positions = ring(center, req.radius, req.direction, req.rotation)?.collect();
    Ok(Json(PositionsResponse { positions }))
}

pub async fn spiral_handler(
    Json(req): Json<WalkRequest>,
) -> Result<Json<PositionsResponse>, ApiError> {
    let center = req.center()?;
    let positions = spiral(center, req.radius, req.direction, req.rotation)?.collect();
    Ok(Json(PositionsResponse { positions }))
}

#[derive(Deserialize)]
pub struct RotateRequest {
    pub point: Value,
    #[serde(default)]
    pub center: Option<Value>,
    pub angle: i32,
}

#[derive(Serialize)]
pub struct PositionResponse {
    pub position: Cube,
}

/// Rotate `point` about `center` (origin when omitted)
pub async fn rotate_handler(
    Json(req): Json<RotateRequest>,
) -> Result<Json<PositionResponse>, ApiError> {
    let point = Cube::from_value(&req.point)?;
    let center = match &req.center {
        Some(value) => Cube::from_value(value)?,
        None => Cube::ORIGIN,
    };
    let position = rotate(point, center, req.angle)?;
    Ok(Json(PositionResponse { position }))
}

#[derive(Deserialize)]
pub struct DistanceRequest {
    pub a: Value,
    pub b: Value,
}

#[derive(Serialize)]
pub struct DistanceResponse {
    pub distance: u32,
}

pub async fn distance_handler(
    Json(req): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let a = Cube::from_value(&req.a)?;
    let b = Cube::from_value(&req.b)?;
    Ok(Json(DistanceResponse {
        distance: distance(a, b),
    }))
}
