//! Sorting Application Model
//!
//! An independent CRUD aggregate: a sorting application is described by its
//! ordered process steps, the market segments it serves and the materials it
//! targets. It has no relation to boards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::board::validate_name;
use crate::shared::error::SharedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingApplication {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub process_steps: Vec<ProcessStep>,
    pub market_segments: Vec<MarketSegment>,
    pub target_materials: Vec<TargetMaterial>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub step_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSegment {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMaterial {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Body for both create and update; on update `id` must match the path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingApplicationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub process_steps: Vec<ProcessStepInput>,
    #[serde(default)]
    pub market_segments: Vec<String>,
    #[serde(default)]
    pub target_materials: Vec<TargetMaterialInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStepInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit ordering; steps without one keep their position in the list
    #[serde(default)]
    pub step_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMaterialInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SortingApplicationRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_name("name", &self.name)?;
        for (index, step) in self.process_steps.iter().enumerate() {
            validate_name(&format!("processSteps[{}].name", index), &step.name)?;
        }
        for (index, segment) in self.market_segments.iter().enumerate() {
            validate_name(&format!("marketSegments[{}]", index), segment)?;
        }
        for (index, material) in self.target_materials.iter().enumerate() {
            validate_name(&format!("targetMaterials[{}].name", index), &material.name)?;
        }
        Ok(())
    }

    /// Process steps paired with their effective order
    pub fn ordered_steps(&self) -> Vec<(i32, &ProcessStepInput)> {
        let mut steps: Vec<(i32, &ProcessStepInput)> = self
            .process_steps
            .iter()
            .enumerate()
            .map(|(index, step)| (step.step_order.unwrap_or(index as i32), step))
            .collect();
        steps.sort_by_key(|(order, _)| *order);
        steps
    }
}
