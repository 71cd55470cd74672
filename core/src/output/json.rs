//! JSON serialization of recovered models, used by the CLI `info` command.

use crate::model::UniverseModel;
use serde::Serialize;

/// Count summary alongside the full collections, so scripted consumers do
/// not have to recount.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub tables: usize,
    pub joins: usize,
    pub objects: usize,
    pub dimensions: usize,
    pub measures: usize,
    pub attributes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelReport<'a> {
    #[serde(flatten)]
    pub model: &'a UniverseModel,
    pub summary: ModelSummary,
}

pub fn model_report(model: &UniverseModel) -> ModelReport<'_> {
    ModelReport {
        model,
        summary: ModelSummary {
            tables: model.tables.len(),
            joins: model.joins.len(),
            objects: model.objects.len(),
            dimensions: model.dimensions.len(),
            measures: model.measures.len(),
            attributes: model.attributes.len(),
        },
    }
}

pub fn serialize_model(model: &UniverseModel) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&model_report(model))
}
