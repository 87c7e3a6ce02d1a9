//! Mini-info: a small projection of the analysis result used for listings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Small listing projection of an [`AnalysisResult`](crate::result::AnalysisResult)
///
/// Written independently of the result, so it may be missing for dumps
/// that do have a result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MiniInfo {
    /// Version of the projection format
    pub dump_mini_info_version: u32,
    /// Name of the crashing executable
    pub executable: Option<String>,
    /// Exception type of the last event
    pub exception_type: Option<String>,
    /// Exception message of the last event
    pub exception_message: Option<String>,
    /// Tag names, most severe first
    pub highlighted_tags: Vec<String>,
    /// Fields owned by other components
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
