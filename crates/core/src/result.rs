//! Analysis result document
//!
//! The result of analysing a dump is a large JSON document. Several of its
//! substructures are polymorphic: a Windows and a Linux analysis produce
//! different system contexts, modules and stack frames. Each polymorphic
//! object carries a `"$type"` discriminator which selects the variant on
//! decode.
//!
//! The storage layer treats the document as opaque apart from
//! [`AnalysisInfo`], which compat synthesis reads. Top-level fields this
//! model does not know are kept in `extra` so a read-write cycle does not
//! drop them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full analysis result of one dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResult {
    /// Where and when the analysis ran
    pub analysis_info: AnalysisInfo,
    /// Operating system facts, shape depends on the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_context: Option<SystemContext>,
    /// Threads with their stack traces
    #[serde(default)]
    pub threads: Vec<ThreadInfo>,
    /// Loaded modules
    #[serde(default)]
    pub modules: Vec<Module>,
    /// Tags attached by the analysis
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Result with only analysis info set
    pub fn new(analysis_info: AnalysisInfo) -> Self {
        Self {
            analysis_info,
            system_context: None,
            threads: Vec::new(),
            modules: Vec::new(),
            tags: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Analysis provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisInfo {
    /// Absolute path the dump was analysed from
    ///
    /// Older results stored the full upload path here.
    #[serde(default)]
    pub path: Option<String>,
    /// Server time the analysis was recorded
    #[serde(default)]
    pub server_time_stamp: DateTime<Utc>,
    /// Original file name of the upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

// =============================================================================
// Polymorphic substructures
// =============================================================================

/// System context, discriminated by `"$type"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum SystemContext {
    /// Windows minidump
    Windows(WindowsSystemContext),
    /// Linux core dump
    Linux(LinuxSystemContext),
}

/// Windows system facts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WindowsSystemContext {
    /// Process architecture, e.g. "X64"
    pub process_architecture: Option<String>,
    /// Machine architecture
    pub system_architecture: Option<String>,
    /// Uptime at crash time
    pub system_up_time: Option<String>,
}

/// Linux system facts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LinuxSystemContext {
    /// Distribution name
    pub distribution: Option<String>,
    /// Kernel release
    pub kernel: Option<String>,
    /// Process arguments
    pub args: Option<String>,
}

/// Loaded module, discriminated by `"$type"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Module {
    /// PE image
    Windows(WindowsModule),
    /// Shared object
    Linux(LinuxModule),
}

/// PE image module
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WindowsModule {
    /// Image file name
    pub file_name: String,
    /// File version
    pub version: Option<String>,
    /// Whether the module is managed
    pub is_managed: bool,
}

/// Shared object module
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LinuxModule {
    /// Library file name
    pub file_name: String,
    /// Build id
    pub build_id: Option<String>,
    /// Whether debug symbols were resolved
    pub has_symbols: bool,
}

/// One thread of the crashed process
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ThreadInfo {
    /// OS thread id
    pub os_id: u64,
    /// Debugger engine id
    pub engine_id: u32,
    /// Frames, innermost first
    pub stack_trace: Vec<StackFrame>,
}

/// Stack frame, discriminated by `"$type"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum StackFrame {
    /// Frame resolved through the managed runtime
    Managed(FrameInfo),
    /// Native frame
    Native(FrameInfo),
}

/// Resolved frame location
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FrameInfo {
    /// Module name
    pub module_name: String,
    /// Method or symbol name
    pub method_name: String,
    /// Instruction pointer
    pub instruction_pointer: u64,
}

/// Tag, discriminated by `"$type"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Tag {
    /// Plain name tag
    Plain(TagInfo),
    /// Tag produced by an analyzer, with a description
    Analysis(AnalysisTagInfo),
}

/// Name-only tag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
}

/// Analyzer tag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AnalysisTagInfo {
    /// Tag name
    pub name: String,
    /// Human-readable explanation
    pub description: Option<String>,
}
